//! `issuance` drives credential exchange between an issuer and a holder.
//!
//! The issuer walks `OfferSent -> RequestReceived -> Accepted`; the holder
//! walks `OfferReceived -> RequestSent -> Accepted`. Sending an offer and
//! accepting one are the initiating steps. The holder side additionally
//! fetches pending offers off the wire, optionally narrowed by an
//! [`crate::matcher::types::OfferFilter`], with a bounded retry loop for
//! callers waiting on an offer that has not arrived yet.

mod issuer;
pub use issuer::IssuerCredential;

mod holder;
pub use holder::HolderCredential;

mod usecase;
pub use usecase::{HolderUsecase, IssuerUsecase};

pub mod types;
