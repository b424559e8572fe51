//! `matcher` filters credential offers and picks credential evidence for a
//! proof presentation.
//!
//! Two independent filter primitives run over decoded offer attachments: a
//! schema filter over `schema_id` and an attribute filter over the offer's
//! preview attributes. Proof selection follows a first-match policy: for each
//! requested attribute the first resolved candidate wins, and an attribute
//! with zero candidates is left unselected so the caller can supply it as a
//! self-attested value. First-match is an observable behavior of produced
//! proofs and must not be replaced by a best-match ranking.

pub mod types;

mod filters;
pub use filters::{filter_offers_by_attr, filter_offers_by_schema};

mod selection;
pub use selection::select_credentials_for_proof;
