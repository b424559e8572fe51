//! `connection` establishes pairwise channels between two agents.
//!
//! The inviter walks `Initialized -> OfferSent -> RequestReceived ->
//! Accepted`; the invitee walks `Initialized -> RequestReceived -> Accepted`.
//! Creating an invite and accepting one are the initiating steps; every
//! further hop goes through [`types::ConnectionAPI::update_connection`] with
//! the caller naming the state it expects next.

mod connection;
pub use connection::Connection;

mod usecase;
pub use usecase::Usecase;

pub mod types;
