//! `inbox` retrieves and filters inbound relay messages for a single actor.
//!
//! The relay answers a single-actor query with an array of per-actor message
//! batches. The inbox enforces the transport contract on that shape: exactly
//! one batch must come back for a single-actor query. A response spanning
//! several actors, or a batch missing its message list, is an upstream
//! contract violation surfaced as [`types::InboxError::ProtocolAnomaly`] and
//! never retried. Zero matching actors is [`types::InboxError::EmptyResult`],
//! which is distinct from one actor with zero messages (a normal empty list).
//!
//! Status and uid filters are tri-state: unspecified applies
//! [`types::DEFAULT_STATUS_FILTER`], an explicitly empty list applies no
//! filter, and a non-empty list is comma-joined into the transport query so
//! the relay ANDs the values itself.

mod envelope;
pub use envelope::{decode_first_attachment, Envelope};

mod usecase;
pub use usecase::Inbox;

pub mod types;
