//! `harbor-core` holds the domain logic of the harbor agent: a persistent,
//! name-addressed store of protocol actors and the orchestration that drives
//! those actors through their expected state sequences.
//!
//! An *actor* is one named instance of a protocol role with persisted state:
//! a connection endpoint, a credential issuer or holder, a prover or a
//! verifier. Actors live as long as the exchange they belong to, survive
//! process restarts, and are resumed by name. The cryptographic protocol
//! engine that actually produces and consumes DIDComm messages is an external
//! capability: this crate only loads an actor, hands its opaque state blob to
//! the engine, lets the engine perform exactly one protocol-advancing step,
//! asserts the reported state against the caller's expectation, and persists
//! whatever came back.
//!
//! The crate is split into four areas:
//!
//! - `storage` defines the record-store contract every actor kind is
//!   persisted through
//! - `inbox` retrieves and filters inbound relay messages for one actor
//! - `matcher` selects credentials satisfying a proof request
//! - `protocol` carries the per-family orchestrators (connection, issuance,
//!   presentation), the ledger primitives, and the one-time agent
//!   provisioner

pub mod inbox;
pub mod matcher;
pub mod protocol;
pub mod storage;

#[cfg(test)]
pub(crate) mod testkit;
