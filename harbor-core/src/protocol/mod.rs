//! `protocol` drives the persisted protocol actors through their exchanges.
//!
//! Every operation follows the same transition contract: resolve the stored
//! entity, acquire a scoped runtime context, invoke exactly one engine step,
//! persist the entity unconditionally, then assert the reported state against
//! the caller's expectation. Multi-hop exchanges are progressed by the caller
//! looping the relevant update operation, never by this module.

pub mod engine;

pub mod connection;
pub mod issuance;
pub mod ledger;
pub mod presentation;
pub mod provision;
