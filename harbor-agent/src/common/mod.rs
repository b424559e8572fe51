//! Shared error and validation primitives used across the agent crate.

pub mod helpers;
pub mod types;
