//! `provision` creates the agent's durable identity exactly once.
//!
//! Provisioning writes the singleton [`AgentProvision`] record the rest of
//! the system reads at startup. A second initialize for the same agent never
//! re-provisions: the existence check runs before the engine is touched, and
//! the caller can tell a fresh provision from a reused one through
//! [`types::Provisioned`].

mod provision;
pub use provision::AgentProvision;

mod usecase;
pub use usecase::Usecase;

pub mod types;
