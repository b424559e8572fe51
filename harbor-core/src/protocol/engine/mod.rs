//! `engine` declares what the external protocol engine must provide.
//!
//! The engine is consumed as a capability set, one builder trait per protocol
//! family plus the shared runtime bracket declared here. Actor state crossing
//! the storage boundary stays an opaque blob: the only contract is that
//! restoring a snapshot yields an actor reporting the same state it reported
//! before the snapshot was taken.

pub mod types;
pub use types::{EngineError, RuntimeBuilder};
