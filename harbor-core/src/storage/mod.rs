//! `storage` defines the persistence contract shared by every protocol actor
//! kind. Each kind gets an isolated namespace per agent name, so two agents
//! never collide even when they reuse entity names. The contract is
//! deliberately small: `exists`, `save` (unconditional overwrite,
//! last-writer-wins), `load` (fails with [`StorageError::NotFound`] naming
//! the kind and key, never returns a default) and `list_names`.
//!
//! The backend is pluggable; `harbor-agent` ships a RocksDB implementation.

pub mod types;

pub use types::{RecordKind, RecordStoreBuilder, StorageError};
