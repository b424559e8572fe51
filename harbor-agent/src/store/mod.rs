//! RocksDB-backed implementation of the `harbor-core` record store.

mod repository;
pub use repository::Repository;
