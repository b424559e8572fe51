//! RocksDB execution layer.
//!
//! Records are written with plain puts. Per-kind name listings are kept in a
//! [`NameIndex`] maintained through an associative merge operator, so
//! appending a name never has to read the index first.

mod types;
pub use types::{DbError, Instruction, OutputOpts, NAME_INDEX_PREFIX};

mod index;
pub use index::NameIndex;

mod runner;
pub use runner::Runner;

mod builder;
pub use builder::Builder;
