//! `harbor-agent` is the infrastructure side of the harbor agent: TOML
//! configuration, the RocksDB execution layer, and the [`Repository`] that
//! implements the record-store contract `harbor-core` orchestrates against.
//!
//! Records are namespaced per agent: two agents sharing one database never
//! collide, even with identical record names.

pub mod common;

mod config;
pub use config::{Config, Parser as ConfigManager};

mod db;
pub use db::{Builder as DbBuilder, Instruction as DbInstruction, Runner as DbRunner};

mod store;
pub use store::Repository;
