mod database;
pub use database::{Agent, Database, RocksDBCommon, RocksDBOptions};

mod app;
pub use app::App;

mod config;
pub use config::Config;

mod parser;
pub use parser::Parser;
