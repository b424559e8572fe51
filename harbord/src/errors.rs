use rst_common::with_errors::thiserror::{self, Error};

#[derive(Debug, Error)]
pub enum HarborError {
    #[error("config error: {0}")]
    ConfigError(String),

    #[error("store error: {0}")]
    StoreError(String),

    #[error("usage error: {0}")]
    UsageError(String),
}
