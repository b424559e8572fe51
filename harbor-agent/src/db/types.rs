use rst_common::with_errors::thiserror::{self, Error};

/// Key prefix that routes a write through the name-index merge operator.
pub const NAME_INDEX_PREFIX: &str = "names";

#[derive(Error, PartialEq, Debug)]
pub enum DbError {
    #[error("index error: {0}")]
    IndexError(String),

    #[error("exec error: {0}")]
    ExecError(String),
}

pub enum Instruction {
    SaveCf { key: String, value: Vec<u8> },
    MergeCf { key: String, value: Vec<u8> },
    GetCf { key: String },
}

#[derive(Debug)]
pub enum OutputOpts {
    SingleByte { value: Option<Vec<u8>> },
    None,
}

impl OutputOpts {
    pub fn is_none(&self) -> bool {
        match self {
            OutputOpts::None => true,
            _ => false,
        }
    }
}
