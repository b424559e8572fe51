use rst_common::with_errors::thiserror::{self, Error};

/// `EngineError` is the base error type for the consumed engine capability.
/// Step failures carry the engine's own message verbatim, never reinterpreted.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    #[error("engine step failed: {0}")]
    StepError(String),

    #[error("unable to snapshot actor state: {0}")]
    SerializeError(String),

    #[error("unable to restore actor state: {0}")]
    UnserializeError(String),

    #[error("runtime error: {0}")]
    RuntimeError(String),
}

/// `RuntimeBuilder` brackets every engine step with an initialized runtime.
///
/// `acquire` yields a context that must stay alive for the duration of the
/// step; dropping it releases the runtime. Release happens on every exit
/// path, including step failures, because the context is bound to the scope
/// of the single operation that acquired it.
pub trait RuntimeBuilder: Clone {
    type Context: Send;

    fn acquire(&self) -> Result<Self::Context, EngineError>;
}
