use rst_common::standard::async_trait::async_trait;
use rst_common::standard::chrono::{DateTime, Utc};
use rst_common::standard::serde::{self, Deserialize, Serialize};
use rst_common::standard::serde_json::Value;
use rst_common::with_errors::thiserror::{self, Error};

use std::time::Duration;

use crate::matcher::types::MatcherError;
use crate::protocol::engine::EngineError;
use crate::storage::StorageError;

/// Protocol states a verifier actor can report. `Verified` is terminal.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(crate = "self::serde")]
pub enum VerifierState {
    RequestSet,
    RequestSent,
    Verified,
}

impl VerifierState {
    pub fn as_str(&self) -> &'static str {
        match self {
            VerifierState::RequestSet => "request-set",
            VerifierState::RequestSent => "request-sent",
            VerifierState::Verified => "verified",
        }
    }
}

impl std::fmt::Display for VerifierState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Protocol states a prover actor can report. `PresentationSent` is terminal.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(crate = "self::serde")]
pub enum ProverState {
    RequestReceived,
    PresentationBuilt,
    PresentationSent,
}

impl ProverState {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProverState::RequestReceived => "request-received",
            ProverState::PresentationBuilt => "presentation-built",
            ProverState::PresentationSent => "presentation-sent",
        }
    }
}

impl std::fmt::Display for ProverState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// `PresentationError` is the base error type for both presentation roles.
#[derive(Debug, PartialEq, Error)]
pub enum PresentationError {
    #[error("unexpected verifier state: expected {expected}, got {actual}")]
    UnexpectedVerifierState {
        expected: VerifierState,
        actual: VerifierState,
    },

    #[error("unexpected prover state: expected {expected}, got {actual}")]
    UnexpectedProverState {
        expected: ProverState,
        actual: ProverState,
    },

    #[error("storage error: {0}")]
    StorageError(#[from] StorageError),

    #[error("engine error: {0}")]
    EngineError(#[from] EngineError),

    #[error("matcher error: {0}")]
    MatcherError(#[from] MatcherError),

    #[error("gave up polling: {0}")]
    PollExhausted(String),

    #[error("entity error: {0}")]
    EntityError(String),
}

/// `VerifierActorBuilder` is one live verifier actor held by the engine.
#[async_trait]
pub trait VerifierActorBuilder {
    fn snapshot(&self) -> Result<Vec<u8>, EngineError>;
    fn state(&self) -> VerifierState;

    async fn send_request(&mut self, connection_blob: Vec<u8>)
        -> Result<VerifierState, EngineError>;
    async fn poll_next(&mut self, connection_blob: Vec<u8>) -> Result<VerifierState, EngineError>;
}

/// `VerifierEngineBuilder` is the consumed engine capability for the verifier
/// role.
#[async_trait]
pub trait VerifierEngineBuilder {
    type Actor: VerifierActorBuilder + Send;

    async fn start_request(
        &self,
        source_id: &str,
        request: Value,
    ) -> Result<Self::Actor, EngineError>;
    fn restore(&self, blob: Vec<u8>) -> Result<Self::Actor, EngineError>;
}

/// `ProverActorBuilder` is one live prover actor held by the engine.
#[async_trait]
pub trait ProverActorBuilder {
    fn snapshot(&self) -> Result<Vec<u8>, EngineError>;
    fn state(&self) -> ProverState;

    /// Resolves the credentials able to satisfy each requested attribute.
    async fn resolve_candidates(&self) -> Result<Value, EngineError>;

    async fn build_presentation(
        &mut self,
        selected: Value,
        self_attested: Value,
    ) -> Result<ProverState, EngineError>;
    async fn send_presentation(
        &mut self,
        connection_blob: Vec<u8>,
    ) -> Result<ProverState, EngineError>;
    async fn poll_next(&mut self, connection_blob: Vec<u8>) -> Result<ProverState, EngineError>;
}

/// `ProverEngineBuilder` is the consumed engine capability for the prover
/// role.
#[async_trait]
pub trait ProverEngineBuilder {
    type Actor: ProverActorBuilder + Send;

    async fn fetch_requests(&self, connection_blob: Vec<u8>) -> Result<Vec<Value>, EngineError>;
    async fn start_from_request(
        &self,
        source_id: &str,
        request: Value,
    ) -> Result<Self::Actor, EngineError>;
    fn restore(&self, blob: Vec<u8>) -> Result<Self::Actor, EngineError>;
}

/// `ProofEntityAccessor` exposes the persisted verifier proof fields.
pub trait ProofEntityAccessor {
    fn get_name(&self) -> String;
    fn get_connection(&self) -> String;
    fn get_state(&self) -> VerifierState;
    fn get_state_blob(&self) -> Vec<u8>;
    fn get_created_at(&self) -> DateTime<Utc>;
    fn get_updated_at(&self) -> DateTime<Utc>;
}

/// `DisclosedProofEntityAccessor` exposes the persisted prover proof fields.
pub trait DisclosedProofEntityAccessor {
    fn get_name(&self) -> String;
    fn get_connection(&self) -> String;
    fn get_state(&self) -> ProverState;
    fn get_state_blob(&self) -> Vec<u8>;
    fn get_created_at(&self) -> DateTime<Utc>;
    fn get_updated_at(&self) -> DateTime<Utc>;
}

/// `VerifierAPI` is the produced surface for the verifier role.
#[async_trait]
pub trait VerifierAPI {
    type EntityAccessor: ProofEntityAccessor;

    /// Sets a proof request and sends it over the named connection.
    async fn create_proof_request(
        &self,
        name: &str,
        connection: &str,
        request: Value,
    ) -> Result<VerifierState, PresentationError>;

    /// Feeds one pending inbound message into the stored proof and asserts
    /// the state it lands in.
    async fn proof_update(
        &self,
        name: &str,
        connection: &str,
        expected: VerifierState,
    ) -> Result<VerifierState, PresentationError>;

    async fn get_proof(&self, name: &str) -> Result<Self::EntityAccessor, PresentationError>;
    async fn list_proofs(&self) -> Result<Vec<String>, PresentationError>;
}

/// `ProverAPI` is the produced surface for the prover role.
#[async_trait]
pub trait ProverAPI {
    type EntityAccessor: DisclosedProofEntityAccessor;

    /// Downloads the proof requests currently pending on the named
    /// connection.
    async fn fetch_requests(&self, connection: &str) -> Result<Vec<Value>, PresentationError>;

    /// Polls for a proof request with a bounded retry loop, sleeping `delay`
    /// between attempts. Exhaustion is [`PresentationError::PollExhausted`].
    async fn wait_for_request(
        &self,
        connection: &str,
        attempts: u32,
        delay: Duration,
    ) -> Result<Value, PresentationError>;

    /// Answers a proof request: resolve candidates, select evidence, build
    /// the presentation and send it over the connection.
    async fn send_disclosed_proof(
        &self,
        name: &str,
        connection: &str,
        request: Value,
        self_attested: Value,
    ) -> Result<ProverState, PresentationError>;

    /// Feeds one pending inbound message into the stored proof and asserts
    /// the state it lands in.
    async fn proof_update(
        &self,
        name: &str,
        connection: &str,
        expected: ProverState,
    ) -> Result<ProverState, PresentationError>;

    async fn get_proof(&self, name: &str) -> Result<Self::EntityAccessor, PresentationError>;
    async fn list_proofs(&self) -> Result<Vec<String>, PresentationError>;
}
