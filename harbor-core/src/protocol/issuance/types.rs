use rst_common::standard::async_trait::async_trait;
use rst_common::standard::chrono::{DateTime, Utc};
use rst_common::standard::serde::{self, Deserialize, Serialize};
use rst_common::standard::serde_json::Value;
use rst_common::with_errors::thiserror::{self, Error};

use std::time::Duration;

use crate::matcher::types::{MatcherError, OfferFilter};
use crate::protocol::engine::EngineError;
use crate::storage::StorageError;

/// Protocol states an issuer actor can report. `Accepted` is terminal.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(crate = "self::serde")]
pub enum IssuerState {
    OfferSent,
    RequestReceived,
    Accepted,
}

impl IssuerState {
    pub fn as_str(&self) -> &'static str {
        match self {
            IssuerState::OfferSent => "offer-sent",
            IssuerState::RequestReceived => "request-received",
            IssuerState::Accepted => "accepted",
        }
    }
}

impl std::fmt::Display for IssuerState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Protocol states a holder actor can report. `Accepted` is terminal.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(crate = "self::serde")]
pub enum HolderState {
    OfferReceived,
    RequestSent,
    Accepted,
}

impl HolderState {
    pub fn as_str(&self) -> &'static str {
        match self {
            HolderState::OfferReceived => "offer-received",
            HolderState::RequestSent => "request-sent",
            HolderState::Accepted => "accepted",
        }
    }
}

impl std::fmt::Display for HolderState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// `IssuanceError` is the base error type for both issuance roles.
#[derive(Debug, PartialEq, Error)]
pub enum IssuanceError {
    #[error("unexpected issuer state: expected {expected}, got {actual}")]
    UnexpectedIssuerState {
        expected: IssuerState,
        actual: IssuerState,
    },

    #[error("unexpected holder state: expected {expected}, got {actual}")]
    UnexpectedHolderState {
        expected: HolderState,
        actual: HolderState,
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

/// `IssuerActorBuilder` is one live issuer actor held by the engine. Steps
/// that touch the wire take the pairwise connection's state blob.
#[async_trait]
pub trait IssuerActorBuilder {
    fn snapshot(&self) -> Result<Vec<u8>, EngineError>;
    fn state(&self) -> IssuerState;

    async fn send_credential(&mut self, connection_blob: Vec<u8>)
        -> Result<IssuerState, EngineError>;
    async fn poll_next(&mut self, connection_blob: Vec<u8>) -> Result<IssuerState, EngineError>;
}

/// `IssuerEngineBuilder` is the consumed engine capability for the issuer
/// role.
#[async_trait]
pub trait IssuerEngineBuilder {
    type Actor: IssuerActorBuilder + Send;

    async fn start_offer(
        &self,
        source_id: &str,
        cred_def_blob: Vec<u8>,
        connection_blob: Vec<u8>,
        attributes: Value,
    ) -> Result<Self::Actor, EngineError>;
    fn restore(&self, blob: Vec<u8>) -> Result<Self::Actor, EngineError>;
}

/// `HolderActorBuilder` is one live holder actor held by the engine.
#[async_trait]
pub trait HolderActorBuilder {
    fn snapshot(&self) -> Result<Vec<u8>, EngineError>;
    fn state(&self) -> HolderState;

    async fn send_request(&mut self, connection_blob: Vec<u8>) -> Result<HolderState, EngineError>;
    async fn poll_next(&mut self, connection_blob: Vec<u8>) -> Result<HolderState, EngineError>;
}

/// `HolderEngineBuilder` is the consumed engine capability for the holder
/// role.
#[async_trait]
pub trait HolderEngineBuilder {
    type Actor: HolderActorBuilder + Send;

    async fn fetch_offers(&self, connection_blob: Vec<u8>) -> Result<Vec<Value>, EngineError>;
    async fn start_from_offer(
        &self,
        source_id: &str,
        offer: Value,
    ) -> Result<Self::Actor, EngineError>;
    fn restore(&self, blob: Vec<u8>) -> Result<Self::Actor, EngineError>;
}

/// `IssuerEntityAccessor` exposes the persisted issuer credential fields.
pub trait IssuerEntityAccessor {
    fn get_name(&self) -> String;
    fn get_connection(&self) -> String;
    fn get_state(&self) -> IssuerState;
    fn get_state_blob(&self) -> Vec<u8>;
    fn get_created_at(&self) -> DateTime<Utc>;
    fn get_updated_at(&self) -> DateTime<Utc>;
}

/// `HolderEntityAccessor` exposes the persisted holder credential fields.
pub trait HolderEntityAccessor {
    fn get_name(&self) -> String;
    fn get_connection(&self) -> String;
    fn get_state(&self) -> HolderState;
    fn get_state_blob(&self) -> Vec<u8>;
    fn get_created_at(&self) -> DateTime<Utc>;
    fn get_updated_at(&self) -> DateTime<Utc>;
}

/// `IssuerAPI` is the produced surface for the issuer role.
#[async_trait]
pub trait IssuerAPI {
    type EntityAccessor: IssuerEntityAccessor;

    /// Builds a credential offer from a stored credential definition and
    /// sends it over the named connection.
    async fn send_credential_offer(
        &self,
        name: &str,
        connection: &str,
        cred_def: &str,
        attributes: Value,
    ) -> Result<IssuerState, IssuanceError>;

    /// Issues the credential to a holder whose request arrived.
    async fn send_credential(
        &self,
        name: &str,
        connection: &str,
    ) -> Result<IssuerState, IssuanceError>;

    /// Feeds one pending inbound message into the stored credential and
    /// asserts the state it lands in.
    async fn credential_update(
        &self,
        name: &str,
        connection: &str,
        expected: IssuerState,
    ) -> Result<IssuerState, IssuanceError>;

    async fn get_credential(&self, name: &str) -> Result<Self::EntityAccessor, IssuanceError>;
    async fn list_credentials(&self) -> Result<Vec<String>, IssuanceError>;
}

/// `HolderAPI` is the produced surface for the holder role.
#[async_trait]
pub trait HolderAPI {
    type EntityAccessor: HolderEntityAccessor;

    /// Downloads the credential offers currently pending on the named
    /// connection, narrowed by the filter when one is given.
    async fn fetch_offers(
        &self,
        connection: &str,
        filter: Option<OfferFilter>,
    ) -> Result<Vec<Value>, IssuanceError>;

    /// Polls for a matching offer with a bounded retry loop, sleeping
    /// `delay` between attempts. Exhaustion is
    /// [`IssuanceError::PollExhausted`].
    async fn wait_for_offer(
        &self,
        connection: &str,
        filter: Option<OfferFilter>,
        attempts: u32,
        delay: Duration,
    ) -> Result<Value, IssuanceError>;

    /// Accepts an offer by creating the holder actor and sending the
    /// credential request back over the connection.
    async fn accept_credential_offer(
        &self,
        name: &str,
        connection: &str,
        offer: Value,
    ) -> Result<HolderState, IssuanceError>;

    /// Feeds one pending inbound message into the stored credential and
    /// asserts the state it lands in.
    async fn credential_update(
        &self,
        name: &str,
        connection: &str,
        expected: HolderState,
    ) -> Result<HolderState, IssuanceError>;

    async fn get_credential(&self, name: &str) -> Result<Self::EntityAccessor, IssuanceError>;
    async fn list_credentials(&self) -> Result<Vec<String>, IssuanceError>;
}
