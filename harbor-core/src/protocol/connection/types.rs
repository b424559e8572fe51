use rst_common::standard::async_trait::async_trait;
use rst_common::standard::chrono::{DateTime, Utc};
use rst_common::standard::serde::{self, Deserialize, Serialize};
use rst_common::with_errors::thiserror::{self, Error};

use crate::protocol::engine::EngineError;
use crate::storage::StorageError;

/// Protocol states a connection actor can report. `Accepted` is terminal.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(crate = "self::serde")]
pub enum ConnectionState {
    Initialized,
    OfferSent,
    RequestReceived,
    Accepted,
}

impl ConnectionState {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConnectionState::Initialized => "initialized",
            ConnectionState::OfferSent => "offer-sent",
            ConnectionState::RequestReceived => "request-received",
            ConnectionState::Accepted => "accepted",
        }
    }
}

impl std::fmt::Display for ConnectionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Which side of the exchange this agent played when the connection was made.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(crate = "self::serde")]
pub enum ConnectionRole {
    Inviter,
    Invitee,
}

/// `ConnectionError` is the base error type for connection operations.
#[derive(Debug, PartialEq, Error)]
pub enum ConnectionError {
    #[error("unexpected connection state: expected {expected}, got {actual}")]
    UnexpectedState {
        expected: ConnectionState,
        actual: ConnectionState,
    },

    #[error("storage error: {0}")]
    StorageError(#[from] StorageError),

    #[error("engine error: {0}")]
    EngineError(#[from] EngineError),

    #[error("entity error: {0}")]
    EntityError(String),
}

/// `ConnectionActorBuilder` is one live connection actor held by the engine.
#[async_trait]
pub trait ConnectionActorBuilder {
    fn snapshot(&self) -> Result<Vec<u8>, EngineError>;
    fn state(&self) -> ConnectionState;
    fn invitation(&self) -> Result<String, EngineError>;
    fn pairwise_did(&self) -> Result<String, EngineError>;

    /// Feeds at most one pending inbound message into the actor and reports
    /// the resulting state.
    async fn poll_next(&mut self) -> Result<ConnectionState, EngineError>;
}

/// `ConnectionEngineBuilder` is the consumed engine capability for the
/// connection family.
#[async_trait]
pub trait ConnectionEngineBuilder {
    type Actor: ConnectionActorBuilder + Send;

    async fn start_invite(&self, source_id: &str) -> Result<Self::Actor, EngineError>;
    async fn start_from_invite(
        &self,
        source_id: &str,
        invite: &str,
    ) -> Result<Self::Actor, EngineError>;
    fn restore(&self, blob: Vec<u8>) -> Result<Self::Actor, EngineError>;
}

/// `ConnectionEntityAccessor` exposes the persisted connection fields.
pub trait ConnectionEntityAccessor {
    fn get_name(&self) -> String;
    fn get_role(&self) -> ConnectionRole;
    fn get_state(&self) -> ConnectionState;
    fn get_pairwise_did(&self) -> String;
    fn get_state_blob(&self) -> Vec<u8>;
    fn get_created_at(&self) -> DateTime<Utc>;
    fn get_updated_at(&self) -> DateTime<Utc>;
}

/// `ConnectionAPI` is the produced surface for the connection family.
#[async_trait]
pub trait ConnectionAPI {
    type EntityAccessor: ConnectionEntityAccessor;

    /// Starts a connection as inviter and returns the invitation to hand to
    /// the peer out of band.
    async fn create_invite(&self, name: &str) -> Result<String, ConnectionError>;

    /// Starts a connection as invitee from a received invitation.
    async fn accept_invite(
        &self,
        name: &str,
        invite: &str,
    ) -> Result<ConnectionState, ConnectionError>;

    /// Feeds one pending inbound message into the stored connection and
    /// asserts the state it lands in.
    async fn update_connection(
        &self,
        name: &str,
        expected: ConnectionState,
    ) -> Result<ConnectionState, ConnectionError>;

    async fn get_connection(&self, name: &str) -> Result<Self::EntityAccessor, ConnectionError>;
    async fn list_connections(&self) -> Result<Vec<String>, ConnectionError>;
    async fn pairwise_did(&self, name: &str) -> Result<String, ConnectionError>;
}
