use rst_common::standard::async_trait::async_trait;
use rst_common::standard::chrono::{DateTime, Utc};
use rst_common::standard::serde::{self, Deserialize, Serialize};
use rst_common::with_errors::thiserror::{self, Error};

use crate::protocol::engine::EngineError;
use crate::storage::StorageError;

use super::provision::AgentProvision;

/// Fixed singleton key the provision record is stored under.
pub const PROVISION_KEY: &str = "agent-provision";

/// `ProvisionError` is the base error type for agent provisioning.
#[derive(Debug, PartialEq, Error)]
pub enum ProvisionError {
    #[error("storage error: {0}")]
    StorageError(#[from] StorageError),

    #[error("engine error: {0}")]
    EngineError(#[from] EngineError),

    #[error("entity error: {0}")]
    EntityError(String),
}

/// What the caller supplies to provision a new agent.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(crate = "self::serde")]
pub struct ProvisionConfig {
    #[serde(rename = "agentName")]
    pub agent_name: String,

    #[serde(rename = "institutionName")]
    pub institution_name: String,

    #[serde(rename = "walletName")]
    pub wallet_name: String,

    #[serde(rename = "walletKey")]
    pub wallet_key: String,

    #[serde(rename = "genesisPath")]
    pub genesis_path: String,

    #[serde(rename = "agencyEndpoint")]
    pub agency_endpoint: String,
}

/// Whether initialize provisioned a new identity or found an existing one.
#[derive(Debug, Clone, PartialEq)]
pub enum Provisioned {
    Fresh(AgentProvision),
    Existing(AgentProvision),
}

impl Provisioned {
    pub fn into_inner(self) -> AgentProvision {
        match self {
            Provisioned::Fresh(provision) => provision,
            Provisioned::Existing(provision) => provision,
        }
    }
}

/// `ProvisionEngineBuilder` is the consumed engine capability for identity
/// and wallet creation.
#[async_trait]
pub trait ProvisionEngineBuilder {
    async fn provision(&self, config: ProvisionConfig) -> Result<AgentProvision, EngineError>;
}

/// `ProvisionEntityAccessor` exposes the persisted provision fields.
pub trait ProvisionEntityAccessor {
    fn get_agent_name(&self) -> String;
    fn get_institution_name(&self) -> String;
    fn get_wallet_name(&self) -> String;
    fn get_wallet_key(&self) -> String;
    fn get_genesis_path(&self) -> String;
    fn get_agency_endpoint(&self) -> String;
    fn get_created_at(&self) -> DateTime<Utc>;
}

/// `ProvisionAPI` is the produced surface for agent provisioning.
#[async_trait]
pub trait ProvisionAPI {
    type EntityAccessor: ProvisionEntityAccessor;

    /// Provisions the agent if no provision record exists yet, otherwise
    /// returns the stored one untouched.
    async fn initialize(&self, config: ProvisionConfig) -> Result<Provisioned, ProvisionError>;

    async fn get_provision(&self) -> Result<Self::EntityAccessor, ProvisionError>;
}
