use rst_common::standard::chrono::serde::ts_seconds;
use rst_common::standard::chrono::{DateTime, Utc};
use rst_common::standard::serde::{self, Deserialize, Serialize};
use rst_common::standard::serde_json;

use rstdev_domain::entity::ToJSON;
use rstdev_domain::BaseError;

use super::types::{ProvisionEntityAccessor, ProvisionError};

/// `AgentProvision` is the singleton record of the agent's identity and
/// wallet configuration, written once at provisioning time.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(crate = "self::serde")]
pub struct AgentProvision {
    #[serde(rename = "agentName")]
    pub(crate) agent_name: String,

    #[serde(rename = "institutionName")]
    pub(crate) institution_name: String,

    #[serde(rename = "walletName")]
    pub(crate) wallet_name: String,

    #[serde(rename = "walletKey")]
    pub(crate) wallet_key: String,

    #[serde(rename = "genesisPath")]
    pub(crate) genesis_path: String,

    #[serde(rename = "agencyEndpoint")]
    pub(crate) agency_endpoint: String,

    #[serde(with = "ts_seconds")]
    #[serde(rename = "createdAt")]
    pub(crate) created_at: DateTime<Utc>,
}

impl AgentProvision {
    pub fn new(
        agent_name: String,
        institution_name: String,
        wallet_name: String,
        wallet_key: String,
        genesis_path: String,
        agency_endpoint: String,
    ) -> Self {
        Self {
            agent_name,
            institution_name,
            wallet_name,
            wallet_key,
            genesis_path,
            agency_endpoint,
            created_at: Utc::now(),
        }
    }
}

impl ToJSON for AgentProvision {
    fn to_json(&self) -> Result<String, BaseError> {
        let json_str =
            serde_json::to_string(&self).map_err(|err| BaseError::ToJSONError(err.to_string()))?;

        Ok(json_str)
    }
}

impl TryInto<Vec<u8>> for AgentProvision {
    type Error = ProvisionError;

    fn try_into(self) -> Result<Vec<u8>, Self::Error> {
        let json = serde_json::to_vec(&self)
            .map_err(|err| ProvisionError::EntityError(err.to_string()))?;
        Ok(json)
    }
}

impl TryFrom<Vec<u8>> for AgentProvision {
    type Error = ProvisionError;

    fn try_from(value: Vec<u8>) -> Result<Self, Self::Error> {
        let provision: AgentProvision = serde_json::from_slice(&value)
            .map_err(|err| ProvisionError::EntityError(err.to_string()))?;
        Ok(provision)
    }
}

impl ProvisionEntityAccessor for AgentProvision {
    fn get_agent_name(&self) -> String {
        self.agent_name.to_owned()
    }

    fn get_institution_name(&self) -> String {
        self.institution_name.to_owned()
    }

    fn get_wallet_name(&self) -> String {
        self.wallet_name.to_owned()
    }

    fn get_wallet_key(&self) -> String {
        self.wallet_key.to_owned()
    }

    fn get_genesis_path(&self) -> String {
        self.genesis_path.to_owned()
    }

    fn get_agency_endpoint(&self) -> String {
        self.agency_endpoint.to_owned()
    }

    fn get_created_at(&self) -> DateTime<Utc> {
        self.created_at.to_owned()
    }
}
