use rst_common::standard::chrono::serde::ts_seconds;
use rst_common::standard::chrono::{DateTime, Utc};
use rst_common::standard::serde::{self, Deserialize, Serialize};
use rst_common::standard::serde_json;

use rstdev_domain::entity::ToJSON;
use rstdev_domain::BaseError;

use super::types::{ConnectionEntityAccessor, ConnectionError, ConnectionRole, ConnectionState};

/// `Connection` is the persisted record of one pairwise channel: the engine's
/// opaque state blob plus the last state the engine reported for it.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(crate = "self::serde")]
pub struct Connection {
    pub(crate) name: String,
    pub(crate) role: ConnectionRole,
    pub(crate) state: ConnectionState,

    #[serde(rename = "pairwiseDid")]
    pub(crate) pairwise_did: String,

    #[serde(rename = "stateBlob")]
    pub(crate) state_blob: Vec<u8>,

    #[serde(with = "ts_seconds")]
    #[serde(rename = "createdAt")]
    pub(crate) created_at: DateTime<Utc>,

    #[serde(with = "ts_seconds")]
    #[serde(rename = "updatedAt")]
    pub(crate) updated_at: DateTime<Utc>,
}

impl Connection {
    pub fn new(
        name: String,
        role: ConnectionRole,
        pairwise_did: String,
        state: ConnectionState,
        state_blob: Vec<u8>,
    ) -> Self {
        Self {
            name,
            role,
            state,
            pairwise_did,
            state_blob,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    /// Replaces the cached state and blob with what the engine reported after
    /// a step.
    pub fn advance(&mut self, state: ConnectionState, state_blob: Vec<u8>) -> &mut Self {
        self.state = state;
        self.state_blob = state_blob;
        self.updated_at = Utc::now();
        self
    }
}

impl ToJSON for Connection {
    fn to_json(&self) -> Result<String, BaseError> {
        let json_str =
            serde_json::to_string(&self).map_err(|err| BaseError::ToJSONError(err.to_string()))?;

        Ok(json_str)
    }
}

impl TryInto<Vec<u8>> for Connection {
    type Error = ConnectionError;

    fn try_into(self) -> Result<Vec<u8>, Self::Error> {
        let json = serde_json::to_vec(&self)
            .map_err(|err| ConnectionError::EntityError(err.to_string()))?;
        Ok(json)
    }
}

impl TryFrom<Vec<u8>> for Connection {
    type Error = ConnectionError;

    fn try_from(value: Vec<u8>) -> Result<Self, Self::Error> {
        let connection: Connection = serde_json::from_slice(&value)
            .map_err(|err| ConnectionError::EntityError(err.to_string()))?;
        Ok(connection)
    }
}

impl ConnectionEntityAccessor for Connection {
    fn get_name(&self) -> String {
        self.name.to_owned()
    }

    fn get_role(&self) -> ConnectionRole {
        self.role
    }

    fn get_state(&self) -> ConnectionState {
        self.state
    }

    fn get_pairwise_did(&self) -> String {
        self.pairwise_did.to_owned()
    }

    fn get_state_blob(&self) -> Vec<u8> {
        self.state_blob.to_owned()
    }

    fn get_created_at(&self) -> DateTime<Utc> {
        self.created_at.to_owned()
    }

    fn get_updated_at(&self) -> DateTime<Utc> {
        self.updated_at.to_owned()
    }
}
