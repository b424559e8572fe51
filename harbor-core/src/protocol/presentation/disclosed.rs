use rst_common::standard::chrono::serde::ts_seconds;
use rst_common::standard::chrono::{DateTime, Utc};
use rst_common::standard::serde::{self, Deserialize, Serialize};
use rst_common::standard::serde_json;

use rstdev_domain::entity::ToJSON;
use rstdev_domain::BaseError;

use super::types::{DisclosedProofEntityAccessor, PresentationError, ProverState};

/// `DisclosedProof` is the persisted record of one proof request being
/// answered on the prover side.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(crate = "self::serde")]
pub struct DisclosedProof {
    pub(crate) name: String,
    pub(crate) connection: String,
    pub(crate) state: ProverState,

    #[serde(rename = "stateBlob")]
    pub(crate) state_blob: Vec<u8>,

    #[serde(with = "ts_seconds")]
    #[serde(rename = "createdAt")]
    pub(crate) created_at: DateTime<Utc>,

    #[serde(with = "ts_seconds")]
    #[serde(rename = "updatedAt")]
    pub(crate) updated_at: DateTime<Utc>,
}

impl DisclosedProof {
    pub fn new(name: String, connection: String, state: ProverState, state_blob: Vec<u8>) -> Self {
        Self {
            name,
            connection,
            state,
            state_blob,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    pub fn advance(&mut self, state: ProverState, state_blob: Vec<u8>) -> &mut Self {
        self.state = state;
        self.state_blob = state_blob;
        self.updated_at = Utc::now();
        self
    }
}

impl ToJSON for DisclosedProof {
    fn to_json(&self) -> Result<String, BaseError> {
        let json_str =
            serde_json::to_string(&self).map_err(|err| BaseError::ToJSONError(err.to_string()))?;

        Ok(json_str)
    }
}

impl TryInto<Vec<u8>> for DisclosedProof {
    type Error = PresentationError;

    fn try_into(self) -> Result<Vec<u8>, Self::Error> {
        let json = serde_json::to_vec(&self)
            .map_err(|err| PresentationError::EntityError(err.to_string()))?;
        Ok(json)
    }
}

impl TryFrom<Vec<u8>> for DisclosedProof {
    type Error = PresentationError;

    fn try_from(value: Vec<u8>) -> Result<Self, Self::Error> {
        let proof: DisclosedProof = serde_json::from_slice(&value)
            .map_err(|err| PresentationError::EntityError(err.to_string()))?;
        Ok(proof)
    }
}

impl DisclosedProofEntityAccessor for DisclosedProof {
    fn get_name(&self) -> String {
        self.name.to_owned()
    }

    fn get_connection(&self) -> String {
        self.connection.to_owned()
    }

    fn get_state(&self) -> ProverState {
        self.state
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
