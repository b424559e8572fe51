use rst_common::standard::chrono::serde::ts_seconds;
use rst_common::standard::chrono::{DateTime, Utc};
use rst_common::standard::serde::{self, Deserialize, Serialize};
use rst_common::standard::serde_json;

use rstdev_domain::entity::ToJSON;
use rstdev_domain::BaseError;

use super::types::{HolderEntityAccessor, HolderState, IssuanceError};

/// `HolderCredential` is the persisted record of one credential being
/// received, keyed by name and tied to the connection it travels over.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(crate = "self::serde")]
pub struct HolderCredential {
    pub(crate) name: String,
    pub(crate) connection: String,
    pub(crate) state: HolderState,

    #[serde(rename = "stateBlob")]
    pub(crate) state_blob: Vec<u8>,

    #[serde(with = "ts_seconds")]
    #[serde(rename = "createdAt")]
    pub(crate) created_at: DateTime<Utc>,

    #[serde(with = "ts_seconds")]
    #[serde(rename = "updatedAt")]
    pub(crate) updated_at: DateTime<Utc>,
}

impl HolderCredential {
    pub fn new(name: String, connection: String, state: HolderState, state_blob: Vec<u8>) -> Self {
        Self {
            name,
            connection,
            state,
            state_blob,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    pub fn advance(&mut self, state: HolderState, state_blob: Vec<u8>) -> &mut Self {
        self.state = state;
        self.state_blob = state_blob;
        self.updated_at = Utc::now();
        self
    }
}

impl ToJSON for HolderCredential {
    fn to_json(&self) -> Result<String, BaseError> {
        let json_str =
            serde_json::to_string(&self).map_err(|err| BaseError::ToJSONError(err.to_string()))?;

        Ok(json_str)
    }
}

impl TryInto<Vec<u8>> for HolderCredential {
    type Error = IssuanceError;

    fn try_into(self) -> Result<Vec<u8>, Self::Error> {
        let json =
            serde_json::to_vec(&self).map_err(|err| IssuanceError::EntityError(err.to_string()))?;
        Ok(json)
    }
}

impl TryFrom<Vec<u8>> for HolderCredential {
    type Error = IssuanceError;

    fn try_from(value: Vec<u8>) -> Result<Self, Self::Error> {
        let credential: HolderCredential = serde_json::from_slice(&value)
            .map_err(|err| IssuanceError::EntityError(err.to_string()))?;
        Ok(credential)
    }
}

impl HolderEntityAccessor for HolderCredential {
    fn get_name(&self) -> String {
        self.name.to_owned()
    }

    fn get_connection(&self) -> String {
        self.connection.to_owned()
    }

    fn get_state(&self) -> HolderState {
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entity_round_trip_preserves_state() {
        let credential = HolderCredential::new(
            "degree".to_string(),
            "alice-to-faber".to_string(),
            HolderState::RequestSent,
            vec![9],
        );

        let blob: Vec<u8> = credential.clone().try_into().unwrap();
        let restored = HolderCredential::try_from(blob).unwrap();
        assert_eq!(restored, credential);
        assert_eq!(restored.get_state(), HolderState::RequestSent);
    }
}
