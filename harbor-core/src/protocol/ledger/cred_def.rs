use rst_common::standard::chrono::serde::ts_seconds;
use rst_common::standard::chrono::{DateTime, Utc};
use rst_common::standard::serde::{self, Deserialize, Serialize};
use rst_common::standard::serde_json;

use rstdev_domain::entity::ToJSON;
use rstdev_domain::BaseError;

use super::types::{CredentialDefinitionEntityAccessor, LedgerError};

/// `CredentialDefinition` is the persisted record of one published credential
/// definition and the schema it was derived from.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(crate = "self::serde")]
pub struct CredentialDefinition {
    pub(crate) name: String,

    #[serde(rename = "schemaId")]
    pub(crate) schema_id: String,

    #[serde(rename = "credDefId")]
    pub(crate) cred_def_id: String,

    #[serde(rename = "stateBlob")]
    pub(crate) state_blob: Vec<u8>,

    #[serde(with = "ts_seconds")]
    #[serde(rename = "createdAt")]
    pub(crate) created_at: DateTime<Utc>,
}

impl CredentialDefinition {
    pub fn new(name: String, schema_id: String, cred_def_id: String, state_blob: Vec<u8>) -> Self {
        Self {
            name,
            schema_id,
            cred_def_id,
            state_blob,
            created_at: Utc::now(),
        }
    }
}

impl ToJSON for CredentialDefinition {
    fn to_json(&self) -> Result<String, BaseError> {
        let json_str =
            serde_json::to_string(&self).map_err(|err| BaseError::ToJSONError(err.to_string()))?;

        Ok(json_str)
    }
}

impl TryInto<Vec<u8>> for CredentialDefinition {
    type Error = LedgerError;

    fn try_into(self) -> Result<Vec<u8>, Self::Error> {
        let json =
            serde_json::to_vec(&self).map_err(|err| LedgerError::EntityError(err.to_string()))?;
        Ok(json)
    }
}

impl TryFrom<Vec<u8>> for CredentialDefinition {
    type Error = LedgerError;

    fn try_from(value: Vec<u8>) -> Result<Self, Self::Error> {
        let cred_def: CredentialDefinition = serde_json::from_slice(&value)
            .map_err(|err| LedgerError::EntityError(err.to_string()))?;
        Ok(cred_def)
    }
}

impl CredentialDefinitionEntityAccessor for CredentialDefinition {
    fn get_name(&self) -> String {
        self.name.to_owned()
    }

    fn get_schema_id(&self) -> String {
        self.schema_id.to_owned()
    }

    fn get_cred_def_id(&self) -> String {
        self.cred_def_id.to_owned()
    }

    fn get_state_blob(&self) -> Vec<u8> {
        self.state_blob.to_owned()
    }

    fn get_created_at(&self) -> DateTime<Utc> {
        self.created_at.to_owned()
    }
}
