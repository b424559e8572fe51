use rst_common::standard::chrono::serde::ts_seconds;
use rst_common::standard::chrono::{DateTime, Utc};
use rst_common::standard::serde::{self, Deserialize, Serialize};
use rst_common::standard::serde_json;

use rstdev_domain::entity::ToJSON;
use rstdev_domain::BaseError;

use super::types::{LedgerError, SchemaEntityAccessor};

/// `Schema` is the persisted record of one published schema.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(crate = "self::serde")]
pub struct Schema {
    pub(crate) name: String,

    #[serde(rename = "schemaId")]
    pub(crate) schema_id: String,

    #[serde(rename = "stateBlob")]
    pub(crate) state_blob: Vec<u8>,

    #[serde(with = "ts_seconds")]
    #[serde(rename = "createdAt")]
    pub(crate) created_at: DateTime<Utc>,
}

impl Schema {
    pub fn new(name: String, schema_id: String, state_blob: Vec<u8>) -> Self {
        Self {
            name,
            schema_id,
            state_blob,
            created_at: Utc::now(),
        }
    }
}

impl ToJSON for Schema {
    fn to_json(&self) -> Result<String, BaseError> {
        let json_str =
            serde_json::to_string(&self).map_err(|err| BaseError::ToJSONError(err.to_string()))?;

        Ok(json_str)
    }
}

impl TryInto<Vec<u8>> for Schema {
    type Error = LedgerError;

    fn try_into(self) -> Result<Vec<u8>, Self::Error> {
        let json =
            serde_json::to_vec(&self).map_err(|err| LedgerError::EntityError(err.to_string()))?;
        Ok(json)
    }
}

impl TryFrom<Vec<u8>> for Schema {
    type Error = LedgerError;

    fn try_from(value: Vec<u8>) -> Result<Self, Self::Error> {
        let schema: Schema = serde_json::from_slice(&value)
            .map_err(|err| LedgerError::EntityError(err.to_string()))?;
        Ok(schema)
    }
}

impl SchemaEntityAccessor for Schema {
    fn get_name(&self) -> String {
        self.name.to_owned()
    }

    fn get_schema_id(&self) -> String {
        self.schema_id.to_owned()
    }

    fn get_state_blob(&self) -> Vec<u8> {
        self.state_blob.to_owned()
    }

    fn get_created_at(&self) -> DateTime<Utc> {
        self.created_at.to_owned()
    }
}
