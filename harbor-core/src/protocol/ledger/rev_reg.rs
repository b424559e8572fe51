use rst_common::standard::chrono::serde::ts_seconds;
use rst_common::standard::chrono::{DateTime, Utc};
use rst_common::standard::serde::{self, Deserialize, Serialize};
use rst_common::standard::serde_json;

use rstdev_domain::entity::ToJSON;
use rstdev_domain::BaseError;

use super::types::{LedgerError, RevocationRegistryEntityAccessor};

/// `RevocationRegistry` is the persisted record of one published revocation
/// registry, including where its tails data lives.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(crate = "self::serde")]
pub struct RevocationRegistry {
    pub(crate) name: String,

    #[serde(rename = "credDefId")]
    pub(crate) cred_def_id: String,

    #[serde(rename = "revRegId")]
    pub(crate) rev_reg_id: String,

    #[serde(rename = "tailsLocation")]
    pub(crate) tails_location: String,

    #[serde(rename = "stateBlob")]
    pub(crate) state_blob: Vec<u8>,

    #[serde(with = "ts_seconds")]
    #[serde(rename = "createdAt")]
    pub(crate) created_at: DateTime<Utc>,
}

impl RevocationRegistry {
    pub fn new(
        name: String,
        cred_def_id: String,
        rev_reg_id: String,
        tails_location: String,
        state_blob: Vec<u8>,
    ) -> Self {
        Self {
            name,
            cred_def_id,
            rev_reg_id,
            tails_location,
            state_blob,
            created_at: Utc::now(),
        }
    }
}

impl ToJSON for RevocationRegistry {
    fn to_json(&self) -> Result<String, BaseError> {
        let json_str =
            serde_json::to_string(&self).map_err(|err| BaseError::ToJSONError(err.to_string()))?;

        Ok(json_str)
    }
}

impl TryInto<Vec<u8>> for RevocationRegistry {
    type Error = LedgerError;

    fn try_into(self) -> Result<Vec<u8>, Self::Error> {
        let json =
            serde_json::to_vec(&self).map_err(|err| LedgerError::EntityError(err.to_string()))?;
        Ok(json)
    }
}

impl TryFrom<Vec<u8>> for RevocationRegistry {
    type Error = LedgerError;

    fn try_from(value: Vec<u8>) -> Result<Self, Self::Error> {
        let rev_reg: RevocationRegistry = serde_json::from_slice(&value)
            .map_err(|err| LedgerError::EntityError(err.to_string()))?;
        Ok(rev_reg)
    }
}

impl RevocationRegistryEntityAccessor for RevocationRegistry {
    fn get_name(&self) -> String {
        self.name.to_owned()
    }

    fn get_cred_def_id(&self) -> String {
        self.cred_def_id.to_owned()
    }

    fn get_rev_reg_id(&self) -> String {
        self.rev_reg_id.to_owned()
    }

    fn get_tails_location(&self) -> String {
        self.tails_location.to_owned()
    }

    fn get_state_blob(&self) -> Vec<u8> {
        self.state_blob.to_owned()
    }

    fn get_created_at(&self) -> DateTime<Utc> {
        self.created_at.to_owned()
    }
}
