use rst_common::standard::serde::{self, Deserialize, Serialize};
use rst_common::standard::serde_json;

use rstdev_domain::entity::ToJSON;
use rstdev_domain::BaseError;

use super::types::DbError;

/// Ordered, duplicate-free list of record names for one kind and agent.
///
/// Names keep the order their first save was merged in, which gives the
/// listing operations their insertion-order guarantee.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(crate = "self::serde")]
pub struct NameIndex {
    names: Vec<String>,
}

impl NameIndex {
    pub fn new() -> Self {
        Self { names: Vec::new() }
    }

    pub fn add(&mut self, name: String) {
        if !self.names.contains(&name) {
            self.names.push(name)
        }
    }

    pub fn names(&self) -> Vec<String> {
        self.names.to_owned()
    }
}

impl TryInto<Vec<u8>> for NameIndex {
    type Error = DbError;

    fn try_into(self) -> Result<Vec<u8>, Self::Error> {
        let json = serde_json::to_vec(&self).map_err(|err| DbError::IndexError(err.to_string()))?;

        Ok(json)
    }
}

impl TryFrom<Vec<u8>> for NameIndex {
    type Error = DbError;

    fn try_from(value: Vec<u8>) -> Result<Self, Self::Error> {
        let index: Self =
            serde_json::from_slice(&value).map_err(|err| DbError::IndexError(err.to_string()))?;
        Ok(index)
    }
}

impl ToJSON for NameIndex {
    fn to_json(&self) -> Result<String, BaseError> {
        let json_str =
            serde_json::to_string(&self).map_err(|err| BaseError::ToJSONError(err.to_string()))?;

        Ok(json_str)
    }
}
