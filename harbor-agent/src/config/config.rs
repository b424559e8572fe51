use rst_common::standard::serde::{self, Deserialize};

use crate::common::types::{CommonError, ToValidate};

use super::{App, Database};

/// `Config` is the root of the agent's TOML configuration: the `[app]`
/// section naming the agent and its tails directory, and the `[database]`
/// section describing the RocksDB record store.
#[derive(Deserialize, Debug, Clone, Default)]
#[serde(crate = "self::serde")]
pub struct Config {
    pub(super) app: App,
    pub(super) database: Database,
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn app(&self) -> &App {
        &self.app
    }

    pub fn db(&self) -> &Database {
        &self.database
    }
}

impl ToValidate for Config {
    /// The agent identity is checked before the storage sections, so a
    /// config missing its `[app]` block fails on the agent name first.
    fn validate(&self) -> Result<(), CommonError> {
        self.app.validate()?;
        self.database.validate()?;

        Ok(())
    }
}
