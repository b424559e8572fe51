use rst_common::standard::serde_json;
use rst_common::with_logging::log::info;

use harbor_agent::common::helpers;
use harbor_agent::{ConfigManager, DbBuilder, Repository};
use harbor_core::protocol::provision::types::PROVISION_KEY;
use harbor_core::storage::{RecordKind, RecordStoreBuilder};

use crate::errors::HarborError;

fn parse_kind(kind: &str) -> Result<RecordKind, HarborError> {
    match kind {
        "agent-provision" => Ok(RecordKind::AgentProvision),
        "connection" => Ok(RecordKind::Connection),
        "schema" => Ok(RecordKind::Schema),
        "credential-definition" => Ok(RecordKind::CredentialDefinition),
        "revocation-registry" => Ok(RecordKind::RevocationRegistry),
        "issuer-credential" => Ok(RecordKind::IssuerCredential),
        "holder-credential" => Ok(RecordKind::HolderCredential),
        "proof" => Ok(RecordKind::Proof),
        "disclosed-proof" => Ok(RecordKind::DisclosedProof),
        other => Err(HarborError::UsageError(format!(
            "unknown record kind: {}",
            other
        ))),
    }
}

/// `Store` opens the agent's record store from a TOML config file and
/// exposes the inspection commands the daemon CLI dispatches to.
pub struct Store {
    config: String,
}

impl Store {
    pub fn new(config: String) -> Store {
        Self { config }
    }

    fn repository(&self) -> Result<Repository, HarborError> {
        let config = ConfigManager::new(self.config.to_owned())
            .parse()
            .map_err(|err| HarborError::ConfigError(err.to_string()))?;

        helpers::validate(config.clone())
            .map_err(|err| HarborError::ConfigError(err.to_string()))?;

        let agent = config.app().get_name();
        info!("opening record store for agent {}", agent);

        let mut db_builder = DbBuilder::new(config);
        let runner = db_builder
            .build(|opts| {
                let opts_db_agent = opts.db().agent.clone();

                (opts_db_agent.get_common(), opts_db_agent.get_db_options())
            })
            .map_err(|err| HarborError::StoreError(err.to_string()))?;

        Ok(Repository::new(runner, agent))
    }

    pub async fn records(&self, kind: &str) -> Result<(), HarborError> {
        let kind = parse_kind(kind)?;
        let repo = self.repository()?;

        let names = repo
            .list_names(kind)
            .await
            .map_err(|err| HarborError::StoreError(err.to_string()))?;

        if names.is_empty() {
            println!("no {} records", kind);
            return Ok(());
        }

        for name in names {
            println!("{}", name);
        }

        Ok(())
    }

    pub async fn show(&self, kind: &str, name: &str) -> Result<(), HarborError> {
        let kind = parse_kind(kind)?;
        let repo = self.repository()?;

        let blob = repo
            .load(kind, name)
            .await
            .map_err(|err| HarborError::StoreError(err.to_string()))?;

        println!("{}", render_record(&blob)?);

        Ok(())
    }

    pub async fn provision(&self) -> Result<(), HarborError> {
        let repo = self.repository()?;

        let blob = repo
            .load(RecordKind::AgentProvision, PROVISION_KEY)
            .await
            .map_err(|err| HarborError::StoreError(err.to_string()))?;

        println!("{}", render_record(&blob)?);

        Ok(())
    }
}

fn render_record(blob: &[u8]) -> Result<String, HarborError> {
    let value: serde_json::Value =
        serde_json::from_slice(blob).map_err(|err| HarborError::StoreError(err.to_string()))?;

    serde_json::to_string_pretty(&value).map_err(|err| HarborError::StoreError(err.to_string()))
}
