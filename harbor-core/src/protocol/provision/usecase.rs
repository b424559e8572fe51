use rst_common::standard::async_trait::async_trait;
use rst_common::with_logging::log::info;

use crate::storage::{RecordKind, RecordStoreBuilder};

use super::provision::AgentProvision;
use super::types::{
    ProvisionAPI, ProvisionConfig, ProvisionEngineBuilder, ProvisionError, Provisioned,
    PROVISION_KEY,
};

/// `Usecase` is the base logic implementation for the [`ProvisionAPI`]
///
/// This object depends on the implementations of [`ProvisionEngineBuilder`]
/// and [`RecordStoreBuilder`]
#[derive(Clone)]
pub struct Usecase<TEngine, TRepo>
where
    TEngine: ProvisionEngineBuilder,
    TRepo: RecordStoreBuilder + Clone + Send + Sync,
{
    engine: TEngine,
    repo: TRepo,
}

impl<TEngine, TRepo> Usecase<TEngine, TRepo>
where
    TEngine: ProvisionEngineBuilder,
    TRepo: RecordStoreBuilder + Clone + Send + Sync,
{
    pub fn new(engine: TEngine, repo: TRepo) -> Self {
        Self { engine, repo }
    }
}

#[async_trait]
impl<TEngine, TRepo> ProvisionAPI for Usecase<TEngine, TRepo>
where
    TEngine: ProvisionEngineBuilder + Send + Sync,
    TRepo: RecordStoreBuilder + Clone + Send + Sync,
{
    type EntityAccessor = AgentProvision;

    async fn initialize(&self, config: ProvisionConfig) -> Result<Provisioned, ProvisionError> {
        let exists = self
            .repo
            .exists(RecordKind::AgentProvision, PROVISION_KEY)
            .await?;
        if exists {
            info!("agent {} is already provisioned", config.agent_name);

            let blob = self
                .repo
                .load(RecordKind::AgentProvision, PROVISION_KEY)
                .await?;
            let provision = AgentProvision::try_from(blob)?;
            return Ok(Provisioned::Existing(provision));
        }

        info!("provisioning agent {}", config.agent_name);
        let provision = self.engine.provision(config).await?;

        let blob: Vec<u8> = provision.clone().try_into()?;
        self.repo
            .save(RecordKind::AgentProvision, PROVISION_KEY, blob)
            .await?;

        Ok(Provisioned::Fresh(provision))
    }

    async fn get_provision(&self) -> Result<Self::EntityAccessor, ProvisionError> {
        let blob = self
            .repo
            .load(RecordKind::AgentProvision, PROVISION_KEY)
            .await?;
        AgentProvision::try_from(blob)
    }
}
