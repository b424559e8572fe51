use std::time::Duration;

use rst_common::standard::async_trait::async_trait;
use rst_common::standard::serde_json::Value;
use rst_common::with_logging::log::info;
use rst_common::with_tokio::tokio;

use crate::matcher::types::OfferFilter;
use crate::matcher::{filter_offers_by_attr, filter_offers_by_schema};
use crate::protocol::connection::types::ConnectionEntityAccessor;
use crate::protocol::connection::Connection;
use crate::protocol::engine::RuntimeBuilder;
use crate::protocol::ledger::types::CredentialDefinitionEntityAccessor;
use crate::protocol::ledger::CredentialDefinition;
use crate::storage::{RecordKind, RecordStoreBuilder};

use super::holder::HolderCredential;
use super::issuer::IssuerCredential;
use super::types::{
    HolderAPI, HolderActorBuilder, HolderEngineBuilder, HolderEntityAccessor, HolderState,
    IssuanceError, IssuerAPI, IssuerActorBuilder, IssuerEngineBuilder, IssuerEntityAccessor,
    IssuerState,
};

async fn load_connection_blob<TRepo>(repo: &TRepo, name: &str) -> Result<Vec<u8>, IssuanceError>
where
    TRepo: RecordStoreBuilder + Sync,
{
    let blob = repo.load(RecordKind::Connection, name).await?;
    let connection =
        Connection::try_from(blob).map_err(|err| IssuanceError::EntityError(err.to_string()))?;
    Ok(connection.get_state_blob())
}

fn apply_filter(offers: Vec<Value>, filter: &OfferFilter) -> Result<Vec<Value>, IssuanceError> {
    let mut offers = offers;
    if let Some(schema) = filter.schema() {
        offers = filter_offers_by_schema(&offers, schema)?;
    }
    if let Some((name, value)) = filter.attr() {
        offers = filter_offers_by_attr(&offers, name, value)?;
    }

    Ok(offers)
}

/// `IssuerUsecase` is the base logic implementation for the [`IssuerAPI`]
///
/// This object depends on the implementations of [`IssuerEngineBuilder`],
/// [`RuntimeBuilder`] and [`RecordStoreBuilder`]
#[derive(Clone)]
pub struct IssuerUsecase<TEngine, TRuntime, TRepo>
where
    TEngine: IssuerEngineBuilder,
    TRuntime: RuntimeBuilder,
    TRepo: RecordStoreBuilder + Clone + Send + Sync,
{
    engine: TEngine,
    runtime: TRuntime,
    repo: TRepo,
}

impl<TEngine, TRuntime, TRepo> IssuerUsecase<TEngine, TRuntime, TRepo>
where
    TEngine: IssuerEngineBuilder,
    TRuntime: RuntimeBuilder,
    TRepo: RecordStoreBuilder + Clone + Send + Sync,
{
    pub fn new(engine: TEngine, runtime: TRuntime, repo: TRepo) -> Self {
        Self {
            engine,
            runtime,
            repo,
        }
    }

    async fn load_credential(&self, name: &str) -> Result<IssuerCredential, IssuanceError> {
        let blob = self.repo.load(RecordKind::IssuerCredential, name).await?;
        IssuerCredential::try_from(blob)
    }

    async fn persist(&self, credential: &IssuerCredential) -> Result<(), IssuanceError> {
        let blob: Vec<u8> = credential.clone().try_into()?;
        self.repo
            .save(RecordKind::IssuerCredential, &credential.get_name(), blob)
            .await?;
        Ok(())
    }
}

#[async_trait]
impl<TEngine, TRuntime, TRepo> IssuerAPI for IssuerUsecase<TEngine, TRuntime, TRepo>
where
    TEngine: IssuerEngineBuilder + Send + Sync,
    TRuntime: RuntimeBuilder + Send + Sync,
    TRepo: RecordStoreBuilder + Clone + Send + Sync,
{
    type EntityAccessor = IssuerCredential;

    async fn send_credential_offer(
        &self,
        name: &str,
        connection: &str,
        cred_def: &str,
        attributes: Value,
    ) -> Result<IssuerState, IssuanceError> {
        info!("sending credential offer {} over {}", name, connection);

        let connection_blob = load_connection_blob(&self.repo, connection).await?;
        let cred_def_record = self
            .repo
            .load(RecordKind::CredentialDefinition, cred_def)
            .await?;
        let cred_def = CredentialDefinition::try_from(cred_def_record)
            .map_err(|err| IssuanceError::EntityError(err.to_string()))?;

        let _runtime = self.runtime.acquire()?;
        let actor = self
            .engine
            .start_offer(name, cred_def.get_state_blob(), connection_blob, attributes)
            .await?;

        let credential = IssuerCredential::new(
            name.to_string(),
            connection.to_string(),
            actor.state(),
            actor.snapshot()?,
        );
        self.persist(&credential).await?;

        Ok(credential.get_state())
    }

    async fn send_credential(
        &self,
        name: &str,
        connection: &str,
    ) -> Result<IssuerState, IssuanceError> {
        info!("issuing credential {} over {}", name, connection);

        let mut credential = self.load_credential(name).await?;
        let connection_blob = load_connection_blob(&self.repo, connection).await?;

        let _runtime = self.runtime.acquire()?;
        let mut actor = self.engine.restore(credential.get_state_blob())?;

        let step = actor.send_credential(connection_blob).await;
        credential.advance(actor.state(), actor.snapshot()?);
        self.persist(&credential).await?;

        Ok(step?)
    }

    async fn credential_update(
        &self,
        name: &str,
        connection: &str,
        expected: IssuerState,
    ) -> Result<IssuerState, IssuanceError> {
        let mut credential = self.load_credential(name).await?;
        let connection_blob = load_connection_blob(&self.repo, connection).await?;

        let _runtime = self.runtime.acquire()?;
        let mut actor = self.engine.restore(credential.get_state_blob())?;

        let step = actor.poll_next(connection_blob).await;
        credential.advance(actor.state(), actor.snapshot()?);
        self.persist(&credential).await?;

        let actual = step?;
        if actual != expected {
            return Err(IssuanceError::UnexpectedIssuerState { expected, actual });
        }

        Ok(actual)
    }

    async fn get_credential(&self, name: &str) -> Result<Self::EntityAccessor, IssuanceError> {
        self.load_credential(name).await
    }

    async fn list_credentials(&self) -> Result<Vec<String>, IssuanceError> {
        let names = self.repo.list_names(RecordKind::IssuerCredential).await?;
        Ok(names)
    }
}

/// `HolderUsecase` is the base logic implementation for the [`HolderAPI`]
///
/// This object depends on the implementations of [`HolderEngineBuilder`],
/// [`RuntimeBuilder`] and [`RecordStoreBuilder`]
#[derive(Clone)]
pub struct HolderUsecase<TEngine, TRuntime, TRepo>
where
    TEngine: HolderEngineBuilder,
    TRuntime: RuntimeBuilder,
    TRepo: RecordStoreBuilder + Clone + Send + Sync,
{
    engine: TEngine,
    runtime: TRuntime,
    repo: TRepo,
}

impl<TEngine, TRuntime, TRepo> HolderUsecase<TEngine, TRuntime, TRepo>
where
    TEngine: HolderEngineBuilder,
    TRuntime: RuntimeBuilder,
    TRepo: RecordStoreBuilder + Clone + Send + Sync,
{
    pub fn new(engine: TEngine, runtime: TRuntime, repo: TRepo) -> Self {
        Self {
            engine,
            runtime,
            repo,
        }
    }

    async fn load_credential(&self, name: &str) -> Result<HolderCredential, IssuanceError> {
        let blob = self.repo.load(RecordKind::HolderCredential, name).await?;
        HolderCredential::try_from(blob)
    }

    async fn persist(&self, credential: &HolderCredential) -> Result<(), IssuanceError> {
        let blob: Vec<u8> = credential.clone().try_into()?;
        self.repo
            .save(RecordKind::HolderCredential, &credential.get_name(), blob)
            .await?;
        Ok(())
    }
}

#[async_trait]
impl<TEngine, TRuntime, TRepo> HolderAPI for HolderUsecase<TEngine, TRuntime, TRepo>
where
    TEngine: HolderEngineBuilder + Send + Sync,
    TRuntime: RuntimeBuilder + Send + Sync,
    TRepo: RecordStoreBuilder + Clone + Send + Sync,
{
    type EntityAccessor = HolderCredential;

    async fn fetch_offers(
        &self,
        connection: &str,
        filter: Option<OfferFilter>,
    ) -> Result<Vec<Value>, IssuanceError> {
        let connection_blob = load_connection_blob(&self.repo, connection).await?;

        let _runtime = self.runtime.acquire()?;
        let offers = self.engine.fetch_offers(connection_blob).await?;

        match filter {
            Some(filter) => apply_filter(offers, &filter),
            None => Ok(offers),
        }
    }

    async fn wait_for_offer(
        &self,
        connection: &str,
        filter: Option<OfferFilter>,
        attempts: u32,
        delay: Duration,
    ) -> Result<Value, IssuanceError> {
        for attempt in 1..=attempts {
            let offers = self.fetch_offers(connection, filter.clone()).await?;
            if let Some(offer) = offers.into_iter().next() {
                return Ok(offer);
            }

            info!(
                "no matching credential offer on {}, attempt {}/{}",
                connection, attempt, attempts
            );
            if attempt < attempts {
                tokio::time::sleep(delay).await;
            }
        }

        Err(IssuanceError::PollExhausted(format!(
            "no matching credential offer on {} after {} attempts",
            connection, attempts
        )))
    }

    async fn accept_credential_offer(
        &self,
        name: &str,
        connection: &str,
        offer: Value,
    ) -> Result<HolderState, IssuanceError> {
        info!("accepting credential offer {} over {}", name, connection);

        let connection_blob = load_connection_blob(&self.repo, connection).await?;

        let _runtime = self.runtime.acquire()?;
        let mut actor = self.engine.start_from_offer(name, offer).await?;

        let step = actor.send_request(connection_blob).await;
        let credential = HolderCredential::new(
            name.to_string(),
            connection.to_string(),
            actor.state(),
            actor.snapshot()?,
        );
        self.persist(&credential).await?;

        Ok(step?)
    }

    async fn credential_update(
        &self,
        name: &str,
        connection: &str,
        expected: HolderState,
    ) -> Result<HolderState, IssuanceError> {
        let mut credential = self.load_credential(name).await?;
        let connection_blob = load_connection_blob(&self.repo, connection).await?;

        let _runtime = self.runtime.acquire()?;
        let mut actor = self.engine.restore(credential.get_state_blob())?;

        let step = actor.poll_next(connection_blob).await;
        credential.advance(actor.state(), actor.snapshot()?);
        self.persist(&credential).await?;

        let actual = step?;
        if actual != expected {
            return Err(IssuanceError::UnexpectedHolderState { expected, actual });
        }

        Ok(actual)
    }

    async fn get_credential(&self, name: &str) -> Result<Self::EntityAccessor, IssuanceError> {
        self.load_credential(name).await
    }

    async fn list_credentials(&self) -> Result<Vec<String>, IssuanceError> {
        let names = self.repo.list_names(RecordKind::HolderCredential).await?;
        Ok(names)
    }
}
