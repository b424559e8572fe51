use std::time::Duration;

use rst_common::standard::async_trait::async_trait;
use rst_common::standard::serde_json::Value;
use rst_common::with_logging::log::info;
use rst_common::with_tokio::tokio;

use crate::matcher::select_credentials_for_proof;
use crate::protocol::connection::types::ConnectionEntityAccessor;
use crate::protocol::connection::Connection;
use crate::protocol::engine::RuntimeBuilder;
use crate::storage::{RecordKind, RecordStoreBuilder};

use super::disclosed::DisclosedProof;
use super::proof::Proof;
use super::types::{
    DisclosedProofEntityAccessor, PresentationError, ProofEntityAccessor, ProverAPI,
    ProverActorBuilder, ProverEngineBuilder, ProverState, VerifierAPI, VerifierActorBuilder,
    VerifierEngineBuilder, VerifierState,
};

async fn load_connection_blob<TRepo>(
    repo: &TRepo,
    name: &str,
) -> Result<Vec<u8>, PresentationError>
where
    TRepo: RecordStoreBuilder + Sync,
{
    let blob = repo.load(RecordKind::Connection, name).await?;
    let connection =
        Connection::try_from(blob).map_err(|err| PresentationError::EntityError(err.to_string()))?;
    Ok(connection.get_state_blob())
}

/// `VerifierUsecase` is the base logic implementation for the [`VerifierAPI`]
///
/// This object depends on the implementations of [`VerifierEngineBuilder`],
/// [`RuntimeBuilder`] and [`RecordStoreBuilder`]
#[derive(Clone)]
pub struct VerifierUsecase<TEngine, TRuntime, TRepo>
where
    TEngine: VerifierEngineBuilder,
    TRuntime: RuntimeBuilder,
    TRepo: RecordStoreBuilder + Clone + Send + Sync,
{
    engine: TEngine,
    runtime: TRuntime,
    repo: TRepo,
}

impl<TEngine, TRuntime, TRepo> VerifierUsecase<TEngine, TRuntime, TRepo>
where
    TEngine: VerifierEngineBuilder,
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

    async fn load_proof(&self, name: &str) -> Result<Proof, PresentationError> {
        let blob = self.repo.load(RecordKind::Proof, name).await?;
        Proof::try_from(blob)
    }

    async fn persist(&self, proof: &Proof) -> Result<(), PresentationError> {
        let blob: Vec<u8> = proof.clone().try_into()?;
        self.repo
            .save(RecordKind::Proof, &proof.get_name(), blob)
            .await?;
        Ok(())
    }
}

#[async_trait]
impl<TEngine, TRuntime, TRepo> VerifierAPI for VerifierUsecase<TEngine, TRuntime, TRepo>
where
    TEngine: VerifierEngineBuilder + Send + Sync,
    TRuntime: RuntimeBuilder + Send + Sync,
    TRepo: RecordStoreBuilder + Clone + Send + Sync,
{
    type EntityAccessor = Proof;

    async fn create_proof_request(
        &self,
        name: &str,
        connection: &str,
        request: Value,
    ) -> Result<VerifierState, PresentationError> {
        info!("sending proof request {} over {}", name, connection);

        let connection_blob = load_connection_blob(&self.repo, connection).await?;

        let _runtime = self.runtime.acquire()?;
        let mut actor = self.engine.start_request(name, request).await?;

        let step = actor.send_request(connection_blob).await;
        let proof = Proof::new(
            name.to_string(),
            connection.to_string(),
            actor.state(),
            actor.snapshot()?,
        );
        self.persist(&proof).await?;

        Ok(step?)
    }

    async fn proof_update(
        &self,
        name: &str,
        connection: &str,
        expected: VerifierState,
    ) -> Result<VerifierState, PresentationError> {
        let mut proof = self.load_proof(name).await?;
        let connection_blob = load_connection_blob(&self.repo, connection).await?;

        let _runtime = self.runtime.acquire()?;
        let mut actor = self.engine.restore(proof.get_state_blob())?;

        let step = actor.poll_next(connection_blob).await;
        proof.advance(actor.state(), actor.snapshot()?);
        self.persist(&proof).await?;

        let actual = step?;
        if actual != expected {
            return Err(PresentationError::UnexpectedVerifierState { expected, actual });
        }

        Ok(actual)
    }

    async fn get_proof(&self, name: &str) -> Result<Self::EntityAccessor, PresentationError> {
        self.load_proof(name).await
    }

    async fn list_proofs(&self) -> Result<Vec<String>, PresentationError> {
        let names = self.repo.list_names(RecordKind::Proof).await?;
        Ok(names)
    }
}

/// `ProverUsecase` is the base logic implementation for the [`ProverAPI`]
///
/// This object depends on the implementations of [`ProverEngineBuilder`],
/// [`RuntimeBuilder`] and [`RecordStoreBuilder`]. The tails directory is
/// fixed at construction and referenced by every selected credential.
#[derive(Clone)]
pub struct ProverUsecase<TEngine, TRuntime, TRepo>
where
    TEngine: ProverEngineBuilder,
    TRuntime: RuntimeBuilder,
    TRepo: RecordStoreBuilder + Clone + Send + Sync,
{
    engine: TEngine,
    runtime: TRuntime,
    repo: TRepo,
    tails_dir: String,
}

impl<TEngine, TRuntime, TRepo> ProverUsecase<TEngine, TRuntime, TRepo>
where
    TEngine: ProverEngineBuilder,
    TRuntime: RuntimeBuilder,
    TRepo: RecordStoreBuilder + Clone + Send + Sync,
{
    pub fn new(engine: TEngine, runtime: TRuntime, repo: TRepo, tails_dir: String) -> Self {
        Self {
            engine,
            runtime,
            repo,
            tails_dir,
        }
    }

    async fn load_proof(&self, name: &str) -> Result<DisclosedProof, PresentationError> {
        let blob = self.repo.load(RecordKind::DisclosedProof, name).await?;
        DisclosedProof::try_from(blob)
    }

    async fn persist(&self, proof: &DisclosedProof) -> Result<(), PresentationError> {
        let blob: Vec<u8> = proof.clone().try_into()?;
        self.repo
            .save(RecordKind::DisclosedProof, &proof.get_name(), blob)
            .await?;
        Ok(())
    }
}

#[async_trait]
impl<TEngine, TRuntime, TRepo> ProverAPI for ProverUsecase<TEngine, TRuntime, TRepo>
where
    TEngine: ProverEngineBuilder + Send + Sync,
    TRuntime: RuntimeBuilder + Send + Sync,
    TRepo: RecordStoreBuilder + Clone + Send + Sync,
{
    type EntityAccessor = DisclosedProof;

    async fn fetch_requests(&self, connection: &str) -> Result<Vec<Value>, PresentationError> {
        let connection_blob = load_connection_blob(&self.repo, connection).await?;

        let _runtime = self.runtime.acquire()?;
        let requests = self.engine.fetch_requests(connection_blob).await?;
        Ok(requests)
    }

    async fn wait_for_request(
        &self,
        connection: &str,
        attempts: u32,
        delay: Duration,
    ) -> Result<Value, PresentationError> {
        for attempt in 1..=attempts {
            let requests = self.fetch_requests(connection).await?;
            if let Some(request) = requests.into_iter().next() {
                return Ok(request);
            }

            info!(
                "no proof request on {}, attempt {}/{}",
                connection, attempt, attempts
            );
            if attempt < attempts {
                tokio::time::sleep(delay).await;
            }
        }

        Err(PresentationError::PollExhausted(format!(
            "no proof request on {} after {} attempts",
            connection, attempts
        )))
    }

    async fn send_disclosed_proof(
        &self,
        name: &str,
        connection: &str,
        request: Value,
        self_attested: Value,
    ) -> Result<ProverState, PresentationError> {
        info!("answering proof request {} over {}", name, connection);

        let connection_blob = load_connection_blob(&self.repo, connection).await?;

        let _runtime = self.runtime.acquire()?;
        let mut actor = self.engine.start_from_request(name, request).await?;

        let resolved = actor.resolve_candidates().await?;
        let selected = select_credentials_for_proof(&resolved, &self.tails_dir)?;
        actor.build_presentation(selected, self_attested).await?;

        let step = actor.send_presentation(connection_blob).await;
        let proof = DisclosedProof::new(
            name.to_string(),
            connection.to_string(),
            actor.state(),
            actor.snapshot()?,
        );
        self.persist(&proof).await?;

        Ok(step?)
    }

    async fn proof_update(
        &self,
        name: &str,
        connection: &str,
        expected: ProverState,
    ) -> Result<ProverState, PresentationError> {
        let mut proof = self.load_proof(name).await?;
        let connection_blob = load_connection_blob(&self.repo, connection).await?;

        let _runtime = self.runtime.acquire()?;
        let mut actor = self.engine.restore(proof.get_state_blob())?;

        let step = actor.poll_next(connection_blob).await;
        proof.advance(actor.state(), actor.snapshot()?);
        self.persist(&proof).await?;

        let actual = step?;
        if actual != expected {
            return Err(PresentationError::UnexpectedProverState { expected, actual });
        }

        Ok(actual)
    }

    async fn get_proof(&self, name: &str) -> Result<Self::EntityAccessor, PresentationError> {
        self.load_proof(name).await
    }

    async fn list_proofs(&self) -> Result<Vec<String>, PresentationError> {
        let names = self.repo.list_names(RecordKind::DisclosedProof).await?;
        Ok(names)
    }
}
