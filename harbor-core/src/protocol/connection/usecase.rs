use rst_common::standard::async_trait::async_trait;
use rst_common::with_logging::log::info;

use crate::protocol::engine::RuntimeBuilder;
use crate::storage::{RecordKind, RecordStoreBuilder};

use super::connection::Connection;
use super::types::{
    ConnectionAPI, ConnectionActorBuilder, ConnectionEngineBuilder, ConnectionEntityAccessor,
    ConnectionError, ConnectionRole, ConnectionState,
};

/// `Usecase` is the base logic implementation for the [`ConnectionAPI`]
///
/// This object depends on the implementations of [`ConnectionEngineBuilder`],
/// [`RuntimeBuilder`] and [`RecordStoreBuilder`]
#[derive(Clone)]
pub struct Usecase<TEngine, TRuntime, TRepo>
where
    TEngine: ConnectionEngineBuilder,
    TRuntime: RuntimeBuilder,
    TRepo: RecordStoreBuilder + Clone + Send + Sync,
{
    engine: TEngine,
    runtime: TRuntime,
    repo: TRepo,
}

impl<TEngine, TRuntime, TRepo> Usecase<TEngine, TRuntime, TRepo>
where
    TEngine: ConnectionEngineBuilder,
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

    async fn load_connection(&self, name: &str) -> Result<Connection, ConnectionError> {
        let blob = self.repo.load(RecordKind::Connection, name).await?;
        Connection::try_from(blob)
    }

    async fn persist(&self, connection: &Connection) -> Result<(), ConnectionError> {
        let blob: Vec<u8> = connection.clone().try_into()?;
        self.repo
            .save(RecordKind::Connection, &connection.get_name(), blob)
            .await?;
        Ok(())
    }
}

#[async_trait]
impl<TEngine, TRuntime, TRepo> ConnectionAPI for Usecase<TEngine, TRuntime, TRepo>
where
    TEngine: ConnectionEngineBuilder + Send + Sync,
    TRuntime: RuntimeBuilder + Send + Sync,
    TRepo: RecordStoreBuilder + Clone + Send + Sync,
{
    type EntityAccessor = Connection;

    async fn create_invite(&self, name: &str) -> Result<String, ConnectionError> {
        info!("creating connection invite: {}", name);

        let _runtime = self.runtime.acquire()?;
        let actor = self.engine.start_invite(name).await?;
        let invitation = actor.invitation()?;

        let connection = Connection::new(
            name.to_string(),
            ConnectionRole::Inviter,
            actor.pairwise_did()?,
            actor.state(),
            actor.snapshot()?,
        );
        self.persist(&connection).await?;

        Ok(invitation)
    }

    async fn accept_invite(
        &self,
        name: &str,
        invite: &str,
    ) -> Result<ConnectionState, ConnectionError> {
        info!("accepting connection invite: {}", name);

        let _runtime = self.runtime.acquire()?;
        let actor = self.engine.start_from_invite(name, invite).await?;

        let connection = Connection::new(
            name.to_string(),
            ConnectionRole::Invitee,
            actor.pairwise_did()?,
            actor.state(),
            actor.snapshot()?,
        );
        self.persist(&connection).await?;

        Ok(connection.get_state())
    }

    async fn update_connection(
        &self,
        name: &str,
        expected: ConnectionState,
    ) -> Result<ConnectionState, ConnectionError> {
        let mut connection = self.load_connection(name).await?;

        let _runtime = self.runtime.acquire()?;
        let mut actor = self.engine.restore(connection.get_state_blob())?;

        // Whatever the step reports is persisted before the result is
        // inspected, so partial progress survives a failed step.
        let step = actor.poll_next().await;
        connection.advance(actor.state(), actor.snapshot()?);
        self.persist(&connection).await?;

        let actual = step?;
        if actual != expected {
            return Err(ConnectionError::UnexpectedState { expected, actual });
        }

        Ok(actual)
    }

    async fn get_connection(&self, name: &str) -> Result<Self::EntityAccessor, ConnectionError> {
        self.load_connection(name).await
    }

    async fn list_connections(&self) -> Result<Vec<String>, ConnectionError> {
        let names = self.repo.list_names(RecordKind::Connection).await?;
        Ok(names)
    }

    async fn pairwise_did(&self, name: &str) -> Result<String, ConnectionError> {
        let connection = self.load_connection(name).await?;
        Ok(connection.get_pairwise_did())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use rst_common::standard::serde::{self, Deserialize, Serialize};
    use rst_common::standard::serde_json;
    use rst_common::with_tokio::tokio;

    use crate::protocol::engine::EngineError;
    use crate::storage::StorageError;
    use crate::testkit::{MemoryStore, NoopRuntime};

    /// Scripted actor walking the role's documented state sequence one hop
    /// per poll.
    #[derive(Serialize, Deserialize, Clone, Debug)]
    #[serde(crate = "self::serde")]
    struct FakeActor {
        role: ConnectionRole,
        state: ConnectionState,
        did: String,
        fail_poll: bool,
    }

    impl FakeActor {
        fn next_state(&self) -> ConnectionState {
            match (self.role, self.state) {
                (ConnectionRole::Inviter, ConnectionState::OfferSent) => {
                    ConnectionState::RequestReceived
                }
                (_, ConnectionState::RequestReceived) => ConnectionState::Accepted,
                (_, state) => state,
            }
        }
    }

    #[async_trait]
    impl ConnectionActorBuilder for FakeActor {
        fn snapshot(&self) -> Result<Vec<u8>, EngineError> {
            serde_json::to_vec(self).map_err(|err| EngineError::SerializeError(err.to_string()))
        }

        fn state(&self) -> ConnectionState {
            self.state
        }

        fn invitation(&self) -> Result<String, EngineError> {
            Ok(format!("invitation-for-{}", self.did))
        }

        fn pairwise_did(&self) -> Result<String, EngineError> {
            Ok(self.did.to_owned())
        }

        async fn poll_next(&mut self) -> Result<ConnectionState, EngineError> {
            self.state = self.next_state();
            if self.fail_poll {
                return Err(EngineError::StepError("transport down".to_string()));
            }

            Ok(self.state)
        }
    }

    #[derive(Clone, Default)]
    struct FakeEngine {
        fail_poll: bool,
    }

    #[async_trait]
    impl ConnectionEngineBuilder for FakeEngine {
        type Actor = FakeActor;

        async fn start_invite(&self, source_id: &str) -> Result<FakeActor, EngineError> {
            Ok(FakeActor {
                role: ConnectionRole::Inviter,
                state: ConnectionState::OfferSent,
                did: format!("pw-did-{}", source_id),
                fail_poll: self.fail_poll,
            })
        }

        async fn start_from_invite(
            &self,
            source_id: &str,
            _invite: &str,
        ) -> Result<FakeActor, EngineError> {
            Ok(FakeActor {
                role: ConnectionRole::Invitee,
                state: ConnectionState::RequestReceived,
                did: format!("pw-did-{}", source_id),
                fail_poll: self.fail_poll,
            })
        }

        fn restore(&self, blob: Vec<u8>) -> Result<FakeActor, EngineError> {
            let mut actor: FakeActor = serde_json::from_slice(&blob)
                .map_err(|err| EngineError::UnserializeError(err.to_string()))?;
            actor.fail_poll = self.fail_poll;
            Ok(actor)
        }
    }

    fn build_usecase(
        engine: FakeEngine,
        repo: MemoryStore,
    ) -> Usecase<FakeEngine, NoopRuntime, MemoryStore> {
        Usecase::new(engine, NoopRuntime, repo)
    }

    #[tokio::test]
    async fn test_invite_exchange_walks_both_state_machines() {
        let inviter = build_usecase(FakeEngine::default(), MemoryStore::new());
        let invitee = build_usecase(FakeEngine::default(), MemoryStore::new());

        let invitation = inviter.create_invite("faber-to-alice").await.unwrap();
        assert_eq!(
            inviter
                .get_connection("faber-to-alice")
                .await
                .unwrap()
                .get_state(),
            ConnectionState::OfferSent
        );

        let accepted = invitee
            .accept_invite("alice-to-faber", &invitation)
            .await
            .unwrap();
        assert_eq!(accepted, ConnectionState::RequestReceived);

        let state = inviter
            .update_connection("faber-to-alice", ConnectionState::RequestReceived)
            .await
            .unwrap();
        assert_eq!(state, ConnectionState::RequestReceived);

        let state = invitee
            .update_connection("alice-to-faber", ConnectionState::Accepted)
            .await
            .unwrap();
        assert_eq!(state, ConnectionState::Accepted);

        let state = inviter
            .update_connection("faber-to-alice", ConnectionState::Accepted)
            .await
            .unwrap();
        assert_eq!(state, ConnectionState::Accepted);

        assert_eq!(
            inviter.list_connections().await.unwrap(),
            vec!["faber-to-alice".to_string()]
        );
        assert_eq!(
            invitee.pairwise_did("alice-to-faber").await.unwrap(),
            "pw-did-alice-to-faber"
        );
    }

    #[tokio::test]
    async fn test_state_mismatch_fails_and_still_persists() {
        let inviter = build_usecase(FakeEngine::default(), MemoryStore::new());
        inviter.create_invite("faber-to-alice").await.unwrap();

        let updated = inviter
            .update_connection("faber-to-alice", ConnectionState::Accepted)
            .await;
        assert_eq!(
            updated.unwrap_err(),
            ConnectionError::UnexpectedState {
                expected: ConnectionState::Accepted,
                actual: ConnectionState::RequestReceived,
            }
        );

        // The entity advanced even though the expectation failed.
        let connection = inviter.get_connection("faber-to-alice").await.unwrap();
        assert_eq!(connection.get_state(), ConnectionState::RequestReceived);
    }

    #[tokio::test]
    async fn test_failed_step_persists_reported_state() {
        let repo = MemoryStore::new();
        let healthy = build_usecase(FakeEngine::default(), repo.clone());
        healthy.create_invite("faber-to-alice").await.unwrap();

        let failing = build_usecase(FakeEngine { fail_poll: true }, repo);
        let updated = failing
            .update_connection("faber-to-alice", ConnectionState::RequestReceived)
            .await;
        assert_eq!(
            updated.unwrap_err(),
            ConnectionError::EngineError(EngineError::StepError("transport down".to_string()))
        );

        let connection = failing.get_connection("faber-to-alice").await.unwrap();
        assert_eq!(connection.get_state(), ConnectionState::RequestReceived);
    }

    #[tokio::test]
    async fn test_update_absent_connection_is_not_found() {
        let usecase = build_usecase(FakeEngine::default(), MemoryStore::new());
        let updated = usecase
            .update_connection("missing", ConnectionState::Accepted)
            .await;

        assert_eq!(
            updated.unwrap_err(),
            ConnectionError::StorageError(StorageError::NotFound {
                kind: RecordKind::Connection,
                name: "missing".to_string(),
            })
        );
    }
}
