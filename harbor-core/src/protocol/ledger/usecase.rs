use rst_common::standard::async_trait::async_trait;
use rst_common::with_logging::log::info;

use crate::protocol::engine::RuntimeBuilder;
use crate::storage::{RecordKind, RecordStoreBuilder};

use super::cred_def::CredentialDefinition;
use super::rev_reg::RevocationRegistry;
use super::schema::Schema;
use super::types::{
    CredentialDefinitionActorBuilder, CredentialDefinitionEntityAccessor, LedgerAPI,
    LedgerEngineBuilder, LedgerError, RevocationDetails, RevocationRegistryActorBuilder,
    SchemaActorBuilder, SchemaData, SchemaEntityAccessor,
};

/// `Usecase` is the base logic implementation for the [`LedgerAPI`]
///
/// This object depends on the implementations of [`LedgerEngineBuilder`],
/// [`RuntimeBuilder`] and [`RecordStoreBuilder`]
#[derive(Clone)]
pub struct Usecase<TEngine, TRuntime, TRepo>
where
    TEngine: LedgerEngineBuilder,
    TRuntime: RuntimeBuilder,
    TRepo: RecordStoreBuilder + Clone + Send + Sync,
{
    engine: TEngine,
    runtime: TRuntime,
    repo: TRepo,
}

impl<TEngine, TRuntime, TRepo> Usecase<TEngine, TRuntime, TRepo>
where
    TEngine: LedgerEngineBuilder,
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
}

#[async_trait]
impl<TEngine, TRuntime, TRepo> LedgerAPI for Usecase<TEngine, TRuntime, TRepo>
where
    TEngine: LedgerEngineBuilder + Send + Sync,
    TRuntime: RuntimeBuilder + Send + Sync,
    TRepo: RecordStoreBuilder + Clone + Send + Sync,
{
    type SchemaEntityAccessor = Schema;
    type CredentialDefinitionEntityAccessor = CredentialDefinition;
    type RevocationRegistryEntityAccessor = RevocationRegistry;

    async fn create_schema(&self, name: &str, data: SchemaData) -> Result<String, LedgerError> {
        info!("publishing schema {} ({} v{})", name, data.name, data.version);

        let _runtime = self.runtime.acquire()?;
        let actor = self.engine.create_schema(name, data).await?;
        let schema_id = actor.schema_id()?;

        let schema = Schema::new(name.to_string(), schema_id.to_owned(), actor.snapshot()?);
        let blob: Vec<u8> = schema.try_into()?;
        self.repo.save(RecordKind::Schema, name, blob).await?;

        Ok(schema_id)
    }

    async fn create_credential_definition(
        &self,
        name: &str,
        schema: &str,
        revocation: RevocationDetails,
    ) -> Result<String, LedgerError> {
        info!("publishing credential definition {} for schema {}", name, schema);

        let schema_blob = self.repo.load(RecordKind::Schema, schema).await?;
        let schema = Schema::try_from(schema_blob)?;

        let _runtime = self.runtime.acquire()?;
        let actor = self
            .engine
            .create_credential_definition(name, &schema.get_schema_id(), revocation)
            .await?;
        let cred_def_id = actor.cred_def_id()?;

        let cred_def = CredentialDefinition::new(
            name.to_string(),
            schema.get_schema_id(),
            cred_def_id.to_owned(),
            actor.snapshot()?,
        );
        let blob: Vec<u8> = cred_def.try_into()?;
        self.repo
            .save(RecordKind::CredentialDefinition, name, blob)
            .await?;

        Ok(cred_def_id)
    }

    async fn create_revocation_registry(
        &self,
        name: &str,
        cred_def: &str,
        tails_dir: &str,
        max_creds: u32,
    ) -> Result<String, LedgerError> {
        info!("publishing revocation registry {} for {}", name, cred_def);

        let cred_def_blob = self
            .repo
            .load(RecordKind::CredentialDefinition, cred_def)
            .await?;
        let cred_def = CredentialDefinition::try_from(cred_def_blob)?;

        let _runtime = self.runtime.acquire()?;
        let actor = self
            .engine
            .create_revocation_registry(&cred_def.get_cred_def_id(), tails_dir, max_creds)
            .await?;
        let rev_reg_id = actor.rev_reg_id()?;

        let rev_reg = RevocationRegistry::new(
            name.to_string(),
            cred_def.get_cred_def_id(),
            rev_reg_id.to_owned(),
            actor.tails_location()?,
            actor.snapshot()?,
        );
        let blob: Vec<u8> = rev_reg.try_into()?;
        self.repo
            .save(RecordKind::RevocationRegistry, name, blob)
            .await?;

        Ok(rev_reg_id)
    }

    async fn get_schema(&self, name: &str) -> Result<Self::SchemaEntityAccessor, LedgerError> {
        let blob = self.repo.load(RecordKind::Schema, name).await?;
        Schema::try_from(blob)
    }

    async fn get_credential_definition(
        &self,
        name: &str,
    ) -> Result<Self::CredentialDefinitionEntityAccessor, LedgerError> {
        let blob = self
            .repo
            .load(RecordKind::CredentialDefinition, name)
            .await?;
        CredentialDefinition::try_from(blob)
    }

    async fn get_revocation_registry(
        &self,
        name: &str,
    ) -> Result<Self::RevocationRegistryEntityAccessor, LedgerError> {
        let blob = self.repo.load(RecordKind::RevocationRegistry, name).await?;
        RevocationRegistry::try_from(blob)
    }

    async fn list_schemas(&self) -> Result<Vec<String>, LedgerError> {
        let names = self.repo.list_names(RecordKind::Schema).await?;
        Ok(names)
    }

    async fn list_credential_definitions(&self) -> Result<Vec<String>, LedgerError> {
        let names = self.repo.list_names(RecordKind::CredentialDefinition).await?;
        Ok(names)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use rst_common::with_tokio::tokio;

    use crate::protocol::engine::EngineError;
    use crate::storage::StorageError;
    use crate::testkit::{MemoryStore, NoopRuntime};

    use super::super::types::RevocationRegistryEntityAccessor;

    struct FakeSchemaActor {
        schema_id: String,
    }

    impl SchemaActorBuilder for FakeSchemaActor {
        fn snapshot(&self) -> Result<Vec<u8>, EngineError> {
            Ok(self.schema_id.as_bytes().to_vec())
        }

        fn schema_id(&self) -> Result<String, EngineError> {
            Ok(self.schema_id.to_owned())
        }
    }

    struct FakeCredDefActor {
        cred_def_id: String,
    }

    impl CredentialDefinitionActorBuilder for FakeCredDefActor {
        fn snapshot(&self) -> Result<Vec<u8>, EngineError> {
            Ok(self.cred_def_id.as_bytes().to_vec())
        }

        fn cred_def_id(&self) -> Result<String, EngineError> {
            Ok(self.cred_def_id.to_owned())
        }
    }

    struct FakeRevRegActor {
        rev_reg_id: String,
        tails_location: String,
    }

    impl RevocationRegistryActorBuilder for FakeRevRegActor {
        fn snapshot(&self) -> Result<Vec<u8>, EngineError> {
            Ok(self.rev_reg_id.as_bytes().to_vec())
        }

        fn rev_reg_id(&self) -> Result<String, EngineError> {
            Ok(self.rev_reg_id.to_owned())
        }

        fn tails_location(&self) -> Result<String, EngineError> {
            Ok(self.tails_location.to_owned())
        }
    }

    #[derive(Clone, Default)]
    struct FakeLedgerEngine;

    #[async_trait]
    impl LedgerEngineBuilder for FakeLedgerEngine {
        type SchemaActor = FakeSchemaActor;
        type CredentialDefinitionActor = FakeCredDefActor;
        type RevocationRegistryActor = FakeRevRegActor;

        async fn create_schema(
            &self,
            _source_id: &str,
            data: SchemaData,
        ) -> Result<FakeSchemaActor, EngineError> {
            Ok(FakeSchemaActor {
                schema_id: format!("did:sov:abc:2:{}:{}", data.name, data.version),
            })
        }

        async fn create_credential_definition(
            &self,
            _source_id: &str,
            schema_id: &str,
            _revocation: RevocationDetails,
        ) -> Result<FakeCredDefActor, EngineError> {
            Ok(FakeCredDefActor {
                cred_def_id: format!("{}:cred-def", schema_id),
            })
        }

        async fn create_revocation_registry(
            &self,
            cred_def_id: &str,
            tails_dir: &str,
            _max_creds: u32,
        ) -> Result<FakeRevRegActor, EngineError> {
            Ok(FakeRevRegActor {
                rev_reg_id: format!("{}:rev-reg", cred_def_id),
                tails_location: format!("{}/tails", tails_dir),
            })
        }
    }

    fn build_usecase() -> Usecase<FakeLedgerEngine, NoopRuntime, MemoryStore> {
        Usecase::new(FakeLedgerEngine, NoopRuntime, MemoryStore::new())
    }

    fn degree_schema() -> SchemaData {
        SchemaData {
            name: "degree".to_string(),
            version: "1.0".to_string(),
            attributes: vec!["age".to_string(), "name".to_string()],
        }
    }

    #[tokio::test]
    async fn test_publication_chain_keeps_ledger_ids() {
        let ledger = build_usecase();

        let schema_id = ledger
            .create_schema("degree-schema", degree_schema())
            .await
            .unwrap();
        assert_eq!(schema_id, "did:sov:abc:2:degree:1.0");

        let cred_def_id = ledger
            .create_credential_definition(
                "degree-cred-def",
                "degree-schema",
                RevocationDetails::disabled(),
            )
            .await
            .unwrap();
        assert_eq!(cred_def_id, "did:sov:abc:2:degree:1.0:cred-def");

        let rev_reg_id = ledger
            .create_revocation_registry("degree-rev-reg", "degree-cred-def", "/tmp", 5)
            .await
            .unwrap();
        assert_eq!(rev_reg_id, "did:sov:abc:2:degree:1.0:cred-def:rev-reg");

        let rev_reg = ledger.get_revocation_registry("degree-rev-reg").await.unwrap();
        assert_eq!(rev_reg.get_cred_def_id(), cred_def_id);
        assert_eq!(rev_reg.get_tails_location(), "/tmp/tails");

        assert_eq!(
            ledger.list_schemas().await.unwrap(),
            vec!["degree-schema".to_string()]
        );
        assert_eq!(
            ledger.list_credential_definitions().await.unwrap(),
            vec!["degree-cred-def".to_string()]
        );
    }

    #[tokio::test]
    async fn test_cred_def_against_absent_schema_is_not_found() {
        let ledger = build_usecase();
        let created = ledger
            .create_credential_definition(
                "degree-cred-def",
                "missing-schema",
                RevocationDetails::disabled(),
            )
            .await;

        assert_eq!(
            created.unwrap_err(),
            LedgerError::StorageError(StorageError::NotFound {
                kind: RecordKind::Schema,
                name: "missing-schema".to_string(),
            })
        );
    }
}
