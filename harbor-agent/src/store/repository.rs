use rst_common::standard::async_trait::async_trait;
use rstdev_storage::engine::rocksdb::db::DB;

use harbor_core::storage::{RecordKind, RecordStoreBuilder, StorageError};

use crate::db::{DbError, Instruction, NameIndex, OutputOpts, Runner, NAME_INDEX_PREFIX};

/// `Repository` persists protocol actor records for exactly one agent.
///
/// Record keys embed the agent name, so multiple agents can share a single
/// database without colliding. The per-kind name index is maintained through
/// the merge operator and returns names in first-save order.
#[derive(Clone)]
pub struct Repository {
    db: Runner<DB>,
    agent: String,
}

impl Repository {
    pub fn new(db: Runner<DB>, agent: String) -> Self {
        Self { db, agent }
    }

    fn record_key(&self, kind: RecordKind, name: &str) -> String {
        format!("record:{}:{}:{}", kind, self.agent, name)
    }

    fn index_key(&self, kind: RecordKind) -> String {
        format!("{}:{}:{}", NAME_INDEX_PREFIX, kind, self.agent)
    }

    async fn get_value(&self, key: String) -> Result<Option<Vec<u8>>, DbError> {
        let output = self.db.exec(Instruction::GetCf { key }).await?;
        match output {
            OutputOpts::SingleByte { value } => Ok(value),
            _ => Ok(None),
        }
    }
}

#[async_trait]
impl RecordStoreBuilder for Repository {
    async fn exists(&self, kind: RecordKind, name: &str) -> Result<bool, StorageError> {
        let value = self
            .get_value(self.record_key(kind, name))
            .await
            .map_err(|err| StorageError::LoadError(err.to_string()))?;

        Ok(value.is_some())
    }

    async fn save(&self, kind: RecordKind, name: &str, blob: Vec<u8>) -> Result<(), StorageError> {
        let _ = self
            .db
            .exec(Instruction::SaveCf {
                key: self.record_key(kind, name),
                value: blob,
            })
            .await
            .map_err(|err| StorageError::SaveError(err.to_string()))?;

        // The merge operator drops the name if it is already indexed, so a
        // re-save never produces a duplicate listing entry.
        let _ = self
            .db
            .exec(Instruction::MergeCf {
                key: self.index_key(kind),
                value: name.as_bytes().to_vec(),
            })
            .await
            .map_err(|err| StorageError::SaveError(err.to_string()))?;

        Ok(())
    }

    async fn load(&self, kind: RecordKind, name: &str) -> Result<Vec<u8>, StorageError> {
        let value = self
            .get_value(self.record_key(kind, name))
            .await
            .map_err(|err| StorageError::LoadError(err.to_string()))?;

        value.ok_or(StorageError::NotFound {
            kind,
            name: name.to_string(),
        })
    }

    async fn list_names(&self, kind: RecordKind) -> Result<Vec<String>, StorageError> {
        let value = self
            .get_value(self.index_key(kind))
            .await
            .map_err(|err| StorageError::ListError(err.to_string()))?;

        match value {
            Some(bytes) => {
                let index = NameIndex::try_from(bytes)
                    .map_err(|err| StorageError::ListError(err.to_string()))?;
                Ok(index.names())
            }
            None => Ok(Vec::new()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use rst_common::with_tokio::tokio;

    use crate::common::helpers::testdb;

    fn build_repo(agent: &str) -> Repository {
        Repository::new(testdb::global_db_runner().to_owned(), agent.to_string())
    }

    #[tokio::test]
    async fn test_save_then_load_roundtrip() {
        let repo = build_repo("agent-roundtrip");

        repo.save(RecordKind::Connection, "faber-to-alice", b"blob-1".to_vec())
            .await
            .unwrap();

        let loaded = repo
            .load(RecordKind::Connection, "faber-to-alice")
            .await
            .unwrap();
        assert_eq!(loaded, b"blob-1".to_vec());
        assert!(repo
            .exists(RecordKind::Connection, "faber-to-alice")
            .await
            .unwrap());
    }

    #[tokio::test]
    async fn test_resave_overwrites_and_keeps_single_listing() {
        let repo = build_repo("agent-overwrite");

        repo.save(RecordKind::Proof, "proof-1", b"first".to_vec())
            .await
            .unwrap();
        repo.save(RecordKind::Proof, "proof-1", b"second".to_vec())
            .await
            .unwrap();

        let loaded = repo.load(RecordKind::Proof, "proof-1").await.unwrap();
        assert_eq!(loaded, b"second".to_vec());

        let names = repo.list_names(RecordKind::Proof).await.unwrap();
        assert_eq!(names, vec!["proof-1".to_string()]);
    }

    #[tokio::test]
    async fn test_load_absent_record_is_not_found() {
        let repo = build_repo("agent-absent");

        let loaded = repo.load(RecordKind::Schema, "never-saved").await;
        assert_eq!(
            loaded.unwrap_err(),
            StorageError::NotFound {
                kind: RecordKind::Schema,
                name: "never-saved".to_string()
            }
        );
        assert!(!repo.exists(RecordKind::Schema, "never-saved").await.unwrap());
    }

    #[tokio::test]
    async fn test_list_names_keeps_first_save_order() {
        let repo = build_repo("agent-ordering");

        for name in ["charlie", "alice", "bob"] {
            repo.save(RecordKind::HolderCredential, name, b"cred".to_vec())
                .await
                .unwrap();
        }

        let names = repo.list_names(RecordKind::HolderCredential).await.unwrap();
        assert_eq!(names, vec!["charlie", "alice", "bob"]);
    }

    #[tokio::test]
    async fn test_list_names_without_saves_is_empty() {
        let repo = build_repo("agent-empty");

        let names = repo.list_names(RecordKind::DisclosedProof).await.unwrap();
        assert!(names.is_empty());
    }

    #[tokio::test]
    async fn test_agents_and_kinds_are_isolated() {
        let faber = build_repo("agent-iso-faber");
        let alice = build_repo("agent-iso-alice");

        faber
            .save(RecordKind::Connection, "shared-name", b"faber".to_vec())
            .await
            .unwrap();

        assert!(!alice
            .exists(RecordKind::Connection, "shared-name")
            .await
            .unwrap());
        assert!(!faber
            .exists(RecordKind::Schema, "shared-name")
            .await
            .unwrap());
        assert!(alice
            .list_names(RecordKind::Connection)
            .await
            .unwrap()
            .is_empty());
    }
}
