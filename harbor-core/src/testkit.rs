use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use rst_common::standard::async_trait::async_trait;

use crate::protocol::engine::{EngineError, RuntimeBuilder};
use crate::storage::{RecordKind, RecordStoreBuilder, StorageError};

/// In-memory record store used by usecase and scenario tests. Name order is
/// insertion order, matching what the RocksDB repository documents.
#[derive(Clone, Default)]
pub struct MemoryStore {
    records: Arc<Mutex<HashMap<(RecordKind, String), Vec<u8>>>>,
    order: Arc<Mutex<Vec<(RecordKind, String)>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Runtime whose context carries nothing, used where a test does not care
/// about the acquire/release bracket.
#[derive(Clone, Default)]
pub struct NoopRuntime;

impl RuntimeBuilder for NoopRuntime {
    type Context = ();

    fn acquire(&self) -> Result<Self::Context, EngineError> {
        Ok(())
    }
}

#[async_trait]
impl RecordStoreBuilder for MemoryStore {
    async fn exists(&self, kind: RecordKind, name: &str) -> Result<bool, StorageError> {
        let records = self.records.lock().unwrap();
        Ok(records.contains_key(&(kind, name.to_string())))
    }

    async fn save(&self, kind: RecordKind, name: &str, blob: Vec<u8>) -> Result<(), StorageError> {
        let mut records = self.records.lock().unwrap();
        let key = (kind, name.to_string());
        if records.insert(key.clone(), blob).is_none() {
            self.order.lock().unwrap().push(key);
        }
        Ok(())
    }

    async fn load(&self, kind: RecordKind, name: &str) -> Result<Vec<u8>, StorageError> {
        let records = self.records.lock().unwrap();
        records
            .get(&(kind, name.to_string()))
            .cloned()
            .ok_or(StorageError::NotFound {
                kind,
                name: name.to_string(),
            })
    }

    async fn list_names(&self, kind: RecordKind) -> Result<Vec<String>, StorageError> {
        let order = self.order.lock().unwrap();
        Ok(order
            .iter()
            .filter(|(entry_kind, _)| *entry_kind == kind)
            .map(|(_, name)| name.to_owned())
            .collect())
    }
}
