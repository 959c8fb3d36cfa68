//! In-process state storage.

use async_trait::async_trait;
use rustc_hash::FxHashMap;
use tokio::sync::RwLock;

use crate::storage::{PartitionKey, StateStorage, StorageError};

/// Keeps snapshots in a map for the lifetime of the process.
#[derive(Debug, Default)]
pub struct MemoryStateStorage {
    records: RwLock<FxHashMap<String, String>>,
}

impl MemoryStateStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl StateStorage for MemoryStateStorage {
    async fn read(&self, partition: &PartitionKey) -> Result<Option<String>, StorageError> {
        Ok(self.records.read().await.get(&partition.to_string()).cloned())
    }

    async fn write(&self, partition: &PartitionKey, payload: String) -> Result<(), StorageError> {
        self.records
            .write()
            .await
            .insert(partition.to_string(), payload);

        Ok(())
    }

    async fn remove(&self, partition: &PartitionKey) -> Result<(), StorageError> {
        self.records.write().await.remove(&partition.to_string());

        Ok(())
    }
}
