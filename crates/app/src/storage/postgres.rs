//! `PostgreSQL` state storage.

use async_trait::async_trait;
use sqlx::{Postgres, query, query_scalar};

use crate::{
    database::Db,
    storage::{PartitionKey, StateStorage, StorageError},
};

const READ_STATE_SQL: &str = include_str!("sql/read_state.sql");
const WRITE_STATE_SQL: &str = include_str!("sql/write_state.sql");
const REMOVE_STATE_SQL: &str = include_str!("sql/remove_state.sql");

/// Stores one row per partition in `identity_state`.
#[derive(Debug, Clone)]
pub struct PgStateStorage {
    db: Db,
}

impl PgStateStorage {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self { db }
    }
}

#[async_trait]
impl StateStorage for PgStateStorage {
    async fn read(&self, partition: &PartitionKey) -> Result<Option<String>, StorageError> {
        let payload = query_scalar::<Postgres, String>(READ_STATE_SQL)
            .bind(partition.to_string())
            .fetch_optional(self.db.pool())
            .await?;

        Ok(payload)
    }

    async fn write(&self, partition: &PartitionKey, payload: String) -> Result<(), StorageError> {
        query(WRITE_STATE_SQL)
            .bind(partition.to_string())
            .bind(payload)
            .execute(self.db.pool())
            .await?;

        Ok(())
    }

    async fn remove(&self, partition: &PartitionKey) -> Result<(), StorageError> {
        query(REMOVE_STATE_SQL)
            .bind(partition.to_string())
            .execute(self.db.pool())
            .await?;

        Ok(())
    }
}
