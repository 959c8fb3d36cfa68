//! Storage errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage error")]
    Sql(#[from] sqlx::Error),

    #[error("failed to serialize snapshot")]
    Serialize(#[source] serde_json::Error),
}
