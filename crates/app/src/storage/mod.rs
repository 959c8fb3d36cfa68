//! Identity-partitioned state storage.
//!
//! Each identity owns one cart record and one wishlist record. Records are
//! opaque serialized snapshots, read and written wholesale.

mod errors;
mod memory;
mod partition;
mod postgres;

use async_trait::async_trait;
use mockall::automock;

pub use errors::StorageError;
pub use memory::MemoryStateStorage;
pub use partition::{PartitionKey, PartitionKind};
pub use postgres::PgStateStorage;

#[automock]
#[async_trait]
pub trait StateStorage: Send + Sync {
    /// Read the snapshot stored for a partition, if any.
    async fn read(&self, partition: &PartitionKey) -> Result<Option<String>, StorageError>;

    /// Replace the snapshot stored for a partition.
    async fn write(&self, partition: &PartitionKey, payload: String) -> Result<(), StorageError>;

    /// Discard the snapshot stored for a partition. Absent partitions are ignored.
    async fn remove(&self, partition: &PartitionKey) -> Result<(), StorageError>;
}
