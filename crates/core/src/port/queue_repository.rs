// Queue Repository Port (Interface)

use crate::domain::{Queue, QueueChanges};
use crate::error::Result;
use async_trait::async_trait;

/// Repository interface for Queue persistence
///
/// Implementations must enforce uniqueness of `name` and of `owner` and
/// report violations as `AppError::Conflict`. Callers pass names that already
/// went through the identifier guard.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait QueueRepository: Send + Sync {
    /// List all queues in storage order
    async fn list(&self) -> Result<Vec<Queue>>;

    /// Insert a new queue
    async fn insert(&self, queue: &Queue) -> Result<()>;

    /// Find queue by its unique name
    async fn find_by_name(&self, name: &str) -> Result<Option<Queue>>;

    /// Update the mutable fields of the queue matched by name.
    /// Returns the row as stored after the write, or `None` if no row matched.
    async fn update_by_name(&self, name: &str, changes: &QueueChanges) -> Result<Option<Queue>>;

    /// Delete the queue matched by name, returning the number of rows removed
    async fn delete_by_name(&self, name: &str) -> Result<u64>;
}
