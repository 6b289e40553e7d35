// List / Get Use Cases

use crate::domain::{Queue, QueueName};
use crate::error::{AppError, Result};
use crate::port::QueueRepository;

/// Return every stored queue (storage order, no credential)
pub async fn list(queue_repo: &dyn QueueRepository) -> Result<Vec<Queue>> {
    queue_repo.list().await
}

/// Look up a queue by name
///
/// The name is guard-checked before the repository is touched.
pub async fn get(queue_repo: &dyn QueueRepository, name: &str) -> Result<Queue> {
    let name = QueueName::parse(name)?;

    queue_repo
        .find_by_name(name.as_str())
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Queue {} not found", name)))
}
