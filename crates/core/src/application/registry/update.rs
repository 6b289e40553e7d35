// Update Use Case

use crate::domain::{Queue, QueueChanges, QueueName};
use crate::error::{AppError, Result};
use crate::port::QueueRepository;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Update request
///
/// Only the mutable fields exist here; the target name always comes from the
/// path, so a body cannot rename a queue or change its owner.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateQueueRequest {
    #[serde(default)]
    pub title: Option<String>,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub number: Option<i64>,
}

impl From<UpdateQueueRequest> for QueueChanges {
    fn from(req: UpdateQueueRequest) -> Self {
        Self {
            title: req.title,
            description: req.description,
            number: req.number,
        }
    }
}

/// Execute update use case
///
/// Existence is decided by the write itself: the repository returns the row
/// it updated, or `None` when nothing matched the name.
pub async fn execute(
    queue_repo: &dyn QueueRepository,
    name: &str,
    req: UpdateQueueRequest,
) -> Result<Queue> {
    let name = QueueName::parse(name)?;

    let changes = QueueChanges::from(req);
    changes.validate()?;

    if changes.is_empty() {
        debug!(queue_name = %name, "Update carries no changes");
    }

    let updated = queue_repo
        .update_by_name(name.as_str(), &changes)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Queue {} not found", name)))?;

    info!(queue_id = %updated.id, queue_name = %updated.name, "Queue updated");

    Ok(updated)
}
