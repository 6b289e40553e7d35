// Queue Registry - Core use cases for queue lifecycle

pub mod create;
pub mod delete;
pub mod lookup;
pub mod update;

pub use create::CreateQueueRequest;
pub use update::UpdateQueueRequest;

use crate::domain::{CreatedQueue, Queue};
use crate::error::Result;
use crate::port::{CredentialIssuer, IdProvider, QueueRepository};
use std::sync::Arc;

/// Queue Registry
///
/// Holds no locks of its own: concurrent creates on the same name or owner
/// are resolved by the repository's unique constraints.
pub struct QueueRegistry {
    queue_repo: Arc<dyn QueueRepository>,
    issuer: Arc<dyn CredentialIssuer>,
    id_provider: Arc<dyn IdProvider>,
}

impl QueueRegistry {
    pub fn new(
        queue_repo: Arc<dyn QueueRepository>,
        issuer: Arc<dyn CredentialIssuer>,
        id_provider: Arc<dyn IdProvider>,
    ) -> Self {
        Self {
            queue_repo,
            issuer,
            id_provider,
        }
    }

    /// List all queues
    pub async fn list(&self) -> Result<Vec<Queue>> {
        lookup::list(self.queue_repo.as_ref()).await
    }

    /// Create a queue and mint its credential
    pub async fn create(&self, req: CreateQueueRequest) -> Result<CreatedQueue> {
        create::execute(
            self.queue_repo.as_ref(),
            self.issuer.as_ref(),
            self.id_provider.as_ref(),
            req,
        )
        .await
    }

    /// Get a queue by name
    pub async fn get(&self, name: &str) -> Result<Queue> {
        lookup::get(self.queue_repo.as_ref(), name).await
    }

    /// Update the mutable fields of a queue
    pub async fn update(&self, name: &str, req: UpdateQueueRequest) -> Result<Queue> {
        update::execute(self.queue_repo.as_ref(), name, req).await
    }

    /// Delete a queue by name
    pub async fn delete(&self, name: &str) -> Result<()> {
        delete::execute(self.queue_repo.as_ref(), name).await
    }
}
