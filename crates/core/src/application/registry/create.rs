// Create Use Case

use crate::domain::queue::{
    check_len, MAX_DESCRIPTION_LEN, MAX_NAME_LEN, MAX_OWNER_LEN, MAX_TITLE_LEN,
};
use crate::domain::{CreatedQueue, DomainError, Queue, QueueName};
use crate::error::{AppError, Result};
use crate::port::{CredentialIssuer, IdProvider, QueueRepository};
use serde::{Deserialize, Serialize};
use tracing::{error, info};

/// Create request
///
/// Carries no `id` or credential: both are assigned by the registry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateQueueRequest {
    pub name: String,
    pub owner: String,

    #[serde(default)]
    pub title: String,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub number: i64,
}

/// Validate a create request before it reaches storage
pub fn validate_request(req: &CreateQueueRequest) -> std::result::Result<QueueName, DomainError> {
    let name = QueueName::parse(req.name.as_str())?;
    check_len("name", &req.name, MAX_NAME_LEN)?;

    if req.owner.trim().is_empty() {
        return Err(DomainError::ValidationError(
            "owner cannot be empty".to_string(),
        ));
    }
    check_len("owner", &req.owner, MAX_OWNER_LEN)?;
    check_len("title", &req.title, MAX_TITLE_LEN)?;
    check_len("description", &req.description, MAX_DESCRIPTION_LEN)?;

    Ok(name)
}

/// Execute create use case
///
/// # Arguments
///
/// * `queue_repo` - Queue repository (enforces name/owner uniqueness)
/// * `issuer` - Credential issuer
/// * `id_provider` - ID generator (injected for determinism)
/// * `req` - Create request
///
/// # Errors
///
/// Issuance runs after the insert has committed. If it fails the queue stays
/// stored and the caller gets `AppError::Issuer`; there is no rollback.
pub async fn execute(
    queue_repo: &dyn QueueRepository,
    issuer: &dyn CredentialIssuer,
    id_provider: &dyn IdProvider,
    req: CreateQueueRequest,
) -> Result<CreatedQueue> {
    let name = validate_request(&req)?;

    let queue = Queue {
        id: id_provider.generate_id(),
        name: name.into_inner(),
        owner: req.owner,
        title: req.title,
        description: req.description,
        number: req.number,
    };

    queue_repo.insert(&queue).await?;

    info!(queue_id = %queue.id, queue_name = %queue.name, "Queue created");

    let token = issuer.issue(&queue.id, &queue.owner).map_err(|e| {
        error!(
            queue_id = %queue.id,
            error = %e,
            "Credential issuance failed after queue was persisted"
        );
        AppError::Issuer(e)
    })?;

    Ok(CreatedQueue { queue, token })
}
