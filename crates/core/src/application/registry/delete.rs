// Delete Use Case

use crate::domain::QueueName;
use crate::error::{AppError, Result};
use crate::port::QueueRepository;
use tracing::{error, info};

/// Execute delete use case
///
/// Exactly one row must go. Zero rows is `NotFound`; more than one means the
/// name uniqueness constraint was broken outside this process and is reported
/// as `InvariantViolation`.
pub async fn execute(queue_repo: &dyn QueueRepository, name: &str) -> Result<()> {
    let name = QueueName::parse(name)?;

    match queue_repo.delete_by_name(name.as_str()).await? {
        0 => Err(AppError::NotFound(format!("Queue {} not found", name))),
        1 => {
            info!(queue_name = %name, "Queue deleted");
            Ok(())
        }
        rows_affected => {
            error!(
                queue_name = %name,
                rows_affected,
                "Delete removed more than one queue"
            );
            Err(AppError::InvariantViolation(format!(
                "expected 1 row to be affected, got {}",
                rows_affected
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::registry::test_support::UNSAFE_NAMES;
    use crate::domain::DomainError;
    use crate::port::MockQueueRepository;

    fn repo_deleting(rows: u64) -> MockQueueRepository {
        let mut repo = MockQueueRepository::new();
        repo.expect_delete_by_name()
            .times(1)
            .returning(move |_| Ok(rows));
        repo
    }

    #[tokio::test]
    async fn test_delete_rejects_unsafe_names_without_storage_access() {
        for name in UNSAFE_NAMES {
            let mut repo = MockQueueRepository::new();
            repo.expect_delete_by_name().never();

            let err = execute(&repo, name).await.unwrap_err();
            assert!(matches!(
                err,
                AppError::Domain(DomainError::InvalidIdentifier(_))
            ));
        }
    }

    #[tokio::test]
    async fn test_delete_single_row() {
        assert!(execute(&repo_deleting(1), "alpha").await.is_ok());
    }

    #[tokio::test]
    async fn test_delete_zero_rows_is_not_found() {
        let err = execute(&repo_deleting(0), "alpha").await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_delete_multiple_rows_is_invariant_violation() {
        let err = execute(&repo_deleting(2), "alpha").await.unwrap_err();
        assert!(matches!(err, AppError::InvariantViolation(msg) if msg.contains("got 2")));
    }
}
