//! Queue registry over the SQLite adapter and the JWT issuer

mod common;

use common::{create_request, decode_claims, setup_test_system, setup_with_issuer};
use mykilio_core::application::registry::UpdateQueueRequest;
use mykilio_core::domain::DomainError;
use mykilio_core::error::AppError;
use mykilio_core::port::{CredentialIssuer, IssuerError};
use std::sync::Arc;

/// Issuer whose signing backend is always down
struct UnavailableIssuer;

impl CredentialIssuer for UnavailableIssuer {
    fn issue(&self, _queue_id: &str, _owner: &str) -> Result<String, IssuerError> {
        Err(IssuerError::Encoding("signing backend unavailable".to_string()))
    }
}

const UNSAFE_NAMES: &[&str] = &[
    "",
    " ",
    "alpha beta",
    "alpha-beta",
    "alpha_beta",
    "alpha.beta",
    "' OR '1'='1",
    "alpha;DELETE FROM queues",
    "ünicode",
];

fn is_invalid_identifier(err: &AppError) -> bool {
    matches!(err, AppError::Domain(DomainError::InvalidIdentifier(_)))
}

#[tokio::test]
async fn test_unsafe_names_never_reach_storage() {
    let system = setup_test_system().await;

    for name in UNSAFE_NAMES {
        let err = system.registry.get(name).await.unwrap_err();
        assert!(is_invalid_identifier(&err), "get {name:?}: {err:?}");

        let err = system
            .registry
            .update(name, UpdateQueueRequest::default())
            .await
            .unwrap_err();
        assert!(is_invalid_identifier(&err), "update {name:?}: {err:?}");

        let err = system.registry.delete(name).await.unwrap_err();
        assert!(is_invalid_identifier(&err), "delete {name:?}: {err:?}");
    }

    assert_eq!(system.repo.calls(), 0);
}

#[tokio::test]
async fn test_duplicate_name_fails_and_keeps_one_queue() {
    let system = setup_test_system().await;

    system
        .registry
        .create(create_request("alpha", "bob"))
        .await
        .unwrap();
    let err = system
        .registry
        .create(create_request("alpha", "carol"))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)), "got {err:?}");

    let queues = system.registry.list().await.unwrap();
    let named: Vec<_> = queues.iter().filter(|q| q.name == "alpha").collect();
    assert_eq!(named.len(), 1);
    assert_eq!(named[0].owner, "bob");
}

#[tokio::test]
async fn test_duplicate_owner_fails_and_keeps_one_queue() {
    let system = setup_test_system().await;

    system
        .registry
        .create(create_request("alpha", "bob"))
        .await
        .unwrap();
    let err = system
        .registry
        .create(create_request("beta", "bob"))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)), "got {err:?}");

    let queues = system.registry.list().await.unwrap();
    let owned: Vec<_> = queues.iter().filter(|q| q.owner == "bob").collect();
    assert_eq!(owned.len(), 1);
    assert_eq!(owned[0].name, "alpha");
}

#[tokio::test]
async fn test_credential_asserts_created_id_and_owner() {
    let system = setup_test_system().await;

    let created = system
        .registry
        .create(create_request("alpha", "bob"))
        .await
        .unwrap();

    let claims = decode_claims(&created.token);
    assert_eq!(claims.jti, format!("/queues/{}", created.queue.id));
    assert_eq!(claims.sub, "bob");

    // Reads return the stored record, which has no credential
    let fetched = system.registry.get("alpha").await.unwrap();
    assert_eq!(fetched, created.queue);
    let value = serde_json::to_value(&fetched).unwrap();
    assert!(value.get("token").is_none());

    let listed = system.registry.list().await.unwrap();
    assert!(listed
        .iter()
        .map(|q| serde_json::to_value(q).unwrap())
        .all(|v| v.get("token").is_none()));
}

#[tokio::test]
async fn test_ids_are_unique_per_create() {
    let system = setup_test_system().await;

    let a = system
        .registry
        .create(create_request("alpha", "bob"))
        .await
        .unwrap();
    let b = system
        .registry
        .create(create_request("beta", "carol"))
        .await
        .unwrap();

    assert_ne!(a.queue.id, b.queue.id);
    assert_ne!(a.token, b.token);
}

#[tokio::test]
async fn test_update_changes_only_mutable_fields() {
    let system = setup_test_system().await;
    let created = system
        .registry
        .create(create_request("alpha", "bob"))
        .await
        .unwrap();

    // Body carries identity fields; they must not be applied
    let req: UpdateQueueRequest = serde_json::from_value(serde_json::json!({
        "id": "forged",
        "name": "beta",
        "owner": "mallory",
        "title": "T2",
        "description": "D2",
        "number": 5
    }))
    .unwrap();

    let updated = system.registry.update("alpha", req).await.unwrap();

    assert_eq!(updated.id, created.queue.id);
    assert_eq!(updated.name, "alpha");
    assert_eq!(updated.owner, "bob");
    assert_eq!(updated.title, "T2");
    assert_eq!(updated.description, "D2");
    assert_eq!(updated.number, 5);

    assert_eq!(system.registry.get("alpha").await.unwrap(), updated);
    assert!(matches!(
        system.registry.get("beta").await.unwrap_err(),
        AppError::NotFound(_)
    ));
}

#[tokio::test]
async fn test_update_missing_queue_is_not_found() {
    let system = setup_test_system().await;

    let err = system
        .registry
        .update("ghost", UpdateQueueRequest::default())
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn test_delete_then_get_is_not_found() {
    let system = setup_test_system().await;
    system
        .registry
        .create(create_request("alpha", "bob"))
        .await
        .unwrap();

    system.registry.delete("alpha").await.unwrap();

    let err = system.registry.get("alpha").await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn test_delete_missing_leaves_row_count_unchanged() {
    let system = setup_test_system().await;
    system
        .registry
        .create(create_request("alpha", "bob"))
        .await
        .unwrap();
    system
        .registry
        .create(create_request("beta", "carol"))
        .await
        .unwrap();

    let before = system.registry.list().await.unwrap().len();
    let err = system.registry.delete("gamma").await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));

    assert_eq!(system.registry.list().await.unwrap().len(), before);
}

#[tokio::test]
async fn test_deleted_name_and_owner_can_be_reused() {
    let system = setup_test_system().await;
    let first = system
        .registry
        .create(create_request("alpha", "bob"))
        .await
        .unwrap();
    system.registry.delete("alpha").await.unwrap();

    let second = system
        .registry
        .create(create_request("alpha", "bob"))
        .await
        .unwrap();
    assert_ne!(first.queue.id, second.queue.id);
}

#[tokio::test]
async fn test_issuer_failure_leaves_queue_persisted() {
    let system = setup_with_issuer("sqlite::memory:", Arc::new(UnavailableIssuer)).await;

    let err = system
        .registry
        .create(create_request("alpha", "bob"))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Issuer(_)), "got {err:?}");

    // No rollback: the row committed before issuance stays readable
    let stored = system.registry.get("alpha").await.unwrap();
    assert_eq!(stored.owner, "bob");
    assert_eq!(system.registry.list().await.unwrap().len(), 1);

    // and still holds the name for later creates
    let err = system
        .registry
        .create(create_request("alpha", "carol"))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)), "got {err:?}");
}
