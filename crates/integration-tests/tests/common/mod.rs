//! Shared fixtures for integration tests

#![allow(dead_code)]

use async_trait::async_trait;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use mykilio_core::application::registry::CreateQueueRequest;
use mykilio_core::application::QueueRegistry;
use mykilio_core::domain::{Queue, QueueChanges};
use mykilio_core::error::Result;
use mykilio_core::port::id_provider::UuidProvider;
use mykilio_core::port::time_provider::SystemTimeProvider;
use mykilio_core::port::{CredentialIssuer, QueueRepository};
use mykilio_infra_sqlite::{create_pool, run_migrations, SqliteQueueRepository};
use mykilio_infra_token::{Claims, HmacJwtIssuer};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

pub const TEST_KEY: &[u8] = b"integration-test-signing-key";

/// Repository wrapper counting every storage call
pub struct CountingRepository {
    inner: SqliteQueueRepository,
    calls: AtomicUsize,
}

impl CountingRepository {
    pub fn new(inner: SqliteQueueRepository) -> Self {
        Self {
            inner,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn record(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl QueueRepository for CountingRepository {
    async fn list(&self) -> Result<Vec<Queue>> {
        self.record();
        self.inner.list().await
    }

    async fn insert(&self, queue: &Queue) -> Result<()> {
        self.record();
        self.inner.insert(queue).await
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Queue>> {
        self.record();
        self.inner.find_by_name(name).await
    }

    async fn update_by_name(&self, name: &str, changes: &QueueChanges) -> Result<Option<Queue>> {
        self.record();
        self.inner.update_by_name(name, changes).await
    }

    async fn delete_by_name(&self, name: &str) -> Result<u64> {
        self.record();
        self.inner.delete_by_name(name).await
    }
}

pub struct TestSystem {
    pub registry: Arc<QueueRegistry>,
    pub repo: Arc<CountingRepository>,
}

pub async fn setup_with_issuer(
    database_url: &str,
    issuer: Arc<dyn CredentialIssuer>,
) -> TestSystem {
    let pool = create_pool(database_url).await.unwrap();
    run_migrations(&pool).await.unwrap();

    let repo = Arc::new(CountingRepository::new(SqliteQueueRepository::new(pool)));
    let registry = Arc::new(QueueRegistry::new(
        repo.clone(),
        issuer,
        Arc::new(UuidProvider),
    ));

    TestSystem { registry, repo }
}

pub async fn setup_with_url(database_url: &str) -> TestSystem {
    let issuer = HmacJwtIssuer::new(TEST_KEY, Arc::new(SystemTimeProvider)).unwrap();
    setup_with_issuer(database_url, Arc::new(issuer)).await
}

pub async fn setup_test_system() -> TestSystem {
    setup_with_url("sqlite::memory:").await
}

pub fn create_request(name: &str, owner: &str) -> CreateQueueRequest {
    CreateQueueRequest {
        name: name.to_string(),
        owner: owner.to_string(),
        title: "T".to_string(),
        description: "D".to_string(),
        number: 1,
    }
}

/// Decode (without verifying) the claims of a compact JWT
pub fn decode_claims(token: &str) -> Claims {
    let payload = token.split('.').nth(1).expect("token has a payload segment");
    let bytes = URL_SAFE_NO_PAD.decode(payload).unwrap();
    serde_json::from_slice(&bytes).unwrap()
}
