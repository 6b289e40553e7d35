// Port Layer - Interfaces for external dependencies

pub mod credential_issuer;
pub mod id_provider; // For deterministic testing
pub mod queue_repository;
pub mod time_provider;

// Re-exports
pub use credential_issuer::{CredentialIssuer, IssuerError};
pub use id_provider::IdProvider;
pub use queue_repository::QueueRepository;
pub use time_provider::TimeProvider;

#[cfg(test)]
pub use credential_issuer::MockCredentialIssuer;
#[cfg(test)]
pub use queue_repository::MockQueueRepository;
