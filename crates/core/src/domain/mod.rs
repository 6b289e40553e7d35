// Domain Layer - Pure business logic and entities

pub mod error;
pub mod identifier;
pub mod queue;

// Re-exports
pub use error::DomainError;
pub use identifier::{is_safe_identifier, QueueName};
pub use queue::{CreatedQueue, Queue, QueueChanges, QueueId};
