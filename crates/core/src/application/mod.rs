// Application Layer - Use Cases and Business Logic

pub mod registry;
mod shutdown;

// Re-exports
pub use registry::QueueRegistry;
pub use shutdown::{shutdown_channel, ShutdownSender, ShutdownToken};
