// Credential Issuer Port
// Mints the bearer token handed out once, on queue creation

use thiserror::Error;

/// Issuer errors
#[derive(Error, Debug)]
pub enum IssuerError {
    #[error("Invalid signing key: {0}")]
    InvalidKey(String),

    #[error("Token encoding failed: {0}")]
    Encoding(String),
}

/// Credential Issuer trait
///
/// Produces an opaque signed token asserting that the holder may act on
/// `queue_id` on behalf of `owner`. Implementations are synchronous and hold
/// no mutable state, so a single instance is shared across all requests.
#[cfg_attr(test, mockall::automock)]
pub trait CredentialIssuer: Send + Sync {
    fn issue(&self, queue_id: &str, owner: &str) -> Result<String, IssuerError>;
}
