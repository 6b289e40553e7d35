// HS512 JWT Credential Issuer

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use hmac::{Hmac, Mac};
use mykilio_core::port::{CredentialIssuer, IssuerError, TimeProvider};
use serde::{Deserialize, Serialize};
use sha2::Sha512;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

type HmacSha512 = Hmac<Sha512>;

// Header is constant for every token this issuer mints
const HEADER: &str = r#"{"alg":"HS512","typ":"JWT"}"#;

/// Registered claims carried by a queue credential
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Resource path of the queue, `/queues/{id}`
    pub jti: String,
    /// Owner the holder acts for
    pub sub: String,
    /// Issued-at, seconds since epoch
    pub iat: i64,
}

impl Claims {
    pub fn for_queue(queue_id: &str, owner: &str, issued_at: i64) -> Self {
        Self {
            jti: format!("/queues/{}", queue_id),
            sub: owner.to_string(),
            iat: issued_at,
        }
    }
}

/// Signs queue credentials as compact HS512 JWTs
///
/// The key is loaded once at startup and shared read-only; `issue` only
/// clones the keyed MAC, so any number of requests can mint concurrently.
pub struct HmacJwtIssuer {
    mac: HmacSha512,
    time_provider: Arc<dyn TimeProvider>,
}

impl HmacJwtIssuer {
    pub fn new(key: &[u8], time_provider: Arc<dyn TimeProvider>) -> Result<Self, IssuerError> {
        if key.is_empty() {
            return Err(IssuerError::InvalidKey("signing key is empty".to_string()));
        }

        let mac = HmacSha512::new_from_slice(key)
            .map_err(|e| IssuerError::InvalidKey(e.to_string()))?;

        Ok(Self { mac, time_provider })
    }

    fn sign(&self, claims: &Claims) -> Result<String, IssuerError> {
        let payload =
            serde_json::to_vec(claims).map_err(|e| IssuerError::Encoding(e.to_string()))?;

        let signing_input = format!(
            "{}.{}",
            URL_SAFE_NO_PAD.encode(HEADER),
            URL_SAFE_NO_PAD.encode(payload)
        );

        let mut mac = self.mac.clone();
        mac.update(signing_input.as_bytes());
        let signature = mac.finalize().into_bytes();

        Ok(format!("{}.{}", signing_input, URL_SAFE_NO_PAD.encode(signature)))
    }
}

impl CredentialIssuer for HmacJwtIssuer {
    fn issue(&self, queue_id: &str, owner: &str) -> Result<String, IssuerError> {
        let claims = Claims::for_queue(queue_id, owner, self.time_provider.now_secs());
        debug!(jti = %claims.jti, "Issuing queue credential");
        self.sign(&claims)
    }
}

// Keep the key out of debug output
impl fmt::Debug for HmacJwtIssuer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HmacJwtIssuer")
            .field("alg", &"HS512")
            .finish_non_exhaustive()
    }
}
