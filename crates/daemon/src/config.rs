//! Daemon configuration
//!
//! Read once from the environment at startup and passed down explicitly.

use anyhow::{bail, Context, Result};
use mykilio_api_http::HttpServerConfig;
use tracing::warn;

pub const ENV_JWT_KEY: &str = "JWT_KEY";
pub const ENV_DB_PATH: &str = "MYKILIO_DB_PATH";
pub const ENV_HOST: &str = "MYKILIO_HOST";
pub const ENV_PORT: &str = "PORT";
pub const ENV_LOG_FORMAT: &str = "MYKILIO_LOG_FORMAT";

const DEFAULT_DB_PATH: &str = "./data/v1.sqlite3";
const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8080;

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Json,
    Pretty,
}

impl LogFormat {
    pub fn from_env() -> Self {
        match std::env::var(ENV_LOG_FORMAT).as_deref() {
            Ok("json") => LogFormat::Json,
            _ => LogFormat::Pretty,
        }
    }
}

/// Process-wide configuration
pub struct DaemonConfig {
    pub jwt_key: Vec<u8>,
    pub db_path: String,
    pub http: HttpServerConfig,
}

impl DaemonConfig {
    /// Load configuration from the process environment.
    ///
    /// A missing or empty `JWT_KEY` is an error: the daemon must not start
    /// without a signing key.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let jwt_key = match lookup(ENV_JWT_KEY) {
            Some(key) if !key.is_empty() => key.into_bytes(),
            _ => bail!("Missing environment variable: {}", ENV_JWT_KEY),
        };

        let db_path = lookup(ENV_DB_PATH).unwrap_or_else(|| DEFAULT_DB_PATH.to_string());
        let host = lookup(ENV_HOST).unwrap_or_else(|| DEFAULT_HOST.to_string());

        let port = match lookup(ENV_PORT) {
            Some(raw) => raw
                .parse::<u16>()
                .with_context(|| format!("Invalid {} value: {}", ENV_PORT, raw))?,
            None => {
                warn!("Missing environment variable: {}", ENV_PORT);
                warn!("Using default port: {}/tcp", DEFAULT_PORT);
                DEFAULT_PORT
            }
        };

        Ok(Self {
            jwt_key,
            db_path,
            http: HttpServerConfig { host, port },
        })
    }
}
