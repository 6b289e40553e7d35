//! Mykilio Queue Registry - Main Entry Point
//! HTTP server over a SQLite-backed queue registry

mod config;
mod telemetry;

use anyhow::{Context, Result};
use config::{DaemonConfig, LogFormat};
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

// Import workspace crates
use mykilio_api_http::HttpServer;
use mykilio_core::application::{shutdown_channel, QueueRegistry};
use mykilio_core::port::id_provider::UuidProvider;
use mykilio_core::port::time_provider::SystemTimeProvider;
use mykilio_infra_sqlite::{create_pool, run_migrations, SqliteQueueRepository};
use mykilio_infra_token::HmacJwtIssuer;

const VERSION: &str = env!("CARGO_PKG_VERSION");
const DEFAULT_LOG_FILTER: &str = "mykilio=info,tower_http=info";

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Initialize logging
    let otlp_endpoint = telemetry::otlp_endpoint();
    init_logging(LogFormat::from_env(), otlp_endpoint.as_deref())?;

    info!("Mykilio queue registry v{} starting...", VERSION);

    match otlp_endpoint {
        Some(endpoint) if cfg!(feature = "telemetry") => {
            info!(endpoint = %endpoint, "OpenTelemetry export enabled");
        }
        Some(_) => {
            warn!("OpenTelemetry endpoint set but feature 'telemetry' not enabled");
            warn!("Rebuild with: cargo build --features telemetry");
        }
        None => {}
    }

    // 2. Load configuration (fails without JWT_KEY)
    let config = DaemonConfig::from_env()?;

    // 3. Initialize database
    info!(db_path = %config.db_path, "Initializing database...");
    let pool = create_pool(&config.db_path)
        .await
        .context("DB pool creation failed")?;
    run_migrations(&pool).await.context("Migration failed")?;

    // 4. Setup dependencies (DI wiring)
    let time_provider = Arc::new(SystemTimeProvider);
    let issuer = HmacJwtIssuer::new(&config.jwt_key, time_provider)
        .context("Failed to create JWT signer")?;
    let registry = Arc::new(QueueRegistry::new(
        Arc::new(SqliteQueueRepository::new(pool.clone())),
        Arc::new(issuer),
        Arc::new(UuidProvider),
    ));

    // 5. Start HTTP server
    let (shutdown_tx, shutdown_rx) = shutdown_channel();
    let server = HttpServer::new(config.http, registry);
    let handle = server
        .start(shutdown_rx)
        .await
        .map_err(|e| anyhow::anyhow!("HTTP server start failed: {}", e))?;

    info!(addr = %handle.local_addr(), "System ready");
    info!("Press Ctrl+C to shutdown");

    // 6. Wait for shutdown signal
    tokio::signal::ctrl_c().await?;

    info!("Shutdown signal received. Exiting gracefully...");

    // 7. Graceful shutdown
    shutdown_tx.shutdown();
    handle
        .stopped()
        .await
        .map_err(|e| anyhow::anyhow!("HTTP server stop failed: {}", e))?;
    pool.close().await;

    info!("Shutdown complete.");

    Ok(())
}

fn init_logging(format: LogFormat, otlp_endpoint: Option<&str>) -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(DEFAULT_LOG_FILTER))
        .context("Failed to create env filter")?;

    let fmt_layer = match format {
        // Production: JSON structured logging
        LogFormat::Json => fmt::layer().json().boxed(),
        // Development: Pretty formatting with colors
        LogFormat::Pretty => fmt::layer().pretty().boxed(),
    };

    tracing_subscriber::registry()
        .with(telemetry::layer(otlp_endpoint)?)
        .with(env_filter)
        .with(fmt_layer)
        .try_init()
        .context("Failed to install tracing subscriber")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use mykilio_api_http::REQUEST_TRACE_LEVEL;

    fn default_filter_subscriber() -> impl tracing::Subscriber + Send + Sync {
        tracing_subscriber::registry().with(EnvFilter::new(DEFAULT_LOG_FILTER))
    }

    #[test]
    fn test_default_filter_shows_request_traces() {
        tracing::subscriber::with_default(default_filter_subscriber(), || {
            assert!(tracing::enabled!(
                target: "tower_http::trace::on_response",
                REQUEST_TRACE_LEVEL
            ));
            assert!(tracing::enabled!(
                target: "tower_http::trace::make_span",
                REQUEST_TRACE_LEVEL
            ));
        });
    }

    #[test]
    fn test_default_filter_scopes_workspace_crates() {
        tracing::subscriber::with_default(default_filter_subscriber(), || {
            assert!(tracing::enabled!(
                target: "mykilio_core::application::registry::create",
                tracing::Level::INFO
            ));
            assert!(!tracing::enabled!(target: "sqlx::query", tracing::Level::INFO));
        });
    }
}
