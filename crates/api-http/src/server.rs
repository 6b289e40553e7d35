//! HTTP Server
//!
//! Router construction, middleware stack, and the listener lifecycle.

use crate::handler::{
    create_queue, delete_queue, get_queue, list_queues, route_not_found, update_queue, AppState,
};
use axum::extract::Request;
use axum::http::header::{
    HeaderName, ACCEPT, AUTHORIZATION, CONTENT_TYPE, REFERRER_POLICY, X_CONTENT_TYPE_OPTIONS,
    X_FRAME_OPTIONS,
};
use axum::http::{HeaderValue, Method};
use axum::routing::get;
use axum::{Router, ServiceExt};
use mykilio_core::application::{QueueRegistry, ShutdownToken};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tower::Layer;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::compression::CompressionLayer;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::normalize_path::NormalizePathLayer;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::{info, Level};

const DEFAULT_HTTP_HOST: &str = "0.0.0.0";
const DEFAULT_HTTP_PORT: u16 = 8080;
const CORS_MAX_AGE: Duration = Duration::from_secs(600);

/// Level of the per-request span and response event
pub const REQUEST_TRACE_LEVEL: Level = Level::INFO;

/// HTTP Server Configuration
#[derive(Debug, Clone)]
pub struct HttpServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for HttpServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HTTP_HOST.to_string(),
            port: DEFAULT_HTTP_PORT,
        }
    }
}

/// Build the queue API router with its middleware stack
///
/// Trailing slash trimming has to wrap the router from outside (see
/// `HttpServer::start`), since routing happens before router layers run.
pub fn build_router(registry: Arc<QueueRegistry>) -> Router {
    Router::new()
        .route("/queues", get(list_queues).post(create_queue))
        .route(
            "/queues/:name",
            get(get_queue).put(update_queue).delete(delete_queue),
        )
        .fallback(route_not_found)
        .layer(CompressionLayer::new())
        .layer(cors_layer())
        .layer(SetResponseHeaderLayer::if_not_present(
            X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            X_FRAME_OPTIONS,
            HeaderValue::from_static("SAMEORIGIN"),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            REFERRER_POLICY,
            HeaderValue::from_static("no-referrer"),
        ))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(REQUEST_TRACE_LEVEL))
                .on_response(DefaultOnResponse::new().level(REQUEST_TRACE_LEVEL)),
        )
        .layer(CatchPanicLayer::new())
        .with_state(AppState::new(registry))
}

fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::mirror_request())
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([
            ACCEPT,
            AUTHORIZATION,
            CONTENT_TYPE,
            HeaderName::from_static("x-csrf-token"),
        ])
        .allow_credentials(true)
        .max_age(CORS_MAX_AGE)
}

/// HTTP Server
pub struct HttpServer {
    config: HttpServerConfig,
    registry: Arc<QueueRegistry>,
}

impl HttpServer {
    pub fn new(config: HttpServerConfig, registry: Arc<QueueRegistry>) -> Self {
        Self { config, registry }
    }

    /// Bind the listener and serve until `shutdown` fires
    ///
    /// Each connection and request runs on its own tokio task.
    pub async fn start(self, mut shutdown: ShutdownToken) -> Result<HttpServerHandle, String> {
        let addr = format!("{}:{}", self.config.host, self.config.port);

        let listener = TcpListener::bind(&addr)
            .await
            .map_err(|e| format!("Failed to bind HTTP listener on {}: {}", addr, e))?;
        let local_addr = listener
            .local_addr()
            .map_err(|e| format!("Failed to read listener address: {}", e))?;

        let app = NormalizePathLayer::trim_trailing_slash().layer(build_router(self.registry));

        info!(addr = %local_addr, "HTTP server online");

        let task = tokio::spawn(async move {
            axum::serve(listener, ServiceExt::<Request>::into_make_service(app))
                .with_graceful_shutdown(async move { shutdown.wait().await })
                .await
        });

        Ok(HttpServerHandle { local_addr, task })
    }
}

/// Handle to a running server
pub struct HttpServerHandle {
    local_addr: SocketAddr,
    task: JoinHandle<std::io::Result<()>>,
}

impl HttpServerHandle {
    /// Address actually bound (useful with port 0)
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Wait for the server to finish draining after shutdown
    pub async fn stopped(self) -> Result<(), String> {
        match self.task.await {
            Ok(Ok(())) => Ok(()),
            Ok(Err(e)) => Err(format!("HTTP server failed: {}", e)),
            Err(e) => Err(format!("HTTP server task panicked: {}", e)),
        }
    }
}
