//! HTTP API Layer
//!
//! Exposes the queue registry as a JSON REST resource under `/queues`.

pub mod error;
pub mod handler;
pub mod server;
pub mod types;

pub use server::{
    build_router, HttpServer, HttpServerConfig, HttpServerHandle, REQUEST_TRACE_LEVEL,
};
