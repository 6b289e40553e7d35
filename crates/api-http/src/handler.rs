//! HTTP Method Handlers
//!
//! Thin adapters: extract, call the registry, wrap the result.

use crate::error::ApiError;
use crate::types::ApiResponse;
use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use mykilio_core::application::registry::{CreateQueueRequest, UpdateQueueRequest};
use mykilio_core::application::QueueRegistry;
use std::sync::Arc;

/// Shared handler state
#[derive(Clone)]
pub struct AppState {
    registry: Arc<QueueRegistry>,
}

impl AppState {
    pub fn new(registry: Arc<QueueRegistry>) -> Self {
        Self { registry }
    }
}

/// GET /queues
pub async fn list_queues(State(state): State<AppState>) -> Result<ApiResponse, ApiError> {
    let queues = state.registry.list().await?;
    Ok(ApiResponse::Queues(queues))
}

/// POST /queues
pub async fn create_queue(
    State(state): State<AppState>,
    body: Result<Json<CreateQueueRequest>, JsonRejection>,
) -> Result<ApiResponse, ApiError> {
    let Json(body) = body?;
    let created = state.registry.create(body).await?;
    Ok(ApiResponse::Created(created))
}

/// GET /queues/{name}
pub async fn get_queue(
    State(state): State<AppState>,
    name: Result<Path<String>, PathRejection>,
) -> Result<ApiResponse, ApiError> {
    let Path(name) = name?;
    let queue = state.registry.get(&name).await?;
    Ok(ApiResponse::Queue(queue))
}

/// PUT /queues/{name}
pub async fn update_queue(
    State(state): State<AppState>,
    name: Result<Path<String>, PathRejection>,
    body: Result<Json<UpdateQueueRequest>, JsonRejection>,
) -> Result<ApiResponse, ApiError> {
    let Path(name) = name?;
    let Json(body) = body?;
    let queue = state.registry.update(&name, body).await?;
    Ok(ApiResponse::Queue(queue))
}

/// DELETE /queues/{name}
pub async fn delete_queue(
    State(state): State<AppState>,
    name: Result<Path<String>, PathRejection>,
) -> Result<ApiResponse, ApiError> {
    let Path(name) = name?;
    state.registry.delete(&name).await?;
    Ok(ApiResponse::NoContent)
}

/// Fallback for unknown routes
pub async fn route_not_found() -> ApiError {
    ApiError::new(StatusCode::NOT_FOUND, "Route Not Found")
}
