//! HTTP Request/Response Types
//!
//! Every response kind has its own variant so the wire contract is checked
//! at compile time.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use mykilio_core::domain::{CreatedQueue, Queue};
use serde::{Deserialize, Serialize};

/// `{"data": ...}`
#[derive(Debug, Serialize, Deserialize)]
pub struct DataEnvelope<T> {
    pub data: T,
}

/// `{"error": {"title", "status", "message"}}`
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorEnvelope {
    pub error: ServiceError,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceError {
    pub title: String,
    pub status: u16,
    pub message: String,
}

/// Successful responses
#[derive(Debug)]
pub enum ApiResponse {
    /// 201, `{"data": queue-with-token}`
    Created(CreatedQueue),
    /// 200, bare queue
    Queue(Queue),
    /// 200, bare array of queues
    Queues(Vec<Queue>),
    /// 204, empty body
    NoContent,
}

impl IntoResponse for ApiResponse {
    fn into_response(self) -> Response {
        match self {
            ApiResponse::Created(created) => {
                (StatusCode::CREATED, Json(DataEnvelope { data: created })).into_response()
            }
            ApiResponse::Queue(queue) => (StatusCode::OK, Json(queue)).into_response(),
            ApiResponse::Queues(queues) => (StatusCode::OK, Json(queues)).into_response(),
            ApiResponse::NoContent => StatusCode::NO_CONTENT.into_response(),
        }
    }
}
