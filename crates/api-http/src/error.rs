//! HTTP Error Mapping
//!
//! Maps application errors onto status codes and the error envelope.

use crate::types::{ErrorEnvelope, ServiceError};
use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use mykilio_core::domain::DomainError;
use mykilio_core::error::AppError;
use tracing::error;

pub const MSG_INVALID_IDENTIFIER: &str = "Invalid Identifier";
pub const MSG_NOT_FOUND: &str = "Entity Not Found";

/// Error returned by every handler
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    pub fn new<S: Into<String>>(status: StatusCode, message: S) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn envelope(&self) -> ErrorEnvelope {
        ErrorEnvelope {
            error: ServiceError {
                title: self
                    .status
                    .canonical_reason()
                    .unwrap_or("Unknown Status")
                    .to_string(),
                status: self.status.as_u16(),
                message: self.message.clone(),
            },
        }
    }
}

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        match err {
            AppError::Domain(DomainError::InvalidIdentifier(_)) => {
                ApiError::new(StatusCode::BAD_REQUEST, MSG_INVALID_IDENTIFIER)
            }
            AppError::Domain(DomainError::ValidationError(msg)) => {
                ApiError::new(StatusCode::BAD_REQUEST, msg)
            }
            AppError::NotFound(_) => ApiError::new(StatusCode::NOT_FOUND, MSG_NOT_FOUND),
            AppError::Conflict(msg) => ApiError::new(StatusCode::CONFLICT, msg),
            AppError::Issuer(_) => ApiError::new(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Queue was created but its credential could not be issued",
            ),
            AppError::InvariantViolation(msg) => {
                ApiError::new(StatusCode::INTERNAL_SERVER_ERROR, msg)
            }
            AppError::Database(msg) => {
                error!(error = %msg, "Storage error");
                ApiError::new(StatusCode::INTERNAL_SERVER_ERROR, "Storage error")
            }
            AppError::Config(msg) => {
                error!(error = %msg, "Internal error");
                ApiError::new(StatusCode::INTERNAL_SERVER_ERROR, "Internal error")
            }
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::new(rejection.status(), rejection.body_text())
    }
}

/// A path segment that cannot even be decoded is not a safe identifier
impl From<PathRejection> for ApiError {
    fn from(_: PathRejection) -> Self {
        ApiError::new(StatusCode::BAD_REQUEST, MSG_INVALID_IDENTIFIER)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.envelope())).into_response()
    }
}
