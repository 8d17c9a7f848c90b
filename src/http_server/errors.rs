//! # HTTP API Errors
//!
//! Maps store failures and absence onto HTTP responses.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;
use tokio::task::JoinError;
use utoipa::ToSchema;

use crate::db::DbError;
use crate::pizza::PizzaId;

/// Result type for handlers
pub type ApiResult<T> = Result<T, ApiError>;

/// HTTP API errors
#[derive(Debug, Error)]
pub enum ApiError {
    /// No pizza has the requested id
    #[error("Pizza not found: {0}")]
    NotFound(PizzaId),

    /// Store unreachable, constraint violation, ...
    #[error("Database error: {0}")]
    Database(#[from] DbError),

    /// Blocking store job panicked or was cancelled
    #[error("Worker failed: {0}")]
    Worker(#[from] JoinError),
}

impl ApiError {
    /// Get HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Worker(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Error response body
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    pub code: u16,
}

impl From<&ApiError> for ErrorResponse {
    fn from(err: &ApiError) -> Self {
        Self {
            code: err.status_code().as_u16(),
            error: err.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "event=request_failed");
        }
        (status, Json(ErrorResponse::from(&self))).into_response()
    }
}
