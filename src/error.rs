//! # Error Handling
//!
//! This module provides unified error handling for the tracker API. Every
//! failure reaching the HTTP boundary is rendered as a JSON body carrying the
//! human-readable `erro` message, a machine-readable code and the request
//! trace ID.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;

use crate::normalization::NormalizationError;
use crate::telemetry;
use crate::tracking::TrackingError;

/// Unified API error response structure
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ApiError {
    /// HTTP status code for the response
    #[serde(skip_serializing, skip_deserializing)]
    pub status: StatusCode,
    /// Human-readable error message
    #[serde(rename = "erro")]
    pub message: Box<str>,
    /// Error code for programmatic handling
    #[serde(rename = "codigo")]
    pub code: Box<str>,
    /// Correlation trace ID for debugging (optional)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trace_id: Option<Box<str>>,
}

impl ApiError {
    /// Create a new API error with the given status code and message
    pub fn new<S: Into<String>>(status: StatusCode, code: S, message: S) -> Self {
        Self {
            status,
            code: code.into().into_boxed_str(),
            message: message.into().into_boxed_str(),
            trace_id: telemetry::current_trace_id().map(String::into_boxed_str),
        }
    }

    /// 400 with the `VALIDATION_FAILED` code.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(
            StatusCode::BAD_REQUEST,
            "VALIDATION_FAILED".to_string(),
            message.into(),
        )
    }

    /// 404 with the `NOT_FOUND` code.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, "NOT_FOUND".to_string(), message.into())
    }

    /// 500 with the `INTERNAL_SERVER_ERROR` code.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            "INTERNAL_SERVER_ERROR".to_string(),
            message.into(),
        )
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, axum::Json(self)).into_response()
    }
}

/// Errors raised by the repository layer.
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("database error: {0}")]
    Database(#[from] sea_orm::DbErr),
    #[error("{0}")]
    NotFound(String),
}

impl RepositoryError {
    /// Map a SeaORM error into a repository error (for `map_err`).
    pub fn database_error(error: sea_orm::DbErr) -> Self {
        Self::Database(error)
    }
}

impl From<RepositoryError> for ApiError {
    fn from(error: RepositoryError) -> Self {
        match error {
            RepositoryError::NotFound(message) => Self::not_found(message),
            RepositoryError::Database(db_err) => {
                tracing::error!(error = ?db_err, "Database error");
                Self::internal(db_err.to_string())
            }
        }
    }
}

impl From<TrackingError> for ApiError {
    fn from(error: TrackingError) -> Self {
        match error {
            TrackingError::MissingField { .. } | TrackingError::Validation(_) => {
                Self::validation(error.to_string())
            }
            TrackingError::NotFound(message) => Self::not_found(message),
            TrackingError::Persistence(repo_err) => repo_err.into(),
        }
    }
}

impl From<NormalizationError> for ApiError {
    fn from(error: NormalizationError) -> Self {
        Self::validation(error.to_string())
    }
}
