//! Unified error types for the Built API
//!
//! This module defines error types for each layer:
//! - `DomainError`: Core business logic and persistence errors
//! - `AppError`: Application layer errors (wraps domain errors for HTTP responses)
//!
//! Every `AppError` renders as the JSON error envelope and tags the response
//! with a [`FailureRecord`] so the failure can be written to the activity log.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

/// Detail shown to clients for any 5xx response
pub const INTERNAL_DETAIL: &str = "An unhandled critical error occurred.";

/// Domain layer errors - pure business logic errors
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Entity not found: {0}")]
    NotFound(String),

    #[error("Entity already exists: {0}")]
    AlreadyExists(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Application layer errors - used by HTTP handlers
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Domain(#[from] DomainError),

    /// Request validation failures, one message per offending field
    #[error("Validation error: {}", .0.join(" | "))]
    Validation(Vec<String>),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn validation(message: impl Into<String>) -> Self {
        AppError::Validation(vec![message.into()])
    }

    /// Status, title and client-facing details for this error
    fn describe(&self) -> (StatusCode, &'static str, Vec<String>) {
        match self {
            AppError::Domain(DomainError::NotFound(msg)) | AppError::NotFound(msg) => {
                (StatusCode::NOT_FOUND, "Not Found", vec![msg.clone()])
            }
            AppError::Domain(DomainError::AlreadyExists(msg))
            | AppError::Domain(DomainError::Conflict(msg)) => {
                (StatusCode::CONFLICT, "Conflict", vec![msg.clone()])
            }
            AppError::Domain(DomainError::Validation(msg)) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "Validation Error",
                vec![msg.clone()],
            ),
            AppError::Validation(messages) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "Validation Error",
                messages.clone(),
            ),
            AppError::Domain(DomainError::Unauthorized(msg)) | AppError::Unauthorized(msg) => {
                (StatusCode::UNAUTHORIZED, "Unauthorized", vec![msg.clone()])
            }
            AppError::Domain(DomainError::Forbidden(msg)) | AppError::Forbidden(msg) => {
                (StatusCode::FORBIDDEN, "Forbidden", vec![msg.clone()])
            }
            AppError::Domain(DomainError::Database(_))
            | AppError::Domain(DomainError::Internal(_))
            | AppError::Internal(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal Server Error",
                vec![INTERNAL_DETAIL.to_string()],
            ),
        }
    }

    /// Short name of the error kind, recorded with server-side failures
    pub fn class(&self) -> &'static str {
        match self {
            AppError::Domain(DomainError::NotFound(_)) => "NotFound",
            AppError::Domain(DomainError::AlreadyExists(_)) => "AlreadyExists",
            AppError::Domain(DomainError::Validation(_)) => "Validation",
            AppError::Domain(DomainError::Database(_)) => "Database",
            AppError::Domain(DomainError::Unauthorized(_)) => "Unauthorized",
            AppError::Domain(DomainError::Forbidden(_)) => "Forbidden",
            AppError::Domain(DomainError::Conflict(_)) => "Conflict",
            AppError::Domain(DomainError::Internal(_)) => "Internal",
            AppError::Validation(_) => "Validation",
            AppError::Unauthorized(_) => "Unauthorized",
            AppError::Forbidden(_) => "Forbidden",
            AppError::NotFound(_) => "NotFound",
            AppError::Internal(_) => "Internal",
        }
    }
}

/// One entry of the error envelope
#[derive(Debug, Serialize)]
pub struct ErrorDescription {
    pub id: Uuid,
    pub status: u16,
    pub title: String,
    pub detail: String,
    pub context: Option<String>,
}

/// Error envelope: `{"result": "error", "errors": [...]}`
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub result: &'static str,
    pub errors: Vec<ErrorDescription>,
}

impl ErrorResponse {
    pub fn new(status: StatusCode, title: &str, details: &[String]) -> Self {
        Self {
            result: "error",
            errors: details
                .iter()
                .map(|detail| ErrorDescription {
                    id: Uuid::new_v4(),
                    status: status.as_u16(),
                    title: title.to_string(),
                    detail: detail.clone(),
                    context: None,
                })
                .collect(),
        }
    }
}

/// Attached to every error response; consumed by the failure-recording middleware
#[derive(Debug, Clone)]
pub struct FailureRecord {
    pub title: String,
    pub detail: String,
    pub error_class: &'static str,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, title, details) = self.describe();

        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        }

        let record = FailureRecord {
            title: title.to_string(),
            detail: details.join(" | "),
            error_class: self.class(),
        };

        let mut response = (status, Json(ErrorResponse::new(status, title, &details))).into_response();
        response.extensions_mut().insert(record);
        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn domain_not_found_maps_to_404() {
        let response = AppError::from(DomainError::NotFound("Task x".into())).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let record = response.extensions().get::<FailureRecord>().unwrap();
        assert_eq!(record.title, "Not Found");
        assert_eq!(record.detail, "Task x");
    }

    #[test]
    fn conflicts_map_to_409() {
        let response = AppError::from(DomainError::Conflict("dup".into())).into_response();
        assert_eq!(response.status(), StatusCode::CONFLICT);
        let response = AppError::from(DomainError::AlreadyExists("dup".into())).into_response();
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }

    #[test]
    fn validation_maps_to_422_with_one_entry_per_message() {
        let err = AppError::Validation(vec!["a".into(), "b".into()]);
        let (status, title, details) = err.describe();
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(title, "Validation Error");
        assert_eq!(details.len(), 2);

        let body = ErrorResponse::new(status, title, &details);
        assert_eq!(body.result, "error");
        assert_eq!(body.errors.len(), 2);
        assert_eq!(body.errors[1].status, 422);
    }

    #[test]
    fn database_errors_hide_their_message() {
        let err = AppError::from(DomainError::Database("connection refused".into()));
        let (status, title, details) = err.describe();
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(title, "Internal Server Error");
        assert_eq!(details, vec![INTERNAL_DETAIL.to_string()]);
        assert_eq!(err.class(), "Database");
    }

    #[test]
    fn auth_errors() {
        let (status, _, _) = AppError::Unauthorized("Invalid credentials".into()).describe();
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        let (status, _, _) = AppError::Forbidden("Account is not active".into()).describe();
        assert_eq!(status, StatusCode::FORBIDDEN);
    }

    #[test]
    fn validation_display_joins_messages() {
        let err = AppError::Validation(vec!["x".into(), "y".into()]);
        assert_eq!(err.to_string(), "Validation error: x | y");
    }
}
