//! Unified error handling
//!
//! Application-level error type and the response envelope:
//! - [`AppError`] - application error enum
//! - [`AppResponse`] - API response structure
//!
//! # Error codes
//!
//! | Code | Meaning |
//! |------|---------|
//! | E0002 | validation failed |
//! | E0003 | resource not found |
//! | E0006 | invalid request |
//! | E9001 | internal error |
//! | E9002 | database error |
//!
//! # Usage
//!
//! ```ignore
//! // handlers return AppResult<Json<T>>, errors render as the envelope
//! Err(AppError::not_found("Customer 7"))
//! ```

use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use tracing::error;

use crate::db::repository::RepoError;

/// API error envelope
///
/// ```json
/// {
///   "code": "E0003",
///   "message": "Customer 7 not found"
/// }
/// ```
#[derive(Debug, Serialize)]
pub struct AppResponse<T> {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

/// Application error enum
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Resource not found: {0}")]
    /// 404
    NotFound(String),

    #[error("Validation failed: {0}")]
    /// 400
    Validation(String),

    #[error("Database error: {0}")]
    /// 500
    Database(String),

    #[error("Internal server error: {0}")]
    /// 500
    Internal(String),

    #[error("Invalid request: {0}")]
    /// 400
    Invalid(String),
}

impl AppError {
    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::NotFound(resource.into())
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn database(message: impl Into<String>) -> Self {
        Self::Database(message.into())
    }

    /// HTTP status for this error
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Validation(_) | AppError::Invalid(_) => StatusCode::BAD_REQUEST,
            AppError::Database(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let (code, message) = match &self {
            AppError::NotFound(msg) => ("E0003", msg.as_str()),
            AppError::Validation(msg) => ("E0002", msg.as_str()),
            AppError::Invalid(msg) => ("E0006", msg.as_str()),

            // details stay in the log, clients get a generic message
            AppError::Database(msg) => {
                error!(target: "database", error = %msg, "Database error occurred");
                ("E9002", "Database error")
            }
            AppError::Internal(msg) => {
                error!(target: "internal", error = %msg, "Internal error occurred");
                ("E9001", "Internal server error")
            }
        };

        let body = Json(AppResponse::<()> {
            code: code.to_string(),
            message: message.to_string(),
            data: None,
        });

        (status, body).into_response()
    }
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound(msg) => AppError::NotFound(msg),
            RepoError::Validation(msg) => AppError::Validation(msg),
            RepoError::Database(msg) => AppError::Database(msg),
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::Invalid(rejection.body_text())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::Invalid(rejection.body_text())
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::Invalid(rejection.body_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repo_errors_map_to_status() {
        let not_found: AppError = RepoError::NotFound("Customer 1 not found".into()).into();
        assert_eq!(not_found.status(), StatusCode::NOT_FOUND);

        let invalid: AppError = RepoError::Validation("num_guests".into()).into();
        assert_eq!(invalid.status(), StatusCode::BAD_REQUEST);

        let db: AppError = RepoError::Database("locked".into()).into();
        assert_eq!(db.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_into_response_status() {
        let response = AppError::not_found("Customer 9").into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response = AppError::database("disk full").into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
