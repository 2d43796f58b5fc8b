//! # API Error Type
//!
//! Unified error type for HTTP handlers.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow                                           │
//! │                                                                         │
//! │  ValidationError (stockroom-core) ──────────► 422 VALIDATION_ERROR     │
//! │  DbError::NotFound ─────────────────────────► 404 NOT_FOUND            │
//! │  DbError::UniqueViolation ──────────────────► 409 CONFLICT             │
//! │  DbError::* (storage/unexpected) ───────────► 500 INTERNAL             │
//! │                                                                         │
//! │  Internal details are logged, never surfaced; the client receives      │
//! │  a machine-readable code and a human-readable message:                 │
//! │    {"code": "NOT_FOUND", "message": "Product not found: 42"}           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use stockroom_core::ValidationError;
use stockroom_db::DbError;

/// API error returned from handlers.
#[derive(Debug, Clone, Serialize)]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling.
    pub code: ErrorCode,

    /// Human-readable error message for display.
    pub message: String,
}

/// Error codes for API responses.
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Resource not found (404).
    NotFound,

    /// Duplicate SKU (409).
    Conflict,

    /// Input validation failed (422).
    ValidationError,

    /// Storage or unexpected failure (500).
    Internal,
}

impl ErrorCode {
    fn status(self) -> StatusCode {
        match self {
            ErrorCode::NotFound => StatusCode::NOT_FOUND,
            ErrorCode::Conflict => StatusCode::CONFLICT,
            ErrorCode::ValidationError => StatusCode::UNPROCESSABLE_ENTITY,
            ErrorCode::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    /// Creates a not found error.
    pub fn not_found(resource: &str, id: impl std::fmt::Display) -> Self {
        ApiError::new(ErrorCode::NotFound, format!("{resource} not found: {id}"))
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }

    /// Creates a conflict error.
    pub fn conflict(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Conflict, message)
    }

    /// Creates an internal error with a generic client-facing message.
    pub fn internal() -> Self {
        ApiError::new(ErrorCode::Internal, "internal server error")
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.code.status(), Json(self)).into_response()
    }
}

/// Converts database errors to API errors.
impl From<DbError> for ApiError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound { entity, id } => ApiError::not_found(entity, id),
            DbError::UniqueViolation { .. } => ApiError::conflict(err.to_string()),
            other => {
                // Log the actual error but return a generic message.
                tracing::error!(error = %other, "database operation failed");
                ApiError::internal()
            }
        }
    }
}

/// Converts field validation errors to API errors.
impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::validation(err.to_string())
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_db_error_mapping() {
        let err: ApiError = DbError::not_found("Product", 42).into();
        assert!(matches!(err.code, ErrorCode::NotFound));
        assert_eq!(err.message, "Product not found: 42");

        let err: ApiError = DbError::duplicate("sku", "A1").into();
        assert!(matches!(err.code, ErrorCode::Conflict));

        let err: ApiError = DbError::QueryFailed("boom".to_string()).into();
        assert!(matches!(err.code, ErrorCode::Internal));
        // Internal details stay out of the response body.
        assert!(!err.message.contains("boom"));
    }

    #[test]
    fn test_error_code_serializes_screaming() {
        let json = serde_json::to_value(ApiError::conflict("dup")).unwrap();
        assert_eq!(json["code"], "CONFLICT");
    }
}
