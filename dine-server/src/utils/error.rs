//! Unified error handling
//!
//! Application-level error type and response structure:
//! - [`AppError`] - application error enum
//! - [`ApiResponse`] - error payload returned to clients
//!
//! # Error code ranges
//!
//! | Prefix | Category | Example |
//! |--------|----------|---------|
//! | E0xxx  | General  | E0003 not found |
//! | E2xxx  | Permission | E2001 forbidden |
//! | E3xxx  | Authentication | E3001 not logged in |
//! | E4xxx  | Order lifecycle | E4002 order locked |
//! | E5xxx  | Billing | E5002 bill already exists |
//! | E7xxx  | Table lifecycle | E7001 table unavailable |
//! | E9xxx  | System | E9002 database error |

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use tracing::error;

use crate::db::repository::RepoError;
use crate::lifecycle::LifecycleError;

/// Error payload returned to clients
///
/// ```json
/// {
///   "code": "E0003",
///   "message": "Table 7 not found"
/// }
/// ```
#[derive(Debug, Serialize)]
pub struct ApiResponse {
    pub code: &'static str,
    pub message: String,
}

/// Application error enum
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    // ========== Authentication errors (401) ==========
    #[error("Authentication required")]
    Unauthorized,

    #[error("Token expired")]
    TokenExpired,

    #[error("Invalid token")]
    InvalidToken,

    // ========== Permission errors (403) ==========
    #[error("Permission denied: {0}")]
    Forbidden(String),

    // ========== Business logic errors (4xx) ==========
    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Invalid transition: {0}")]
    InvalidTransition(String),

    #[error("Order locked: {0}")]
    OrderLocked(String),

    #[error("Order not served: {0}")]
    OrderNotServed(String),

    #[error("Bill already exists: {0}")]
    BillAlreadyExists(String),

    #[error("Table unavailable: {0}")]
    TableUnavailable(String),

    // ========== System errors (5xx) ==========
    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn forbidden(msg: impl Into<String>) -> Self {
        Self::Forbidden(msg.into())
    }

    pub fn database(msg: impl Into<String>) -> Self {
        Self::Database(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    fn parts(&self) -> (StatusCode, &'static str) {
        match self {
            AppError::Unauthorized => (StatusCode::UNAUTHORIZED, "E3001"),
            AppError::InvalidToken => (StatusCode::UNAUTHORIZED, "E3002"),
            AppError::TokenExpired => (StatusCode::UNAUTHORIZED, "E3003"),
            AppError::Forbidden(_) => (StatusCode::FORBIDDEN, "E2001"),
            AppError::NotFound(_) => (StatusCode::NOT_FOUND, "E0003"),
            AppError::Conflict(_) => (StatusCode::CONFLICT, "E0004"),
            AppError::Validation(_) => (StatusCode::BAD_REQUEST, "E0002"),
            AppError::InvalidTransition(_) => (StatusCode::UNPROCESSABLE_ENTITY, "E4001"),
            AppError::OrderLocked(_) => (StatusCode::UNPROCESSABLE_ENTITY, "E4002"),
            AppError::OrderNotServed(_) => (StatusCode::UNPROCESSABLE_ENTITY, "E5001"),
            AppError::BillAlreadyExists(_) => (StatusCode::CONFLICT, "E5002"),
            AppError::TableUnavailable(_) => (StatusCode::UNPROCESSABLE_ENTITY, "E7001"),
            AppError::Database(_) => (StatusCode::INTERNAL_SERVER_ERROR, "E9002"),
            AppError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "E9001"),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = self.parts();

        // Server-side faults get logged with full detail; the client sees a
        // generic message.
        let message = if status.is_server_error() {
            error!(code = code, "{}", self);
            "Internal server error".to_string()
        } else {
            self.to_string()
        };

        (status, Json(ApiResponse { code, message })).into_response()
    }
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound(msg) => AppError::NotFound(msg),
            RepoError::Duplicate(msg) => AppError::Conflict(msg),
            RepoError::Conflict(msg) => AppError::Conflict(msg),
            RepoError::Validation(msg) => AppError::Validation(msg),
            RepoError::Database(msg) => AppError::Database(msg),
            RepoError::Lifecycle(e) => e.into(),
        }
    }
}

impl From<LifecycleError> for AppError {
    fn from(err: LifecycleError) -> Self {
        match err {
            LifecycleError::InvalidTransition { .. } => {
                AppError::InvalidTransition(err.to_string())
            }
            LifecycleError::TableUnavailable(msg) => AppError::TableUnavailable(msg),
            LifecycleError::OrderLocked(msg) => AppError::OrderLocked(msg),
            LifecycleError::OrderNotServed(msg) => AppError::OrderNotServed(msg),
            LifecycleError::BillAlreadyExists(msg) => AppError::BillAlreadyExists(msg),
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::Validation(err.to_string())
    }
}

/// Result type for API handlers
pub type AppResult<T> = Result<T, AppError>;
