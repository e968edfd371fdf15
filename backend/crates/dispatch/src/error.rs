//! Dispatch Error Types

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

/// Dispatch-specific result type alias
pub type DispatchResult<T> = Result<T, DispatchError>;

/// Dispatch-specific error variants
#[derive(Debug, Error)]
pub enum DispatchError {
    /// Record missing, or owned by someone else (indistinguishable on
    /// owner-scoped lookups)
    #[error("{0} not found")]
    NotFound(&'static str),

    /// Caller may not act on this record
    #[error("Not authorized to modify this record")]
    Forbidden,

    /// Request payload or query failed validation
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl DispatchError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            DispatchError::NotFound(_) => StatusCode::NOT_FOUND,
            DispatchError::Forbidden => StatusCode::FORBIDDEN,
            DispatchError::Validation(_) => StatusCode::BAD_REQUEST,
            DispatchError::Database(_) | DispatchError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            DispatchError::NotFound(_) => ErrorKind::NotFound,
            DispatchError::Forbidden => ErrorKind::Forbidden,
            DispatchError::Validation(_) => ErrorKind::BadRequest,
            DispatchError::Database(_) | DispatchError::Internal(_) => {
                ErrorKind::InternalServerError
            }
        }
    }

    /// Convert to AppError
    pub fn to_app_error(&self) -> AppError {
        match self {
            DispatchError::Database(_) | DispatchError::Internal(_) => {
                AppError::new(self.kind(), "Internal server error")
            }
            _ => AppError::new(self.kind(), self.to_string()),
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            DispatchError::Database(e) => {
                tracing::error!(error = %e, "Dispatch database error");
            }
            DispatchError::Internal(msg) => {
                tracing::error!(message = %msg, "Dispatch internal error");
            }
            _ => {
                tracing::debug!(error = %self, "Dispatch error");
            }
        }
    }
}

impl IntoResponse for DispatchError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

impl From<AppError> for DispatchError {
    fn from(err: AppError) -> Self {
        match err.kind() {
            ErrorKind::BadRequest => DispatchError::Validation(err.message().to_string()),
            _ => DispatchError::Internal(err.to_string()),
        }
    }
}
