//! API error types.
//!
//! Maps the layer errors to HTTP responses with stable machine-readable
//! error codes.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use sn_auth::AuthError;
use sn_storage::StorageError;
use thiserror::Error;

/// Errors surfaced by the HTTP layer.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Authentication layer error.
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// Storage layer error.
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// Invalid request payload (e.g. note limits).
    #[error("validation error: {0}")]
    Validation(String),

    /// The caller lacks the role or ownership for the resource.
    #[error("access denied")]
    Forbidden,

    /// The resource does not exist.
    #[error("{0} not found")]
    NotFound(&'static str),
}

impl ApiError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::Auth(err) => match err {
                AuthError::Validation(_)
                | AuthError::WeakPassword(_)
                | AuthError::DuplicateIdentity => StatusCode::BAD_REQUEST,
                AuthError::UnknownIdentity
                | AuthError::InvalidCredentials { .. }
                | AuthError::TokenInvalid => StatusCode::UNAUTHORIZED,
                AuthError::LockedOut { .. } => StatusCode::FORBIDDEN,
                AuthError::Storage(_) | AuthError::Internal(_) => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            },
            Self::Storage(err) => match err {
                StorageError::NotFound { .. } => StatusCode::NOT_FOUND,
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            },
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
        }
    }

    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::Auth(err) => match err {
                AuthError::Validation(_) => "validation_error",
                AuthError::WeakPassword(_) => "weak_password",
                AuthError::DuplicateIdentity => "duplicate_identity",
                AuthError::UnknownIdentity => "unknown_identity",
                AuthError::InvalidCredentials { .. } => "invalid_credentials",
                AuthError::LockedOut { .. } => "locked_out",
                AuthError::TokenInvalid => "token_invalid",
                AuthError::Storage(_) | AuthError::Internal(_) => "internal_error",
            },
            Self::Storage(err) => match err {
                StorageError::NotFound { .. } => "not_found",
                _ => "internal_error",
            },
            Self::Validation(_) => "validation_error",
            Self::Forbidden => "forbidden",
            Self::NotFound(_) => "not_found",
        }
    }
}

/// API error response body.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling.
    pub error: String,
    /// Human-readable error message.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_description: Option<String>,
    /// Failed attempt count, on `invalid_credentials`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failed_attempts: Option<i32>,
    /// Seconds until the lock expires, on `locked_out`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retry_after_secs: Option<i64>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        // Internal failures are logged server-side and never leak detail.
        let description = if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!(error = %self, "internal error");
            "internal error".to_string()
        } else {
            self.to_string()
        };

        let (failed_attempts, retry_after_secs) = match &self {
            Self::Auth(AuthError::InvalidCredentials { failed_attempts }) => {
                (Some(*failed_attempts), None)
            }
            Self::Auth(AuthError::LockedOut { retry_after_secs }) => {
                (None, Some(*retry_after_secs))
            }
            _ => (None, None),
        };

        let body = ErrorResponse {
            error: self.error_code().to_string(),
            error_description: Some(description),
            failed_attempts,
            retry_after_secs,
        };

        (status, Json(body)).into_response()
    }
}

/// Result type for API handlers.
pub type ApiResult<T> = Result<T, ApiError>;
