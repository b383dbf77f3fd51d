//! Token error types.

use thiserror::Error;

/// Errors that can occur during token operations.
///
/// Validation failures deliberately collapse into a single
/// [`TokenError::Invalid`] variant: callers never learn whether the tag,
/// the structure, or the expiry was at fault.
#[derive(Debug, Error)]
pub enum TokenError {
    /// The signing key is shorter than the required minimum.
    #[error("signing key must be at least {min} bytes, got {actual}")]
    KeyTooShort {
        /// Required minimum key length.
        min: usize,
        /// Provided key length.
        actual: usize,
    },

    /// Token signing failed.
    #[error("token signing failed: {0}")]
    Signing(String),

    /// The token is malformed, tampered with, or expired.
    #[error("invalid or expired token")]
    Invalid,
}

/// Result type for token operations.
pub type TokenResult<T> = Result<T, TokenError>;
