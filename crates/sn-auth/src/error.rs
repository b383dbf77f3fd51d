//! Authentication error taxonomy.

use sn_storage::StorageError;
use sn_token::TokenError;
use thiserror::Error;

/// Authentication operation errors.
///
/// Every failure a login or registration can produce is expressed here;
/// nothing from this taxonomy crosses into collaborator components.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Malformed user input (e.g. invalid email syntax).
    #[error("validation error: {0}")]
    Validation(String),

    /// Password fails the complexity predicate.
    #[error("weak password: {0}")]
    WeakPassword(String),

    /// The identity is already registered.
    #[error("identity is already registered")]
    DuplicateIdentity,

    /// No account exists for the submitted identity.
    #[error("unknown identity")]
    UnknownIdentity,

    /// Password did not match.
    #[error("invalid credentials ({failed_attempts} failed attempts)")]
    InvalidCredentials {
        /// Consecutive failures recorded so far, including this one.
        failed_attempts: i32,
    },

    /// The account is temporarily locked.
    #[error("account is locked, retry in {retry_after_secs}s")]
    LockedOut {
        /// Seconds until the lock auto-expires.
        retry_after_secs: i64,
    },

    /// The bearer token is missing, malformed, tampered with, or expired.
    #[error("invalid or expired token")]
    TokenInvalid,

    /// Storage layer failure.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    /// Internal error.
    #[error("internal authentication error: {0}")]
    Internal(String),
}

impl From<TokenError> for AuthError {
    fn from(err: TokenError) -> Self {
        match err {
            TokenError::Invalid => Self::TokenInvalid,
            TokenError::KeyTooShort { .. } | TokenError::Signing(_) => {
                Self::Internal(err.to_string())
            }
        }
    }
}

/// Result type for authentication operations.
pub type AuthResult<T> = Result<T, AuthError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_validation_failure_maps_to_token_invalid() {
        let err = AuthError::from(TokenError::Invalid);
        assert!(matches!(err, AuthError::TokenInvalid));
    }

    #[test]
    fn token_signing_failure_maps_to_internal() {
        let err = AuthError::from(TokenError::Signing("boom".to_string()));
        assert!(matches!(err, AuthError::Internal(_)));
    }

    #[test]
    fn display_carries_attempt_count() {
        let err = AuthError::InvalidCredentials { failed_attempts: 3 };
        assert!(err.to_string().contains('3'));
    }
}
