//! Password hashing and complexity checks.

use crate::error::{AuthError, AuthResult};

/// Registration-time password complexity predicate.
///
/// A password is acceptable when it is at least [`PasswordPolicy::MIN_LEN`]
/// characters long and contains an uppercase letter, a lowercase letter,
/// and a digit.
#[derive(Debug, Clone, Copy, Default)]
pub struct PasswordPolicy;

impl PasswordPolicy {
    /// Minimum acceptable length, in characters.
    pub const MIN_LEN: usize = 10;

    /// Checks the candidate password against the policy.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::WeakPassword`] naming the first unmet
    /// requirement.
    pub fn check(&self, candidate: &str) -> AuthResult<()> {
        if candidate.chars().count() < Self::MIN_LEN {
            return Err(AuthError::WeakPassword(format!(
                "must be at least {} characters",
                Self::MIN_LEN
            )));
        }
        if !candidate.chars().any(|c| c.is_ascii_uppercase()) {
            return Err(AuthError::WeakPassword(
                "must contain an uppercase letter".to_string(),
            ));
        }
        if !candidate.chars().any(|c| c.is_ascii_lowercase()) {
            return Err(AuthError::WeakPassword(
                "must contain a lowercase letter".to_string(),
            ));
        }
        if !candidate.chars().any(|c| c.is_ascii_digit()) {
            return Err(AuthError::WeakPassword(
                "must contain a digit".to_string(),
            ));
        }
        Ok(())
    }
}

/// Bcrypt password hashing and verification.
///
/// Hashing runs on the blocking thread pool; at the default cost a
/// single hash takes long enough to stall an async worker.
#[derive(Debug, Clone, Copy)]
pub struct PasswordVerifier {
    cost: u32,
}

impl PasswordVerifier {
    /// Creates a verifier with the given bcrypt cost factor.
    #[must_use]
    pub const fn new(cost: u32) -> Self {
        Self { cost }
    }

    /// Creates a verifier with the production cost factor (12).
    #[must_use]
    pub const fn with_defaults() -> Self {
        Self::new(bcrypt::DEFAULT_COST)
    }

    /// Returns the configured cost factor.
    #[must_use]
    pub const fn cost(&self) -> u32 {
        self.cost
    }

    /// Hashes a password synchronously on the current thread.
    ///
    /// Prefer [`PasswordVerifier::hash`] inside async code; this variant
    /// exists for construction-time work such as precomputing a dummy
    /// hash.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Internal`] if hashing fails.
    pub fn hash_blocking(&self, password: &str) -> AuthResult<String> {
        bcrypt::hash(password, self.cost).map_err(|e| AuthError::Internal(e.to_string()))
    }

    /// Hashes a password on the blocking thread pool.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Internal`] if hashing fails or the blocking
    /// task is cancelled.
    pub async fn hash(&self, password: &str) -> AuthResult<String> {
        let password = password.to_string();
        let cost = self.cost;
        tokio::task::spawn_blocking(move || {
            bcrypt::hash(password, cost).map_err(|e| AuthError::Internal(e.to_string()))
        })
        .await
        .map_err(|e| AuthError::Internal(e.to_string()))?
    }

    /// Verifies a password against a stored hash on the blocking thread
    /// pool.
    ///
    /// A malformed stored hash counts as a non-match rather than an
    /// error, so a corrupt row degrades to a failed login instead of a
    /// 500.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Internal`] if the blocking task is cancelled.
    pub async fn verify(&self, password: &str, stored_hash: &str) -> AuthResult<bool> {
        let password = password.to_string();
        let stored_hash = stored_hash.to_string();
        tokio::task::spawn_blocking(move || match bcrypt::verify(password, &stored_hash) {
            Ok(matched) => Ok(matched),
            Err(e) => {
                tracing::warn!(error = %e, "stored password hash is malformed");
                Ok(false)
            }
        })
        .await
        .map_err(|e| AuthError::Internal(e.to_string()))?
    }
}

impl Default for PasswordVerifier {
    fn default() -> Self {
        Self::with_defaults()
    }
}
