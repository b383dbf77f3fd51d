//! Session token claims.

use serde::{Deserialize, Serialize};
use sn_model::Role;

/// Claims carried by a session token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Subject: the normalized account email.
    pub sub: String,
    /// Role claim.
    pub role: Role,
    /// Issued-at, seconds since the Unix epoch.
    pub iat: i64,
    /// Expiry, seconds since the Unix epoch.
    pub exp: i64,
}

impl SessionClaims {
    /// Creates claims for the given subject.
    #[must_use]
    pub fn new(sub: impl Into<String>, role: Role, iat: i64, exp: i64) -> Self {
        Self {
            sub: sub.into(),
            role,
            iat,
            exp,
        }
    }
}
