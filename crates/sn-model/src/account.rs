//! Account domain model.
//!
//! Accounts are the identity entities of the service. Each account carries
//! its password hash, a role, and the lockout bookkeeping that the
//! authentication layer mutates around login attempts.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Account role.
///
/// Serialized and persisted as `"USER"` / `"ADMIN"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    /// Regular account.
    User,
    /// Administrator account.
    Admin,
}

impl Role {
    /// Returns the canonical string form.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::User => "USER",
            Self::Admin => "ADMIN",
        }
    }

    /// Parses the canonical string form.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "USER" => Some(Self::User),
            "ADMIN" => Some(Self::Admin),
            _ => None,
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An account with credential and lockout state.
///
/// Invariants maintained by the authentication layer:
/// - `locked == true` implies `locked_at.is_some()`
/// - `failed_attempts == 0` whenever `locked == false` and no login
///   attempt is in flight
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    /// Unique identifier.
    pub id: Uuid,
    /// Unique identity, trimmed and lower-cased.
    pub email: String,
    /// Adaptive password hash (PHC string). Never exposed outward.
    pub password_hash: String,
    /// Account role.
    pub role: Role,
    /// Consecutive failed login attempts. Non-negative.
    pub failed_attempts: i32,
    /// Whether the account is temporarily locked.
    pub locked: bool,
    /// Set exactly when `locked` transitions false to true, cleared when
    /// the lock lifts.
    pub locked_at: Option<DateTime<Utc>>,
    /// When the account was created.
    pub created_at: DateTime<Utc>,
    /// When the account was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Account {
    /// Creates a new unlocked account.
    #[must_use]
    pub fn new(email: impl Into<String>, password_hash: impl Into<String>, role: Role) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            email: email.into(),
            password_hash: password_hash.into(),
            role,
            failed_attempts: 0,
            locked: false,
            locked_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Normalizes a raw identity string: trims whitespace and lower-cases.
    #[must_use]
    pub fn normalize_email(raw: &str) -> String {
        raw.trim().to_ascii_lowercase()
    }

    /// Clears all lockout state, restoring the unlocked invariant.
    pub fn clear_lock(&mut self) {
        self.failed_attempts = 0;
        self.locked = false;
        self.locked_at = None;
    }

    /// Checks if this account has the administrator role.
    #[must_use]
    pub const fn is_admin(&self) -> bool {
        matches!(self.role, Role::Admin)
    }
}
