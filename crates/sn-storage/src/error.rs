//! Storage error types.

use thiserror::Error;

/// Errors that can occur during storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Entity not found.
    #[error("{entity} not found")]
    NotFound {
        /// Type of entity (e.g., "account", "note").
        entity: &'static str,
    },

    /// Duplicate entity (unique constraint violation).
    #[error("duplicate {entity}: {detail}")]
    Duplicate {
        /// Type of entity.
        entity: &'static str,
        /// Description of the conflict.
        detail: String,
    },

    /// Database connection error.
    #[error("database connection error: {0}")]
    Connection(String),

    /// Database query error.
    #[error("database query error: {0}")]
    Query(String),

    /// Internal storage error.
    #[error("internal storage error: {0}")]
    Internal(String),
}

impl StorageError {
    /// Creates a not found error for an entity type.
    #[must_use]
    pub const fn not_found(entity: &'static str) -> Self {
        Self::NotFound { entity }
    }

    /// Creates a duplicate error.
    #[must_use]
    pub fn duplicate(entity: &'static str, detail: impl Into<String>) -> Self {
        Self::Duplicate {
            entity,
            detail: detail.into(),
        }
    }

    /// Checks if this is a not found error.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Checks if this is a duplicate error.
    #[must_use]
    pub const fn is_duplicate(&self) -> bool {
        matches!(self, Self::Duplicate { .. })
    }
}

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;
