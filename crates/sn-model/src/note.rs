//! Note domain model.
//!
//! Notes are owned records; every access path is filtered by the owning
//! identity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Maximum note title length in characters.
pub const MAX_TITLE_LEN: usize = 100;

/// Maximum note content length in characters.
pub const MAX_CONTENT_LEN: usize = 500;

/// A note bound to a single owner.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Note {
    /// Unique identifier.
    pub id: Uuid,
    /// Note title (at most [`MAX_TITLE_LEN`] characters).
    pub title: String,
    /// Note body (at most [`MAX_CONTENT_LEN`] characters).
    pub content: String,
    /// Normalized email of the owning account.
    pub owner: String,
    /// When the note was created.
    pub created_at: DateTime<Utc>,
    /// When the note was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Note {
    /// Creates a new note for the given owner.
    #[must_use]
    pub fn new(
        title: impl Into<String>,
        content: impl Into<String>,
        owner: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            title: title.into(),
            content: content.into(),
            owner: owner.into(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Checks whether the given identity owns this note.
    #[must_use]
    pub fn is_owned_by(&self, identity: &str) -> bool {
        self.owner == identity
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ownership_check() {
        let note = Note::new("groceries", "milk, eggs", "alice@example.com");

        assert!(note.is_owned_by("alice@example.com"));
        assert!(!note.is_owned_by("bob@example.com"));
    }
}
