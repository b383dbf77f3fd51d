//! Note storage provider trait.

use async_trait::async_trait;
use sn_model::Note;
use uuid::Uuid;

use crate::error::StorageResult;

/// Provider for note storage operations.
///
/// Retrieval by ID is unfiltered; callers enforce ownership against
/// [`Note::owner`] before acting on the record.
#[async_trait]
pub trait NoteProvider: Send + Sync {
    /// Creates a new note.
    async fn create(&self, note: &Note) -> StorageResult<()>;

    /// Gets a note by ID.
    async fn get_by_id(&self, id: Uuid) -> StorageResult<Option<Note>>;

    /// Lists all notes belonging to the given owner, ordered by creation
    /// time.
    async fn list_by_owner(&self, owner: &str) -> StorageResult<Vec<Note>>;

    /// Updates an existing note.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if the note doesn't exist.
    async fn update(&self, note: &Note) -> StorageResult<()>;

    /// Deletes a note by ID.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if the note doesn't exist.
    async fn delete(&self, id: Uuid) -> StorageResult<()>;
}
