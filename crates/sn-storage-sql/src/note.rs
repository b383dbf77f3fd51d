//! `PostgreSQL` implementation of the note storage provider.

use async_trait::async_trait;
use sn_model::Note;
use sn_storage::{NoteProvider, StorageError, StorageResult};
use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::NoteRow;
use crate::error::from_sqlx_error;

/// `PostgreSQL` note storage provider.
pub struct PgNoteProvider {
    pool: PgPool,
}

impl PgNoteProvider {
    /// Creates a new `PostgreSQL` note provider.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl NoteProvider for PgNoteProvider {
    async fn create(&self, note: &Note) -> StorageResult<()> {
        sqlx::query(
            r"INSERT INTO notes (id, title, content, owner, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6)",
        )
        .bind(note.id)
        .bind(&note.title)
        .bind(&note.content)
        .bind(&note.owner)
        .bind(note.created_at)
        .bind(note.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| from_sqlx_error("note", e))?;

        Ok(())
    }

    async fn get_by_id(&self, id: Uuid) -> StorageResult<Option<Note>> {
        let row: Option<NoteRow> = sqlx::query_as("SELECT * FROM notes WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| from_sqlx_error("note", e))?;

        Ok(row.map(Note::from))
    }

    async fn list_by_owner(&self, owner: &str) -> StorageResult<Vec<Note>> {
        let rows: Vec<NoteRow> =
            sqlx::query_as("SELECT * FROM notes WHERE owner = $1 ORDER BY created_at")
                .bind(owner)
                .fetch_all(&self.pool)
                .await
                .map_err(|e| from_sqlx_error("note", e))?;

        Ok(rows.into_iter().map(Note::from).collect())
    }

    async fn update(&self, note: &Note) -> StorageResult<()> {
        let result = sqlx::query(
            r"UPDATE notes SET title = $2, content = $3, updated_at = $4
            WHERE id = $1",
        )
        .bind(note.id)
        .bind(&note.title)
        .bind(&note.content)
        .bind(note.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| from_sqlx_error("note", e))?;

        if result.rows_affected() == 0 {
            return Err(StorageError::not_found("note"));
        }

        Ok(())
    }

    async fn delete(&self, id: Uuid) -> StorageResult<()> {
        let result = sqlx::query("DELETE FROM notes WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| from_sqlx_error("note", e))?;

        if result.rows_affected() == 0 {
            return Err(StorageError::not_found("note"));
        }

        Ok(())
    }
}
