//! Database entity types for `SQLx`.
//!
//! These types map directly to database rows and are converted to and
//! from domain models. Roles are stored as their canonical text form; a
//! row with an unrecognized role is surfaced as an internal error rather
//! than silently coerced.

use chrono::{DateTime, Utc};
use sn_model::{Account, Note, Role};
use sn_storage::{StorageError, StorageResult};
use sqlx::FromRow;
use uuid::Uuid;

/// Database row for accounts.
#[derive(Debug, Clone, FromRow)]
pub struct AccountRow {
    pub id: Uuid,
    pub email: String,
    pub password_hash: String,
    pub role: String,
    pub failed_attempts: i32,
    pub locked: bool,
    pub locked_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl AccountRow {
    pub fn into_account(self) -> StorageResult<Account> {
        let role = Role::parse(&self.role)
            .ok_or_else(|| StorageError::Internal(format!("unknown role '{}'", self.role)))?;

        Ok(Account {
            id: self.id,
            email: self.email,
            password_hash: self.password_hash,
            role,
            failed_attempts: self.failed_attempts,
            locked: self.locked,
            locked_at: self.locked_at,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

/// Database row for notes.
#[derive(Debug, Clone, FromRow)]
pub struct NoteRow {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub owner: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<NoteRow> for Note {
    fn from(row: NoteRow) -> Self {
        Self {
            id: row.id,
            title: row.title,
            content: row.content,
            owner: row.owner,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}
