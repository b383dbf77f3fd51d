//! In-memory storage backend.
//!
//! Backs the integration test suites and local development. Not suitable
//! for production: state does not survive restarts and is not shared
//! across instances.

use std::collections::HashMap;

use async_trait::async_trait;
use sn_model::{Account, Note};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::account::AccountProvider;
use crate::error::{StorageError, StorageResult};
use crate::note::NoteProvider;

/// In-memory account provider.
#[derive(Debug, Default)]
pub struct MemoryAccountProvider {
    accounts: RwLock<HashMap<Uuid, Account>>,
}

impl MemoryAccountProvider {
    /// Creates an empty in-memory account provider.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AccountProvider for MemoryAccountProvider {
    async fn create(&self, account: &Account) -> StorageResult<()> {
        let mut accounts = self.accounts.write().await;

        if accounts.values().any(|a| a.email == account.email) {
            return Err(StorageError::duplicate(
                "account",
                format!("email '{}' already exists", account.email),
            ));
        }

        accounts.insert(account.id, account.clone());
        Ok(())
    }

    async fn get_by_id(&self, id: Uuid) -> StorageResult<Option<Account>> {
        Ok(self.accounts.read().await.get(&id).cloned())
    }

    async fn get_by_email(&self, email: &str) -> StorageResult<Option<Account>> {
        Ok(self
            .accounts
            .read()
            .await
            .values()
            .find(|a| a.email == email)
            .cloned())
    }

    async fn update_lockout(&self, account: &Account) -> StorageResult<()> {
        let mut accounts = self.accounts.write().await;

        let stored = accounts
            .get_mut(&account.id)
            .ok_or(StorageError::not_found("account"))?;

        stored.failed_attempts = account.failed_attempts;
        stored.locked = account.locked;
        stored.locked_at = account.locked_at;
        stored.updated_at = account.updated_at;
        Ok(())
    }

    async fn list(&self) -> StorageResult<Vec<Account>> {
        let mut accounts: Vec<Account> = self.accounts.read().await.values().cloned().collect();
        accounts.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.email.cmp(&b.email)));
        Ok(accounts)
    }
}

/// In-memory note provider.
#[derive(Debug, Default)]
pub struct MemoryNoteProvider {
    notes: RwLock<HashMap<Uuid, Note>>,
}

impl MemoryNoteProvider {
    /// Creates an empty in-memory note provider.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl NoteProvider for MemoryNoteProvider {
    async fn create(&self, note: &Note) -> StorageResult<()> {
        self.notes.write().await.insert(note.id, note.clone());
        Ok(())
    }

    async fn get_by_id(&self, id: Uuid) -> StorageResult<Option<Note>> {
        Ok(self.notes.read().await.get(&id).cloned())
    }

    async fn list_by_owner(&self, owner: &str) -> StorageResult<Vec<Note>> {
        let mut notes: Vec<Note> = self
            .notes
            .read()
            .await
            .values()
            .filter(|n| n.owner == owner)
            .cloned()
            .collect();
        notes.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(notes)
    }

    async fn update(&self, note: &Note) -> StorageResult<()> {
        let mut notes = self.notes.write().await;

        let stored = notes
            .get_mut(&note.id)
            .ok_or(StorageError::not_found("note"))?;

        *stored = note.clone();
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> StorageResult<()> {
        self.notes
            .write()
            .await
            .remove(&id)
            .map(|_| ())
            .ok_or(StorageError::not_found("note"))
    }
}
