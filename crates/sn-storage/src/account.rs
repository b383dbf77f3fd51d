//! Account storage provider trait.

use async_trait::async_trait;
use sn_model::Account;
use uuid::Uuid;

use crate::error::StorageResult;

/// Provider for account storage operations.
///
/// Implementations must be thread-safe and support concurrent access.
/// The lockout columns (`failed_attempts`, `locked`, `locked_at`) are
/// written through [`AccountProvider::update_lockout`] as a single-row
/// update; serialization of concurrent login attempts is the caller's
/// responsibility.
#[async_trait]
pub trait AccountProvider: Send + Sync {
    /// Creates a new account.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Duplicate` if an account with the same
    /// email already exists.
    async fn create(&self, account: &Account) -> StorageResult<()>;

    /// Gets an account by ID.
    async fn get_by_id(&self, id: Uuid) -> StorageResult<Option<Account>>;

    /// Gets an account by its normalized email.
    async fn get_by_email(&self, email: &str) -> StorageResult<Option<Account>>;

    /// Persists the lockout columns of an existing account in a single
    /// row update.
    ///
    /// The write is last-writer-wins: the caller's per-account
    /// serialization is process-local, so a deployment pointing
    /// multiple server instances at one database can lose failure
    /// counts between instances. A single instance owns the lockout
    /// state.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if the account doesn't exist.
    async fn update_lockout(&self, account: &Account) -> StorageResult<()>;

    /// Lists all accounts, ordered by creation time.
    async fn list(&self) -> StorageResult<Vec<Account>>;
}
