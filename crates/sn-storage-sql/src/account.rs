//! `PostgreSQL` implementation of the account storage provider.

use async_trait::async_trait;
use sn_model::Account;
use sn_storage::{AccountProvider, StorageError, StorageResult};
use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::AccountRow;
use crate::error::from_sqlx_error;

/// `PostgreSQL` account storage provider.
pub struct PgAccountProvider {
    pool: PgPool,
}

impl PgAccountProvider {
    /// Creates a new `PostgreSQL` account provider.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AccountProvider for PgAccountProvider {
    async fn create(&self, account: &Account) -> StorageResult<()> {
        sqlx::query(
            r"INSERT INTO accounts (
                id, email, password_hash, role, failed_attempts,
                locked, locked_at, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)",
        )
        .bind(account.id)
        .bind(&account.email)
        .bind(&account.password_hash)
        .bind(account.role.as_str())
        .bind(account.failed_attempts)
        .bind(account.locked)
        .bind(account.locked_at)
        .bind(account.created_at)
        .bind(account.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| from_sqlx_error("account", e))?;

        Ok(())
    }

    async fn get_by_id(&self, id: Uuid) -> StorageResult<Option<Account>> {
        let row: Option<AccountRow> = sqlx::query_as("SELECT * FROM accounts WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| from_sqlx_error("account", e))?;

        row.map(AccountRow::into_account).transpose()
    }

    async fn get_by_email(&self, email: &str) -> StorageResult<Option<Account>> {
        let row: Option<AccountRow> = sqlx::query_as("SELECT * FROM accounts WHERE email = $1")
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| from_sqlx_error("account", e))?;

        row.map(AccountRow::into_account).transpose()
    }

    async fn update_lockout(&self, account: &Account) -> StorageResult<()> {
        let result = sqlx::query(
            r"UPDATE accounts SET
                failed_attempts = $2, locked = $3, locked_at = $4, updated_at = $5
            WHERE id = $1",
        )
        .bind(account.id)
        .bind(account.failed_attempts)
        .bind(account.locked)
        .bind(account.locked_at)
        .bind(account.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| from_sqlx_error("account", e))?;

        if result.rows_affected() == 0 {
            return Err(StorageError::not_found("account"));
        }

        Ok(())
    }

    async fn list(&self) -> StorageResult<Vec<Account>> {
        let rows: Vec<AccountRow> =
            sqlx::query_as("SELECT * FROM accounts ORDER BY created_at, email")
                .fetch_all(&self.pool)
                .await
                .map_err(|e| from_sqlx_error("account", e))?;

        rows.into_iter().map(AccountRow::into_account).collect()
    }
}
