//! Administrator handlers.

use axum::extract::State;
use axum::Json;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sn_model::{Account, Role};
use sn_storage::{AccountProvider, NoteProvider};
use uuid::Uuid;

use crate::error::ApiResult;
use crate::state::AppState;

/// Account representation for the admin listing.
///
/// Deliberately omits the password hash; the hash never leaves the
/// storage layer through this surface.
#[derive(Debug, Serialize, Deserialize)]
pub struct AccountSummary {
    /// Account identifier.
    pub id: Uuid,
    /// Account identity.
    pub email: String,
    /// Account role.
    pub role: Role,
    /// Consecutive failed login attempts.
    pub failed_attempts: i32,
    /// Whether the account is currently locked.
    pub locked: bool,
    /// When the account was created.
    pub created_at: DateTime<Utc>,
}

impl From<Account> for AccountSummary {
    fn from(account: Account) -> Self {
        Self {
            id: account.id,
            email: account.email,
            role: account.role,
            failed_attempts: account.failed_attempts,
            locked: account.locked,
            created_at: account.created_at,
        }
    }
}

/// `GET /admin/users`
///
/// The admin role gate runs as middleware before this handler.
pub async fn list_users<A: AccountProvider, N: NoteProvider>(
    State(state): State<AppState<A, N>>,
) -> ApiResult<Json<Vec<AccountSummary>>> {
    let accounts = state.accounts.list().await?;

    Ok(Json(
        accounts.into_iter().map(AccountSummary::from).collect(),
    ))
}
