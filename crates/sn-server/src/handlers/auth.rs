//! Registration, login, and profile handlers.

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};
use sn_model::Role;
use sn_storage::{AccountProvider, NoteProvider};

use crate::error::ApiResult;
use crate::extract::AuthUser;
use crate::state::AppState;

/// Registration request body.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    /// Identity to register.
    pub email: String,
    /// Plaintext password; checked against the complexity policy.
    pub password: String,
    /// Request the administrator role. Honored only when the server
    /// allows self-granted admin.
    #[serde(default)]
    pub admin: bool,
}

/// Registration confirmation.
#[derive(Debug, Serialize, Deserialize)]
pub struct RegisterResponse {
    /// Normalized registered identity.
    pub email: String,
    /// Granted role.
    pub role: Role,
}

/// Login request body.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    /// Identity to authenticate.
    pub username: String,
    /// Plaintext password.
    pub password: String,
}

/// Successful login response.
#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    /// Signed session token.
    pub token: String,
    /// Role of the authenticated account.
    pub role: Role,
    /// Token lifetime in seconds.
    pub expires_in: i64,
}

/// Authenticated profile response.
#[derive(Debug, Serialize, Deserialize)]
pub struct ProfileResponse {
    /// Account identity.
    pub email: String,
    /// Account role.
    pub role: Role,
}

/// `POST /auth/register`
pub async fn register<A: AccountProvider, N: NoteProvider>(
    State(state): State<AppState<A, N>>,
    Json(req): Json<RegisterRequest>,
) -> ApiResult<Json<RegisterResponse>> {
    let account = state
        .auth
        .register(&req.email, &req.password, req.admin)
        .await?;

    Ok(Json(RegisterResponse {
        email: account.email,
        role: account.role,
    }))
}

/// `POST /auth/login`
pub async fn login<A: AccountProvider, N: NoteProvider>(
    State(state): State<AppState<A, N>>,
    Json(req): Json<LoginRequest>,
) -> ApiResult<Json<LoginResponse>> {
    let success = state.auth.login(&req.username, &req.password).await?;

    Ok(Json(LoginResponse {
        token: success.token,
        role: success.account.role,
        expires_in: success.expires_in,
    }))
}

/// `GET /auth/me`
pub async fn me(AuthUser(account): AuthUser) -> Json<ProfileResponse> {
    Json(ProfileResponse {
        email: account.email,
        role: account.role,
    })
}
