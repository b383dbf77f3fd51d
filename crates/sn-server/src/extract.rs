//! Bearer-token middleware and handler extractors.

use axum::extract::{FromRequestParts, Request, State};
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use axum::http::HeaderMap;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use sn_auth::AuthError;
use sn_model::Account;
use sn_storage::{AccountProvider, NoteProvider};

use crate::error::ApiError;
use crate::state::AppState;

/// The authenticated account, injected into request extensions by
/// [`require_auth`].
#[derive(Debug, Clone)]
pub struct AuthUser(pub Account);

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Self>()
            .cloned()
            .ok_or(ApiError::Auth(AuthError::TokenInvalid))
    }
}

/// Middleware that resolves the bearer token to an account.
///
/// A missing header, an unacceptable token, or a token whose subject no
/// longer exists all reject with 401 before the handler runs.
pub async fn require_auth<A, N>(
    State(state): State<AppState<A, N>>,
    mut request: Request,
    next: Next,
) -> Response
where
    A: AccountProvider + 'static,
    N: NoteProvider + 'static,
{
    let Some(token) = extract_bearer_token(request.headers()) else {
        return ApiError::Auth(AuthError::TokenInvalid).into_response();
    };

    match state.auth.authenticate(&token).await {
        Ok(account) => {
            request.extensions_mut().insert(AuthUser(account));
            next.run(request).await
        }
        Err(e) => ApiError::Auth(e).into_response(),
    }
}

/// Middleware gating a route on the administrator role.
///
/// Must run after [`require_auth`]; an unauthenticated request is
/// rejected as such rather than as forbidden.
pub async fn require_admin(request: Request, next: Next) -> Response {
    match request.extensions().get::<AuthUser>() {
        Some(user) if user.0.is_admin() => next.run(request).await,
        Some(_) => ApiError::Forbidden.into_response(),
        None => ApiError::Auth(AuthError::TokenInvalid).into_response(),
    }
}

fn extract_bearer_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get(AUTHORIZATION)?
        .to_str()
        .ok()
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(String::from)
}
