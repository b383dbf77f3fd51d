//! Router configuration.

use axum::routing::{get, post};
use axum::{middleware, Json, Router};
use serde::Serialize;
use sn_storage::{AccountProvider, NoteProvider};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::extract::{require_admin, require_auth};
use crate::handlers::{admin, auth, notes};
use crate::state::AppState;

/// Creates the main application router.
pub fn create_router<A, N>(state: AppState<A, N>) -> Router
where
    A: AccountProvider + 'static,
    N: NoteProvider + 'static,
{
    let public = Router::new()
        .route("/health", get(health_check))
        .route("/auth/register", post(auth::register::<A, N>))
        .route("/auth/login", post(auth::login::<A, N>));

    let protected = Router::new()
        .route("/auth/me", get(auth::me))
        .route(
            "/notes",
            post(notes::create_note::<A, N>).get(notes::list_notes::<A, N>),
        )
        .route(
            "/notes/{id}",
            get(notes::get_note::<A, N>)
                .put(notes::update_note::<A, N>)
                .delete(notes::delete_note::<A, N>),
        );

    let admin_routes = Router::new()
        .route("/admin/users", get(admin::list_users::<A, N>))
        .layer(middleware::from_fn(require_admin));

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Bearer authentication wraps the protected and admin routes; the
    // role gate inside admin_routes runs after it.
    Router::new()
        .merge(protected)
        .merge(admin_routes)
        .layer(middleware::from_fn_with_state(
            state.clone(),
            require_auth::<A, N>,
        ))
        .merge(public)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

/// Health check response.
#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
}

async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}
