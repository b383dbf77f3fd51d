//! Test harness: the full router over in-memory storage.

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use chrono::Utc;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use sn_auth::{Clock, ManualClock};
use sn_server::{create_router, AppState, ServerConfig};
use sn_storage::{MemoryAccountProvider, MemoryNoteProvider};
use tower::util::ServiceExt;

pub const PASSWORD: &str = "GoodPassw0rd!";

/// The application under test, backed by in-memory providers and a
/// manually advanced clock.
pub struct TestApp {
    pub router: Router,
    pub clock: Arc<ManualClock>,
    pub accounts: Arc<MemoryAccountProvider>,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_config(ServerConfig::for_testing())
    }

    pub fn with_config(config: ServerConfig) -> Self {
        let accounts = Arc::new(MemoryAccountProvider::new());
        let notes = Arc::new(MemoryNoteProvider::new());
        let clock = Arc::new(ManualClock::new(Utc::now()));

        let state = AppState::new(
            config,
            Arc::clone(&accounts),
            notes,
            Arc::clone(&clock) as Arc<dyn Clock>,
        )
        .expect("test state");

        Self {
            router: create_router(state),
            clock,
            accounts,
        }
    }

    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> Response {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }

        let request = match body {
            Some(value) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(value.to_string())),
            None => builder.body(Body::empty()),
        }
        .expect("request");

        self.router.clone().oneshot(request).await.expect("response")
    }

    pub async fn register(&self, email: &str, password: &str) -> Response {
        self.request(
            Method::POST,
            "/auth/register",
            None,
            Some(json!({ "email": email, "password": password })),
        )
        .await
    }

    pub async fn register_admin(&self, email: &str, password: &str) -> Response {
        self.request(
            Method::POST,
            "/auth/register",
            None,
            Some(json!({ "email": email, "password": password, "admin": true })),
        )
        .await
    }

    pub async fn login(&self, username: &str, password: &str) -> Response {
        self.request(
            Method::POST,
            "/auth/login",
            None,
            Some(json!({ "username": username, "password": password })),
        )
        .await
    }

    /// Registers and logs in, returning a bearer token.
    pub async fn token_for(&self, email: &str) -> String {
        let response = self.register(email, PASSWORD).await;
        assert_eq!(response.status(), StatusCode::OK);

        let response = self.login(email, PASSWORD).await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        body["token"].as_str().expect("token").to_string()
    }
}

/// Collects a response body as JSON.
pub async fn body_json(response: Response) -> Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("json body")
}
