//! Shared application state.

use std::sync::Arc;

use chrono::Duration;
use sn_auth::{AuthService, Clock, LockoutGuard, LockoutPolicy, PasswordVerifier};
use sn_storage::{AccountProvider, NoteProvider};
use sn_token::TokenService;

use crate::config::ServerConfig;

/// Shared state injected into every handler.
///
/// Generic over the storage providers so the same router serves both the
/// `PostgreSQL` backend and the in-memory backend used in tests.
pub struct AppState<A, N> {
    /// Server configuration.
    pub config: ServerConfig,
    /// Authentication orchestrator.
    pub auth: Arc<AuthService<A>>,
    /// Account storage, for the admin listing.
    pub accounts: Arc<A>,
    /// Note storage.
    pub notes: Arc<N>,
}

// Derived Clone would require A: Clone and N: Clone.
impl<A, N> Clone for AppState<A, N> {
    fn clone(&self) -> Self {
        Self {
            config: self.config.clone(),
            auth: Arc::clone(&self.auth),
            accounts: Arc::clone(&self.accounts),
            notes: Arc::clone(&self.notes),
        }
    }
}

impl<A: AccountProvider, N: NoteProvider> AppState<A, N> {
    /// Builds the state from configuration and storage providers.
    ///
    /// # Errors
    ///
    /// Returns an error if the token secret is too short or the
    /// authentication service cannot be constructed.
    pub fn new(
        config: ServerConfig,
        accounts: Arc<A>,
        notes: Arc<N>,
        clock: Arc<dyn Clock>,
    ) -> anyhow::Result<Self> {
        let tokens = Arc::new(TokenService::new(
            config.token_secret.as_bytes(),
            Duration::seconds(config.token_lifespan_secs),
        )?);

        let guard = LockoutGuard::new(LockoutPolicy::new(
            config.max_failed_attempts,
            Duration::seconds(config.lock_duration_secs),
        ));

        let auth = Arc::new(AuthService::new(
            Arc::clone(&accounts),
            tokens,
            PasswordVerifier::new(config.bcrypt_cost),
            guard,
            clock,
            config.allow_self_admin,
        )?);

        Ok(Self {
            config,
            auth,
            accounts,
            notes,
        })
    }
}
