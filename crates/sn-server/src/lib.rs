//! # sn-server
//!
//! Axum HTTP server for the secure notes service.
//!
//! Wires the authentication engine, token service, and storage
//! providers into the HTTP surface: registration, login with
//! progressive lockout, bearer-token authentication, an admin-gated
//! account listing, and owner-filtered note CRUD.
//!
//! ## Usage
//!
//! ```ignore
//! use sn_server::{Server, ServerConfig};
//!
//! let config = ServerConfig::from_env()?;
//! let server = Server::new(config).await?;
//! server.run().await?;
//! ```

#![forbid(unsafe_code)]
#![deny(warnings)]
#![deny(missing_docs)]

pub mod config;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod router;
pub mod state;

pub use config::ServerConfig;
pub use router::create_router;
pub use state::AppState;

use std::net::SocketAddr;
use std::sync::Arc;

use sn_auth::SystemClock;
use sn_storage_sql::{PgAccountProvider, PgNoteProvider};
use sqlx::PgPool;
use tokio::net::TcpListener;

/// The secure notes server.
pub struct Server {
    config: ServerConfig,
    pool: PgPool,
}

impl Server {
    /// Creates a new server instance.
    ///
    /// Initializes the database pool and applies pending migrations.
    ///
    /// # Errors
    ///
    /// Returns an error if the database is unreachable or a migration
    /// fails.
    pub async fn new(config: ServerConfig) -> anyhow::Result<Self> {
        let pool_config = sn_storage_sql::PoolConfig::new(&config.database_url)
            .max_connections(config.db_max_connections)
            .min_connections(config.db_min_connections);

        let pool = sn_storage_sql::create_pool(&pool_config).await?;
        sn_storage_sql::run_migrations(&pool).await?;

        tracing::info!("database pool created, migrations applied");

        Ok(Self { config, pool })
    }

    /// Runs the server until a shutdown signal arrives.
    ///
    /// # Errors
    ///
    /// Returns an error if the listener cannot bind or the server fails.
    pub async fn run(self) -> anyhow::Result<()> {
        let accounts = Arc::new(PgAccountProvider::new(self.pool.clone()));
        let notes = Arc::new(PgNoteProvider::new(self.pool.clone()));

        let state = AppState::new(self.config.clone(), accounts, notes, Arc::new(SystemClock))?;
        let app = create_router(state);

        let addr: SocketAddr = format!("{}:{}", self.config.host, self.config.port).parse()?;
        let listener = TcpListener::bind(addr).await?;

        tracing::info!("server listening on http://{}", addr);

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("server shutdown complete");
        Ok(())
    }

    /// Returns the server configuration.
    #[must_use]
    pub const fn config(&self) -> &ServerConfig {
        &self.config
    }
}

/// Waits for a shutdown signal.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install signal handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("shutdown signal received");
}
