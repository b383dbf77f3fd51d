//! Server configuration.
//!
//! Configuration is loaded from environment variables with sensible defaults.

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Server host to bind to.
    pub host: String,

    /// Server port.
    pub port: u16,

    /// Database connection URL.
    pub database_url: String,

    /// Minimum database connections.
    pub db_min_connections: u32,

    /// Maximum database connections.
    pub db_max_connections: u32,

    /// Token signing secret. Must be at least 32 bytes.
    pub token_secret: String,

    /// Session token lifespan in seconds.
    pub token_lifespan_secs: i64,

    /// Consecutive failed logins that trip the account lock.
    pub max_failed_attempts: i32,

    /// Lock duration in seconds.
    pub lock_duration_secs: i64,

    /// Bcrypt cost factor.
    pub bcrypt_cost: u32,

    /// Whether a registration request may grant itself the admin role.
    pub allow_self_admin: bool,
}

impl ServerConfig {
    /// Loads configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if a required variable is missing.
    pub fn from_env() -> anyhow::Result<Self> {
        // Load .env file if it exists
        let _ = dotenvy::dotenv();

        let host = std::env::var("SN_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = std::env::var("SN_PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(8080);

        let database_url = std::env::var("DATABASE_URL")
            .map_err(|_| anyhow::anyhow!("DATABASE_URL environment variable is required"))?;

        let db_min_connections = std::env::var("SN_DB_MIN_CONNECTIONS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(1);

        let db_max_connections = std::env::var("SN_DB_MAX_CONNECTIONS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(10);

        let token_secret = std::env::var("SN_TOKEN_SECRET")
            .map_err(|_| anyhow::anyhow!("SN_TOKEN_SECRET environment variable is required"))?;

        let token_lifespan_secs = std::env::var("SN_TOKEN_LIFESPAN")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(3600); // 1 hour

        let max_failed_attempts = std::env::var("SN_MAX_FAILED_ATTEMPTS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(5);

        let lock_duration_secs = std::env::var("SN_LOCK_DURATION")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(900); // 15 minutes

        let bcrypt_cost = std::env::var("SN_BCRYPT_COST")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(12);

        let allow_self_admin = std::env::var("SN_ALLOW_SELF_ADMIN")
            .map(|v| v.to_lowercase() == "true" || v == "1")
            .unwrap_or(false);

        Ok(Self {
            host,
            port,
            database_url,
            db_min_connections,
            db_max_connections,
            token_secret,
            token_lifespan_secs,
            max_failed_attempts,
            lock_duration_secs,
            bcrypt_cost,
            allow_self_admin,
        })
    }

    /// Creates a configuration for testing.
    ///
    /// Uses a low bcrypt cost so test suites stay fast.
    #[must_use]
    pub fn for_testing() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 0,
            database_url: "postgres://localhost/secure_notes_test".to_string(),
            db_min_connections: 1,
            db_max_connections: 5,
            token_secret: "test-secret-test-secret-test-secret!".to_string(),
            token_lifespan_secs: 3600,
            max_failed_attempts: 5,
            lock_duration_secs: 900,
            bcrypt_cost: 4,
            allow_self_admin: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn testing_config_has_long_enough_secret() {
        let config = ServerConfig::for_testing();
        assert!(config.token_secret.len() >= 32);
        assert_eq!(config.bcrypt_cost, 4);
    }
}
