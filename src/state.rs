//! # Application State
//!
//! Everything a handler needs beyond the request itself: the SQLite pool, the
//! login-token service, and the auth settings read from the configuration.
//! Built once at startup and cloned into each request by axum.

use crate::auth::token::TokenService;
use crate::config::Config;
use crate::db;
use anyhow::Result;
use chrono::Duration;
use sqlx::sqlite::SqlitePool;
use std::sync::Arc;

/// Shared application state
///
/// - Database connection pool (movies and users)
/// - Token service for signing and verifying login tokens
/// - Authentication settings taken from the configuration
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: SqlitePool,

    /// Login token signer/verifier, wrapped in Arc for cheap clones
    pub tokens: Arc<TokenService>,

    /// Idle time after which a session is destroyed
    pub session_inactivity: Duration,

    /// bcrypt cost for new password hashes
    pub bcrypt_cost: u32,
}

impl AppState {
    /// Initialize application state
    ///
    /// Connects to the database and runs migrations.
    ///
    /// # Errors
    /// Returns an error if the database is unreachable or migrations fail.
    /// Startup aborts in that case.
    pub async fn new(config: &Config) -> Result<Self> {
        let db = db::connect(&config.database_url).await?;
        Ok(Self::with_pool(db, config))
    }

    /// Build state around an existing pool
    pub fn with_pool(db: SqlitePool, config: &Config) -> Self {
        AppState {
            db,
            tokens: Arc::new(TokenService::new(&config.jwt_secret, config.cookie_secure)),
            session_inactivity: Duration::seconds(config.session_inactivity_secs),
            bcrypt_cost: config.bcrypt_cost,
        }
    }
}

#[cfg(test)]
pub(crate) async fn test_state() -> AppState {
    let config = Config::from_lookup(|key| match key {
        "DATABASE_URL" => Some("sqlite::memory:".to_string()),
        "JWT_SECRET" => Some("test-secret".to_string()),
        "BCRYPT_COST" => Some("4".to_string()),
        _ => None,
    })
    .expect("test config");

    AppState::with_pool(db::test_pool().await, &config)
}
