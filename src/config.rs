//! # Configuration Management
//!
//! This module handles loading configuration from environment variables.
//! It uses the "12-factor app" methodology where configuration comes from the environment.
//!
//! ## Environment Variables
//! - `DATABASE_URL`: SQLite database connection string (required)
//! - `JWT_SECRET`: Secret used to sign login tokens (required)
//! - `HOST`: Server bind address (default: 127.0.0.1)
//! - `PORT`: Server port (default: 6500)
//! - `SESSION_INACTIVITY_SECS`: Idle time before a session is dropped (default: 3600)
//! - `BCRYPT_COST`: Password hashing work factor (default: 10)
//! - `STATIC_DIR`: Directory served under `/public` (default: public)
//! - `COOKIE_SECURE`: Mark session and token cookies `Secure` (default: false)

use anyhow::{bail, Context, Result};
use std::env;

/// Default port the catalog listens on
pub const DEFAULT_PORT: u16 = 6500;

/// Default inactivity window for sessions (one hour)
pub const DEFAULT_SESSION_INACTIVITY_SECS: i64 = 3600;

/// Default bcrypt cost factor for new password hashes
pub const DEFAULT_BCRYPT_COST: u32 = 10;

/// Application configuration
///
/// All fields are public for easy access from other modules.
/// `Debug` is implemented by hand so the signing secret never reaches the logs.
#[derive(Clone)]
pub struct Config {
    /// Server host/IP address to bind to
    /// Examples: "127.0.0.1" (localhost only), "0.0.0.0" (all interfaces)
    pub host: String,

    /// Server port number (1-65535)
    pub port: u16,

    /// SQLite database connection URL
    /// Format: "sqlite:movies.db?mode=rwc"
    /// The "mode=rwc" means: read, write, create if not exists
    pub database_url: String,

    /// HMAC secret for signing login tokens
    pub jwt_secret: String,

    /// Seconds of inactivity after which a session is destroyed
    pub session_inactivity_secs: i64,

    /// bcrypt work factor used when hashing new passwords
    pub bcrypt_cost: u32,

    /// Directory holding stylesheets and other static assets
    pub static_dir: String,

    /// Whether cookies carry the `Secure` attribute (HTTPS deployments)
    pub cookie_secure: bool,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("database_url", &self.database_url)
            .field("jwt_secret", &"[REDACTED]")
            .field("session_inactivity_secs", &self.session_inactivity_secs)
            .field("bcrypt_cost", &self.bcrypt_cost)
            .field("static_dir", &self.static_dir)
            .field("cookie_secure", &self.cookie_secure)
            .finish()
    }
}

impl Config {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads variables from .env file (if present) using dotenvy
    /// 2. Reads each configuration value from environment
    /// 3. Falls back to defaults for optional values
    /// 4. Returns an error if a required value is missing or a number fails to parse
    ///
    /// ## Example .env file
    /// ```text
    /// DATABASE_URL=sqlite:movies.db?mode=rwc
    /// JWT_SECRET=change-me
    /// PORT=6500
    /// ```
    pub fn from_env() -> Result<Self> {
        // Load .env file if it exists (dotenvy doesn't error if file missing)
        dotenvy::dotenv().ok();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a configuration from an arbitrary key lookup
    ///
    /// `from_env` passes the process environment; tests pass a map.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("DATABASE_URL").context("DATABASE_URL must be set")?;

        let jwt_secret = lookup("JWT_SECRET").context("JWT_SECRET must be set")?;
        if jwt_secret.trim().is_empty() {
            bail!("JWT_SECRET must not be empty");
        }

        let port = match lookup("PORT") {
            Some(raw) => raw
                .parse()
                .with_context(|| format!("PORT is not a valid port number: {raw}"))?,
            None => DEFAULT_PORT,
        };

        let session_inactivity_secs = match lookup("SESSION_INACTIVITY_SECS") {
            Some(raw) => raw
                .parse()
                .with_context(|| format!("SESSION_INACTIVITY_SECS is not a number: {raw}"))?,
            None => DEFAULT_SESSION_INACTIVITY_SECS,
        };
        if session_inactivity_secs <= 0 {
            bail!("SESSION_INACTIVITY_SECS must be positive");
        }

        let bcrypt_cost = match lookup("BCRYPT_COST") {
            Some(raw) => raw
                .parse()
                .with_context(|| format!("BCRYPT_COST is not a number: {raw}"))?,
            None => DEFAULT_BCRYPT_COST,
        };
        // bcrypt only accepts costs in this range
        if !(4..=31).contains(&bcrypt_cost) {
            bail!("BCRYPT_COST must be between 4 and 31, got {bcrypt_cost}");
        }

        let cookie_secure = match lookup("COOKIE_SECURE") {
            Some(raw) => raw
                .parse()
                .with_context(|| format!("COOKIE_SECURE must be true or false: {raw}"))?,
            None => false,
        };

        Ok(Config {
            host: lookup("HOST").unwrap_or_else(|| "127.0.0.1".to_string()),
            port,
            database_url,
            jwt_secret,
            session_inactivity_secs,
            bcrypt_cost,
            static_dir: lookup("STATIC_DIR").unwrap_or_else(|| "public".to_string()),
            cookie_secure,
        })
    }

    /// Get the socket address to bind the server to
    ///
    /// Combines host and port into a format suitable for TCP binding.
    /// Example: "127.0.0.1:6500"
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_applied() {
        let config = Config::from_lookup(lookup_from(&[
            ("DATABASE_URL", "sqlite::memory:"),
            ("JWT_SECRET", "secret"),
        ]))
        .unwrap();

        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, DEFAULT_PORT);
        assert_eq!(config.session_inactivity_secs, 3600);
        assert_eq!(config.bcrypt_cost, 10);
        assert_eq!(config.static_dir, "public");
        assert!(!config.cookie_secure);
        assert_eq!(config.bind_address(), "127.0.0.1:6500");
    }

    #[test]
    fn test_missing_required_values() {
        assert!(Config::from_lookup(lookup_from(&[("JWT_SECRET", "secret")])).is_err());
        assert!(Config::from_lookup(lookup_from(&[("DATABASE_URL", "sqlite::memory:")])).is_err());
        assert!(Config::from_lookup(lookup_from(&[
            ("DATABASE_URL", "sqlite::memory:"),
            ("JWT_SECRET", "   "),
        ]))
        .is_err());
    }

    #[test]
    fn test_invalid_numbers_rejected() {
        let base = [("DATABASE_URL", "sqlite::memory:"), ("JWT_SECRET", "secret")];

        let mut with_port = base.to_vec();
        with_port.push(("PORT", "not-a-port"));
        assert!(Config::from_lookup(lookup_from(&with_port)).is_err());

        let mut with_cost = base.to_vec();
        with_cost.push(("BCRYPT_COST", "2"));
        assert!(Config::from_lookup(lookup_from(&with_cost)).is_err());

        let mut with_inactivity = base.to_vec();
        with_inactivity.push(("SESSION_INACTIVITY_SECS", "0"));
        assert!(Config::from_lookup(lookup_from(&with_inactivity)).is_err());
    }

    #[test]
    fn test_debug_redacts_secret() {
        let config = Config::from_lookup(lookup_from(&[
            ("DATABASE_URL", "sqlite::memory:"),
            ("JWT_SECRET", "super-secret-value"),
        ]))
        .unwrap();

        let printed = format!("{config:?}");
        assert!(!printed.contains("super-secret-value"));
        assert!(printed.contains("[REDACTED]"));
    }
}
