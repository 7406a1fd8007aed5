//! Application configuration loaded from environment variables.
//!
//! Configuration is loaded once at startup and validated before the server starts.
//!
//! ## Database location
//!
//! ```bash
//! export DATABASE_URL="sqlite:/var/lib/snaplink/urls.db"
//! # or just the file path
//! export DATABASE_PATH="/var/lib/snaplink/urls.db"
//! ```
//!
//! If `DATABASE_URL` is not set, it is built from `DATABASE_PATH`
//! (default: `urls.db` in the working directory).
//!
//! ## Optional Variables
//!
//! - `LISTEN` - Bind address; if unset, `0.0.0.0:$PORT` (default port: `8000`)
//! - `BASE_URL` - Public prefix for short URLs (default: `http://localhost:<port>`)
//! - `CORS_ALLOW_ORIGIN` - Allowed browser origin (default: `*`)
//! - `RUST_LOG` - Log level (default: `info`)
//! - `LOG_FORMAT` - Log format: `text` or `json` (default: `text`)
//! - `DB_MAX_CONNECTIONS` - SQLite pool size (default: 5)
//! - `DB_BUSY_TIMEOUT` - Seconds a writer waits for the database lock (default: 5)

use anyhow::{Context, Result};
use axum::http::HeaderValue;
use std::env;
use std::time::Duration;

use crate::infrastructure::persistence::SqliteStoreOptions;

const DEFAULT_PORT: u16 = 8000;
const DEFAULT_DATABASE_PATH: &str = "urls.db";

/// Service configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub listen_addr: String,
    /// Public prefix for generated short URLs, without a trailing slash.
    pub base_url: String,
    pub cors_allow_origin: String,
    pub log_level: String,
    pub log_format: String,

    // ── SqlitePool settings ─────────────────────────────────────────────────
    /// Maximum number of connections in the pool (`DB_MAX_CONNECTIONS`, default: 5).
    pub db_max_connections: u32,
    /// Seconds a connection waits on a locked database before failing
    /// (`DB_BUSY_TIMEOUT`, default: 5).
    pub db_busy_timeout: u64,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if `PORT` is set but is not a valid port number.
    pub fn from_env() -> Result<Self> {
        let database_url = load_database_url();

        let port = match env::var("PORT") {
            Ok(value) => value
                .parse::<u16>()
                .context("PORT must be a valid port number (1-65535)")?,
            Err(_) => DEFAULT_PORT,
        };

        let listen_addr = env::var("LISTEN").unwrap_or_else(|_| format!("0.0.0.0:{port}"));

        let base_url = env::var("BASE_URL")
            .unwrap_or_else(|_| format!("http://localhost:{port}"))
            .trim_end_matches('/')
            .to_string();

        let cors_allow_origin = env::var("CORS_ALLOW_ORIGIN").unwrap_or_else(|_| "*".to_string());
        let log_level = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
        let log_format = env::var("LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

        let db_max_connections = env::var("DB_MAX_CONNECTIONS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(5);

        let db_busy_timeout = env::var("DB_BUSY_TIMEOUT")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(5);

        Ok(Self {
            database_url,
            listen_addr,
            base_url,
            cors_allow_origin,
            log_level,
            log_format,
            db_max_connections,
            db_busy_timeout,
        })
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `log_format` is not `text` or `json`
    /// - `listen_addr` has no port
    /// - `database_url` is not a `sqlite:` URL
    /// - `base_url` is not an `http`/`https` URL
    /// - `cors_allow_origin` is neither `*` nor a valid header value
    /// - pool settings are zero
    pub fn validate(&self) -> Result<()> {
        if self.log_format != "text" && self.log_format != "json" {
            anyhow::bail!(
                "LOG_FORMAT must be 'text' or 'json', got '{}'",
                self.log_format
            );
        }

        if !self.listen_addr.contains(':') {
            anyhow::bail!(
                "LISTEN must be in format 'host:port', got '{}'",
                self.listen_addr
            );
        }

        if !self.database_url.starts_with("sqlite:") {
            anyhow::bail!(
                "DATABASE_URL must start with 'sqlite:', got '{}'",
                self.database_url
            );
        }

        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            anyhow::bail!(
                "BASE_URL must start with 'http://' or 'https://', got '{}'",
                self.base_url
            );
        }

        if self.cors_allow_origin != "*" && HeaderValue::from_str(&self.cors_allow_origin).is_err()
        {
            anyhow::bail!(
                "CORS_ALLOW_ORIGIN must be '*' or a single origin, got '{}'",
                self.cors_allow_origin
            );
        }

        if self.db_max_connections == 0 {
            anyhow::bail!("DB_MAX_CONNECTIONS must be at least 1");
        }
        if self.db_busy_timeout == 0 {
            anyhow::bail!("DB_BUSY_TIMEOUT must be greater than 0");
        }

        Ok(())
    }

    /// Store settings derived from the pool configuration.
    pub fn store_options(&self) -> SqliteStoreOptions {
        SqliteStoreOptions {
            max_connections: self.db_max_connections,
            busy_timeout: Duration::from_secs(self.db_busy_timeout),
        }
    }

    /// Prints configuration summary.
    pub fn print_summary(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  Listen address: {}", self.listen_addr);
        tracing::info!("  Database: {}", self.database_url);
        tracing::info!("  Base URL: {}", self.base_url);
        tracing::info!("  CORS origin: {}", self.cors_allow_origin);
        tracing::info!("  Log level: {}", self.log_level);
        tracing::info!("  Log format: {}", self.log_format);
    }
}

/// Resolves the SQLite database URL.
///
/// Priority:
/// 1. `DATABASE_URL` environment variable
/// 2. `sqlite:` + `DATABASE_PATH` (default: `urls.db`)
pub fn load_database_url() -> String {
    if let Ok(url) = env::var("DATABASE_URL") {
        return url;
    }

    let path = env::var("DATABASE_PATH").unwrap_or_else(|_| DEFAULT_DATABASE_PATH.to_string());
    format!("sqlite:{}", path)
}

/// Loads and validates configuration from environment variables.
///
/// # Errors
///
/// Returns an error if variables are malformed or validation fails.
///
/// # Note
///
/// This function expects environment variables to be already loaded
/// (e.g., via `dotenvy::dotenv()` in `main.rs`).
pub fn load_from_env() -> Result<Config> {
    let config = Config::from_env()?;
    config.validate()?;
    Ok(config)
}
