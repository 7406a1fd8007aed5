//! CLI administration tool for snaplink.
//!
//! Works directly against the SQLite database, so the HTTP server does not
//! need to be running.
//!
//! # Usage
//!
//! ```bash
//! # Shorten a URL
//! cargo run --bin admin -- shorten https://example.com/some/long/path
//!
//! # Look up where a code points
//! cargo run --bin admin -- resolve aZ3k95
//!
//! # View statistics
//! cargo run --bin admin -- stats
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! Reads the same variables as the server (`DATABASE_URL` or `DATABASE_PATH`,
//! `BASE_URL`, `DB_MAX_CONNECTIONS`, `DB_BUSY_TIMEOUT`).

use snaplink::application::services::{ShortenError, ShorteningService};
use snaplink::config::Config;
use snaplink::domain::repositories::UrlStore;
use snaplink::infrastructure::persistence::SqliteUrlStore;
use snaplink::utils::code_generator::RandomCodeGenerator;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use std::sync::Arc;

/// CLI tool for managing snaplink.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level command groups.
#[derive(Subcommand)]
enum Commands {
    /// Create a short URL
    Shorten {
        /// Absolute http(s) URL to shorten
        url: String,
    },

    /// Show the long URL behind a short code
    Resolve {
        /// Short code (e.g. "aZ3k95")
        code: String,
    },

    /// Show statistics
    Stats,

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,

    /// Show database info
    Info,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = Config::from_env()?;
    config.validate()?;

    let store = SqliteUrlStore::connect(&config.database_url, &config.store_options())
        .await
        .context("Failed to connect to database")?;
    store.init().await.context("Failed to apply migrations")?;
    let store = Arc::new(store);

    let outcome = match cli.command {
        Commands::Shorten { url } => shorten(store.clone(), &config.base_url, &url).await,
        Commands::Resolve { code } => resolve(&store, &code).await,
        Commands::Stats => handle_stats(&store).await,
        Commands::Db { action } => handle_db_action(action, &store, &config.database_url).await,
    };

    store.close().await;
    outcome
}

/// Validates and stores `url`, then prints the resulting short URL.
async fn shorten(store: Arc<SqliteUrlStore>, base_url: &str, url: &str) -> Result<()> {
    println!("{}", "✂️  Shorten URL".bright_blue().bold());
    println!();

    let service = ShorteningService::new(store, RandomCodeGenerator);

    let record = match service.create_short_url(url).await {
        Ok(record) => record,
        Err(ShortenError::Validation(reason)) => anyhow::bail!("{}", reason),
        Err(e) => anyhow::bail!("Failed to shorten URL: {}", e),
    };

    println!("  Long URL:   {}", record.long_url.bright_white());
    println!("  Short code: {}", record.short_code.cyan().bold());
    println!(
        "  Short URL:  {}",
        format!("{}/{}", base_url.trim_end_matches('/'), record.short_code).bright_green()
    );
    println!();

    Ok(())
}

/// Prints the stored record for `code`, if any.
async fn resolve(store: &SqliteUrlStore, code: &str) -> Result<()> {
    let record = store
        .find_by_code(code)
        .await
        .map_err(|e| anyhow::anyhow!("Database error: {}", e))?;

    match record {
        Some(record) => {
            println!("{}", "🔗 Short URL".bright_blue().bold());
            println!();
            println!("  Code:    {}", record.short_code.cyan());
            println!("  Target:  {}", record.long_url.bright_white());
            println!(
                "  Created: {}",
                record.created_at.to_string().bright_black()
            );
            println!();
        }
        None => {
            println!("{}", format!("⚠️  No URL stored under '{}'", code).yellow());
        }
    }

    Ok(())
}

/// Displays system statistics.
async fn handle_stats(store: &SqliteUrlStore) -> Result<()> {
    println!("{}", "📊 Statistics".bright_blue().bold());
    println!();

    let urls_count = store
        .count()
        .await
        .map_err(|e| anyhow::anyhow!("Database error: {}", e))?;

    println!(
        "  Short URLs: {}",
        urls_count.to_string().bright_green().bold()
    );
    println!();

    Ok(())
}

/// Handles database diagnostic commands.
async fn handle_db_action(
    action: DbAction,
    store: &SqliteUrlStore,
    database_url: &str,
) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "🔍 Checking database connection...".bright_blue());

            if !store.health_check().await {
                anyhow::bail!("Database connection failed");
            }
            println!("{}", "✅ Database connection OK".green().bold());

            let rows = store
                .count()
                .await
                .map_err(|e| anyhow::anyhow!("Schema check failed: {}", e))?;
            println!(
                "{}",
                format!("✅ Table 'urls' present ({} rows)", rows).green()
            );
        }
        DbAction::Info => {
            println!("{}", "ℹ️  Database Information".bright_blue().bold());
            println!();

            let version: String = sqlx::query_scalar("SELECT sqlite_version()")
                .fetch_one(store.pool())
                .await?;

            println!("  Location: {}", database_url.bright_white());
            println!("  SQLite:   {}", version.bright_white());
            println!();
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use snaplink::infrastructure::persistence::SqliteStoreOptions;
    use std::time::Duration;

    async fn memory_store() -> Arc<SqliteUrlStore> {
        let options = SqliteStoreOptions {
            max_connections: 1,
            busy_timeout: Duration::from_secs(1),
        };
        let store = SqliteUrlStore::connect("sqlite::memory:", &options)
            .await
            .unwrap();
        store.init().await.unwrap();
        Arc::new(store)
    }

    #[tokio::test]
    async fn test_shorten_rejected_url_is_an_error() {
        let store = memory_store().await;

        let err = shorten(store.clone(), "http://localhost:8000", "ftp://example.com")
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Invalid URL format");

        let err = shorten(store.clone(), "http://localhost:8000", "https://blocked.com")
            .await
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "This domain is blocked and cannot be shortened"
        );

        assert_eq!(store.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_shorten_stores_valid_url() {
        let store = memory_store().await;

        shorten(store.clone(), "http://localhost:8000", "https://example.com")
            .await
            .unwrap();

        assert_eq!(store.count().await.unwrap(), 1);
    }
}
