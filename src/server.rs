//! HTTP server initialization and runtime setup.
//!
//! Handles the SQLite store, service wiring, and Axum server lifecycle.

use crate::application::services::ShorteningService;
use crate::config::Config;
use crate::infrastructure::persistence::SqliteUrlStore;
use crate::routes::app_router;
use crate::state::AppState;
use crate::utils::code_generator::RandomCodeGenerator;

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use std::net::SocketAddr;
use std::sync::Arc;

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - SQLite connection pool (file created if missing)
/// - Schema migrations
/// - Shortening service
/// - Axum HTTP server
///
/// # Errors
///
/// Returns an error if:
/// - Database open or migration fails
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let store = SqliteUrlStore::connect(&config.database_url, &config.store_options())
        .await
        .with_context(|| format!("Failed to open database {}", config.database_url))?;

    if let Err(e) = store.init().await {
        store.close().await;
        return Err(e).context("Failed to apply migrations");
    }
    tracing::info!("Connected to database");

    run_with_store(config, Arc::new(store)).await
}

/// Serves requests backed by an already initialized `store`.
///
/// The store is closed once the server stops, whether it shut down on
/// Ctrl+C or SIGTERM or failed to bind or serve.
///
/// # Errors
///
/// Returns an error if the listen address is invalid, the bind fails, or the
/// server fails while running.
pub async fn run_with_store(config: Config, store: Arc<SqliteUrlStore>) -> Result<()> {
    let result = serve(&config, store.clone()).await;

    store.close().await;
    tracing::info!("Database connection closed");

    result
}

async fn serve(config: &Config, store: Arc<SqliteUrlStore>) -> Result<()> {
    let service = Arc::new(ShorteningService::new(store, RandomCodeGenerator));
    let state = AppState::new(service, &config.base_url);

    let app = app_router(state, &config.cors_allow_origin);

    let addr: SocketAddr = config
        .listen_addr
        .parse()
        .with_context(|| format!("Invalid listen address {}", config.listen_addr))?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(listener, ServiceExt::<Request>::into_make_service(app))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
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
                tracing::error!("Failed to listen for SIGTERM: {}", e);
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

    tracing::info!("Shutting down...");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::UrlStore;
    use crate::infrastructure::persistence::SqliteStoreOptions;
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

    fn test_config(listen_addr: &str) -> Config {
        Config {
            database_url: "sqlite::memory:".to_string(),
            listen_addr: listen_addr.to_string(),
            base_url: "http://localhost:8000".to_string(),
            cors_allow_origin: "*".to_string(),
            log_level: "info".to_string(),
            log_format: "text".to_string(),
            db_max_connections: 1,
            db_busy_timeout: 1,
        }
    }

    #[tokio::test]
    async fn test_store_closed_when_bind_fails() {
        let occupied = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = occupied.local_addr().unwrap();

        let store = memory_store().await;
        assert!(store.health_check().await);

        let result = run_with_store(test_config(&addr.to_string()), store.clone()).await;

        assert!(result.is_err());
        assert!(!store.health_check().await);
    }

    #[tokio::test]
    async fn test_store_closed_when_listen_address_invalid() {
        let store = memory_store().await;

        let result = run_with_store(test_config("not-an-address:port"), store.clone()).await;

        assert!(result.is_err());
        assert!(!store.health_check().await);
    }
}
