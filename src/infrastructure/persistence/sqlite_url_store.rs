//! SQLite implementation of the URL store.

use async_trait::async_trait;
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use crate::domain::entities::UrlRecord;
use crate::domain::repositories::{StoreError, UrlStore};

/// Connection settings for [`SqliteUrlStore::connect`].
#[derive(Debug, Clone)]
pub struct SqliteStoreOptions {
    /// Maximum number of pooled connections.
    pub max_connections: u32,
    /// How long a writer waits for the database lock before failing.
    pub busy_timeout: Duration,
}

impl Default for SqliteStoreOptions {
    fn default() -> Self {
        Self {
            max_connections: 5,
            busy_timeout: Duration::from_secs(5),
        }
    }
}

/// SQLite repository for short code storage and retrieval.
///
/// Uniqueness is enforced by the `UNIQUE` constraint on `urls.short_code`,
/// so the check and the write happen inside a single `INSERT` statement.
pub struct SqliteUrlStore {
    pool: Arc<SqlitePool>,
}

impl SqliteUrlStore {
    /// Creates a new store over an existing connection pool.
    pub fn new(pool: Arc<SqlitePool>) -> Self {
        Self { pool }
    }

    /// Opens (and creates, if missing) the database at `database_url`.
    ///
    /// The schema is not touched; call [`Self::init`] afterwards.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Database`] if the URL is malformed or the file
    /// cannot be opened.
    pub async fn connect(
        database_url: &str,
        options: &SqliteStoreOptions,
    ) -> Result<Self, StoreError> {
        let connect_options = SqliteConnectOptions::from_str(database_url)?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .busy_timeout(options.busy_timeout);

        let pool = SqlitePoolOptions::new()
            .max_connections(options.max_connections)
            .connect_with(connect_options)
            .await?;

        Ok(Self::new(Arc::new(pool)))
    }

    /// Ensures the `urls` table exists by applying the embedded migrations.
    ///
    /// Safe to call on every startup; existing rows are preserved.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Migration`] if a migration fails to apply.
    pub async fn init(&self) -> Result<(), StoreError> {
        sqlx::migrate!("./migrations").run(self.pool.as_ref()).await?;
        Ok(())
    }

    /// Closes every pooled connection. Pending queries finish first.
    pub async fn close(&self) {
        self.pool.close().await;
    }

    /// Returns the underlying pool.
    pub fn pool(&self) -> &SqlitePool {
        self.pool.as_ref()
    }
}

#[async_trait]
impl UrlStore for SqliteUrlStore {
    async fn insert(&self, short_code: &str, long_url: &str) -> Result<UrlRecord, StoreError> {
        let result = sqlx::query_as::<_, UrlRecord>(
            r#"
            INSERT INTO urls (short_code, long_url)
            VALUES (?1, ?2)
            RETURNING id, short_code, long_url, created_at
            "#,
        )
        .bind(short_code)
        .bind(long_url)
        .fetch_one(self.pool.as_ref())
        .await;

        match result {
            Ok(record) => Ok(record),
            Err(e)
                if e
                    .as_database_error()
                    .is_some_and(|db_err| db_err.is_unique_violation()) =>
            {
                Err(StoreError::DuplicateKey {
                    short_code: short_code.to_string(),
                })
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn lookup(&self, short_code: &str) -> Result<Option<String>, StoreError> {
        let long_url = sqlx::query_scalar::<_, String>(
            "SELECT long_url FROM urls WHERE short_code = ?1",
        )
        .bind(short_code)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(long_url)
    }

    async fn find_by_code(&self, short_code: &str) -> Result<Option<UrlRecord>, StoreError> {
        let record = sqlx::query_as::<_, UrlRecord>(
            "SELECT id, short_code, long_url, created_at FROM urls WHERE short_code = ?1",
        )
        .bind(short_code)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(record)
    }

    async fn count(&self) -> Result<i64, StoreError> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM urls")
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(count)
    }

    async fn health_check(&self) -> bool {
        match sqlx::query_scalar::<_, i64>("SELECT 1")
            .fetch_one(self.pool.as_ref())
            .await
        {
            Ok(_) => true,
            Err(e) => {
                tracing::warn!("Database health check failed: {}", e);
                false
            }
        }
    }
}
