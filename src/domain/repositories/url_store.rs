//! Store trait for short code persistence.

use crate::domain::entities::UrlRecord;
use async_trait::async_trait;
use thiserror::Error;

/// Errors returned by [`UrlStore`] implementations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The short code is already taken. Callers may retry with another code.
    #[error("short code '{short_code}' already exists")]
    DuplicateKey { short_code: String },

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("schema migration failed: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

impl StoreError {
    /// Returns true for [`StoreError::DuplicateKey`].
    pub fn is_duplicate_key(&self) -> bool {
        matches!(self, Self::DuplicateKey { .. })
    }
}

/// Durable mapping from short codes to long URLs.
///
/// Uniqueness of `short_code` is enforced by the store itself: `insert` must
/// perform the uniqueness check and the write atomically, so two concurrent
/// inserts of the same code yield exactly one success and one
/// [`StoreError::DuplicateKey`].
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::SqliteUrlStore`] - SQLite implementation
/// - Test mocks available with `cfg(test)`
///
/// # Examples
///
/// See integration tests: `tests/repository_url.rs`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UrlStore: Send + Sync {
    /// Inserts a new record and returns it as stored.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::DuplicateKey`] if `short_code` already exists.
    ///
    /// Returns [`StoreError::Database`] on any other persistence failure.
    async fn insert(&self, short_code: &str, long_url: &str) -> Result<UrlRecord, StoreError>;

    /// Returns the long URL stored for an exact `short_code` match.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Database`] on database errors.
    async fn lookup(&self, short_code: &str) -> Result<Option<String>, StoreError>;

    /// Returns the full record for `short_code`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Database`] on database errors.
    async fn find_by_code(&self, short_code: &str) -> Result<Option<UrlRecord>, StoreError>;

    /// Counts stored records.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Database`] on database errors.
    async fn count(&self) -> Result<i64, StoreError>;

    /// Checks that the backing database answers queries.
    async fn health_check(&self) -> bool;
}
