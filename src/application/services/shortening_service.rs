//! Short URL creation and resolution service.

use std::sync::Arc;

use thiserror::Error;
use tracing::{error, info, warn};

use crate::domain::entities::UrlRecord;
use crate::domain::repositories::{StoreError, UrlStore};
use crate::utils::code_generator::CodeGenerator;
use crate::utils::url_validator::{is_blocked_domain, is_valid_url};

/// Total number of insert attempts before giving up on a request.
pub const MAX_ATTEMPTS: usize = 10;

/// Reasons a submitted URL is refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Invalid URL format")]
    InvalidFormat,

    #[error("This domain is blocked and cannot be shortened")]
    DomainBlocked,
}

/// Errors returned by [`ShorteningService::create_short_url`].
#[derive(Debug, Error)]
pub enum ShortenError {
    /// The URL was rejected; the message is safe to show to the user.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Every attempt collided with an existing code.
    #[error("failed to generate a unique short code after {attempts} attempts")]
    GenerationExhausted { attempts: usize },

    /// The store failed for a reason other than a duplicate code.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Service for creating and resolving short URLs.
///
/// Validates input, draws candidate codes from a [`CodeGenerator`] and relies
/// on the store's uniqueness constraint to detect collisions. The service
/// holds no mutable state of its own.
pub struct ShorteningService<S: UrlStore, G: CodeGenerator> {
    store: Arc<S>,
    generator: G,
}

impl<S: UrlStore, G: CodeGenerator> ShorteningService<S, G> {
    /// Creates a new shortening service.
    pub fn new(store: Arc<S>, generator: G) -> Self {
        Self { store, generator }
    }

    /// Validates `long_url` and stores it under a freshly generated code.
    ///
    /// # Code Generation
    ///
    /// A [`StoreError::DuplicateKey`] from the store triggers a new candidate,
    /// for at most [`MAX_ATTEMPTS`] inserts in total. Any other store error is
    /// returned immediately without retrying.
    ///
    /// # Errors
    ///
    /// Returns [`ShortenError::Validation`] if:
    /// - URL is not an absolute `http`/`https` URL
    /// - URL host is blocked
    ///
    /// Returns [`ShortenError::GenerationExhausted`] after [`MAX_ATTEMPTS`]
    /// collisions and [`ShortenError::Store`] on storage failures.
    pub async fn create_short_url(&self, long_url: &str) -> Result<UrlRecord, ShortenError> {
        if !is_valid_url(long_url) {
            return Err(ValidationError::InvalidFormat.into());
        }

        if is_blocked_domain(long_url) {
            return Err(ValidationError::DomainBlocked.into());
        }

        for attempt in 1..=MAX_ATTEMPTS {
            let short_code = self.generator.generate();

            match self.store.insert(&short_code, long_url).await {
                Ok(record) => {
                    info!(short_code = %record.short_code, attempt, "Short URL created");
                    return Ok(record);
                }
                Err(StoreError::DuplicateKey { short_code }) => {
                    warn!(%short_code, attempt, "Short code collision, retrying");
                }
                Err(e) => return Err(e.into()),
            }
        }

        error!(attempts = MAX_ATTEMPTS, "Gave up generating a unique short code");

        Err(ShortenError::GenerationExhausted {
            attempts: MAX_ATTEMPTS,
        })
    }

    /// Resolves a short code to its long URL.
    ///
    /// Any string is accepted as a code; codes that could never have been
    /// generated simply resolve to `None`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Database`] on database errors.
    pub async fn get_long_url(&self, short_code: &str) -> Result<Option<String>, StoreError> {
        self.store.lookup(short_code).await
    }

    /// Reports whether the underlying store is reachable.
    pub async fn health_check(&self) -> bool {
        self.store.health_check().await
    }

    /// Returns the store this service writes to.
    pub fn store(&self) -> &Arc<S> {
        &self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::MockUrlStore;
    use crate::utils::code_generator::MockCodeGenerator;
    use chrono::Utc;
    use mockall::Sequence;

    fn create_test_record(id: i64, code: &str, url: &str) -> UrlRecord {
        UrlRecord::new(id, code.to_string(), url.to_string(), Utc::now().naive_utc())
    }

    fn duplicate(code: &str) -> StoreError {
        StoreError::DuplicateKey {
            short_code: code.to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_short_url_success() {
        let mut mock_store = MockUrlStore::new();
        let mut mock_generator = MockCodeGenerator::new();

        mock_generator
            .expect_generate()
            .times(1)
            .returning(|| "abcde5".to_string());

        mock_store
            .expect_insert()
            .withf(|code, url| code == "abcde5" && url == "https://example.com")
            .times(1)
            .returning(|code, url| Ok(create_test_record(1, code, url)));

        let service = ShorteningService::new(Arc::new(mock_store), mock_generator);

        let record = service
            .create_short_url("https://example.com")
            .await
            .unwrap();

        assert_eq!(record.short_code, "abcde5");
        assert_eq!(record.long_url, "https://example.com");
    }

    #[tokio::test]
    async fn test_create_short_url_invalid_format() {
        let mut mock_store = MockUrlStore::new();
        let mut mock_generator = MockCodeGenerator::new();

        mock_store.expect_insert().times(0);
        mock_generator.expect_generate().times(0);

        let service = ShorteningService::new(Arc::new(mock_store), mock_generator);

        let result = service.create_short_url("ftp://example.com").await;

        assert!(matches!(
            result,
            Err(ShortenError::Validation(ValidationError::InvalidFormat))
        ));
    }

    #[tokio::test]
    async fn test_create_short_url_blocked_domain() {
        let mut mock_store = MockUrlStore::new();
        let mut mock_generator = MockCodeGenerator::new();

        mock_store.expect_insert().times(0);
        mock_generator.expect_generate().times(0);

        let service = ShorteningService::new(Arc::new(mock_store), mock_generator);

        let result = service.create_short_url("http://www.blocked.com/page").await;

        let err = result.unwrap_err();
        assert!(matches!(
            err,
            ShortenError::Validation(ValidationError::DomainBlocked)
        ));
        assert_eq!(
            err.to_string(),
            "This domain is blocked and cannot be shortened"
        );
    }

    #[tokio::test]
    async fn test_create_short_url_retries_on_collision() {
        let mut mock_store = MockUrlStore::new();
        let mut mock_generator = MockCodeGenerator::new();
        let mut seq = Sequence::new();

        mock_generator
            .expect_generate()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|| "taken5".to_string());
        mock_store
            .expect_insert()
            .withf(|code, _| code == "taken5")
            .times(1)
            .in_sequence(&mut seq)
            .returning(|code, _| Err(duplicate(code)));

        mock_generator
            .expect_generate()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|| "fresh5".to_string());
        mock_store
            .expect_insert()
            .withf(|code, _| code == "fresh5")
            .times(1)
            .in_sequence(&mut seq)
            .returning(|code, url| Ok(create_test_record(2, code, url)));

        let service = ShorteningService::new(Arc::new(mock_store), mock_generator);

        let record = service
            .create_short_url("https://example.com/retry")
            .await
            .unwrap();

        assert_eq!(record.short_code, "fresh5");
    }

    #[tokio::test]
    async fn test_create_short_url_exhausts_after_max_attempts() {
        let mut mock_store = MockUrlStore::new();
        let mut mock_generator = MockCodeGenerator::new();

        mock_generator
            .expect_generate()
            .times(MAX_ATTEMPTS)
            .returning(|| "taken5".to_string());
        mock_store
            .expect_insert()
            .times(MAX_ATTEMPTS)
            .returning(|code, _| Err(duplicate(code)));

        let service = ShorteningService::new(Arc::new(mock_store), mock_generator);

        let result = service.create_short_url("https://example.com").await;

        assert!(matches!(
            result,
            Err(ShortenError::GenerationExhausted { attempts: 10 })
        ));
    }

    #[tokio::test]
    async fn test_create_short_url_does_not_retry_other_store_errors() {
        let mut mock_store = MockUrlStore::new();
        let mut mock_generator = MockCodeGenerator::new();

        mock_generator
            .expect_generate()
            .times(1)
            .returning(|| "abcde5".to_string());
        mock_store
            .expect_insert()
            .times(1)
            .returning(|_, _| Err(StoreError::Database(sqlx::Error::PoolTimedOut)));

        let service = ShorteningService::new(Arc::new(mock_store), mock_generator);

        let result = service.create_short_url("https://example.com").await;

        assert!(matches!(
            result,
            Err(ShortenError::Store(StoreError::Database(_)))
        ));
    }

    #[tokio::test]
    async fn test_get_long_url_delegates_to_store() {
        let mut mock_store = MockUrlStore::new();

        mock_store
            .expect_lookup()
            .withf(|code| code == "abcde5")
            .times(1)
            .returning(|_| Ok(Some("https://example.com".to_string())));
        mock_store
            .expect_lookup()
            .withf(|code| code == "not a real code!")
            .times(1)
            .returning(|_| Ok(None));

        let service = ShorteningService::new(Arc::new(mock_store), MockCodeGenerator::new());

        assert_eq!(
            service.get_long_url("abcde5").await.unwrap(),
            Some("https://example.com".to_string())
        );
        assert_eq!(service.get_long_url("not a real code!").await.unwrap(), None);
    }
}
