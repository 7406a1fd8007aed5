//! URL record entity representing a stored short code mapping.

use chrono::NaiveDateTime;

/// A persisted mapping from a short code to the original URL.
///
/// Records are created once and never updated or deleted. `long_url` is kept
/// exactly as submitted, without normalization.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct UrlRecord {
    pub id: i64,
    pub short_code: String,
    pub long_url: String,
    pub created_at: NaiveDateTime,
}

impl UrlRecord {
    /// Creates a new UrlRecord instance.
    pub fn new(id: i64, short_code: String, long_url: String, created_at: NaiveDateTime) -> Self {
        Self {
            id,
            short_code,
            long_url,
            created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_url_record_creation() {
        let now = Utc::now().naive_utc();
        let record = UrlRecord::new(
            1,
            "abc125".to_string(),
            "https://example.com".to_string(),
            now,
        );

        assert_eq!(record.id, 1);
        assert_eq!(record.short_code, "abc125");
        assert_eq!(record.long_url, "https://example.com");
        assert_eq!(record.created_at, now);
    }
}
