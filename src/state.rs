use std::sync::Arc;

use crate::application::services::ShorteningService;
use crate::infrastructure::persistence::SqliteUrlStore;
use crate::utils::code_generator::RandomCodeGenerator;

/// Shortening service wired to the production store and generator.
pub type AppShorteningService = ShorteningService<SqliteUrlStore, RandomCodeGenerator>;

/// Shared state injected into every handler.
#[derive(Clone)]
pub struct AppState {
    pub shortening_service: Arc<AppShorteningService>,
    /// Public prefix for generated short URLs, without a trailing slash.
    pub base_url: Arc<str>,
}

impl AppState {
    pub fn new(shortening_service: Arc<AppShorteningService>, base_url: &str) -> Self {
        Self {
            shortening_service,
            base_url: Arc::from(base_url.trim_end_matches('/')),
        }
    }

    /// Builds the public URL for `short_code`.
    pub fn short_url(&self, short_code: &str) -> String {
        format!("{}/{}", self.base_url, short_code)
    }
}
