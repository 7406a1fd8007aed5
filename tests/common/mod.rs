#![allow(dead_code)]

use snaplink::application::services::ShorteningService;
use snaplink::infrastructure::persistence::SqliteUrlStore;
use snaplink::state::AppState;
use snaplink::utils::code_generator::{CodeGenerator, RandomCodeGenerator};
use sqlx::SqlitePool;
use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

pub const TEST_BASE_URL: &str = "http://short.test";
pub const CHALLENGE: &str = "X-Intern-Challenge";

pub fn create_test_store(pool: SqlitePool) -> Arc<SqliteUrlStore> {
    Arc::new(SqliteUrlStore::new(Arc::new(pool)))
}

pub fn create_test_state(pool: SqlitePool) -> AppState {
    let store = create_test_store(pool);
    let service = Arc::new(ShorteningService::new(store, RandomCodeGenerator));
    AppState::new(service, TEST_BASE_URL)
}

pub async fn create_test_url(pool: &SqlitePool, code: &str, url: &str) {
    sqlx::query("INSERT INTO urls (short_code, long_url) VALUES (?1, ?2)")
        .bind(code)
        .bind(url)
        .execute(pool)
        .await
        .unwrap();
}

pub async fn count_urls(pool: &SqlitePool) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM urls")
        .fetch_one(pool)
        .await
        .unwrap()
}

/// Generator that hands out a fixed list of codes, repeating the last one
/// once the list runs out.
pub struct ScriptedGenerator {
    codes: Mutex<VecDeque<String>>,
    last: String,
    calls: Arc<AtomicUsize>,
}

impl ScriptedGenerator {
    pub fn new(codes: &[&str]) -> Self {
        Self {
            codes: Mutex::new(codes.iter().map(|c| c.to_string()).collect()),
            last: codes.last().map(|c| c.to_string()).unwrap_or_default(),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Always returns `code`.
    pub fn always(code: &str) -> Self {
        Self::new(&[code])
    }

    /// Shared counter of `generate` calls; stays valid after the generator
    /// moves into a service.
    pub fn call_counter(&self) -> Arc<AtomicUsize> {
        self.calls.clone()
    }
}

impl CodeGenerator for ScriptedGenerator {
    fn generate(&self) -> String {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.codes
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| self.last.clone())
    }
}
