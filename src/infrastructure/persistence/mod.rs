//! SQLite repository implementations.
//!
//! Concrete implementations of domain repository traits using SQLx.
//!
//! - [`SqliteUrlStore`] - Short code storage and retrieval

pub mod sqlite_url_store;

pub use sqlite_url_store::{SqliteStoreOptions, SqliteUrlStore};
