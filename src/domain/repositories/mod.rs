//! Repository trait definitions for the domain layer.
//!
//! Traits define the contract for data operations; implementations live in
//! `crate::infrastructure::persistence`. Mock implementations are generated
//! via `mockall` for unit tests.
//!
//! # Available Repositories
//!
//! - [`UrlStore`] - Short code to long URL mappings
//!
//! # Testing
//!
//! See integration tests in `tests/repository_*.rs` for usage examples.

pub mod url_store;

pub use url_store::{StoreError, UrlStore};

#[cfg(test)]
pub use url_store::MockUrlStore;
