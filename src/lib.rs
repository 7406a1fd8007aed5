//! # Snaplink
//!
//! A small URL shortening service built with Axum and SQLite.
//!
//! ## Architecture
//!
//! This crate follows Clean Architecture principles with clear layer separation:
//!
//! - **Domain Layer** ([`domain`]) - URL record entity and the store trait
//! - **Application Layer** ([`application`]) - Validation and code generation with retry
//! - **Infrastructure Layer** ([`infrastructure`]) - SQLite persistence
//! - **API Layer** ([`api`]) - REST API handlers, DTOs, and middleware
//!
//! ## Features
//!
//! - Six character short codes with collision retry
//! - Blocked domain list
//! - `X-Intern-Challenge` header gate on link creation
//! - `302` redirects for known codes
//!
//! ## Quick Start
//!
//! ```bash
//! # Optional: where to keep the database (default: ./urls.db)
//! export DATABASE_PATH="/var/lib/snaplink/urls.db"
//!
//! # Start the service (migrations are applied on startup)
//! cargo run
//! ```
//!
//! ## Configuration
//!
//! Service configuration is loaded from environment variables via [`config::Config`].
//! See [`config`] module for available options.

pub mod api;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod state;
pub mod utils;

pub mod config;
pub mod server;
pub mod telemetry;

pub mod routes;

pub use error::AppError;
pub use state::AppState;

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library users
/// and integration tests.
pub mod prelude {
    pub use crate::application::services::{ShortenError, ShorteningService, ValidationError};
    pub use crate::domain::entities::UrlRecord;
    pub use crate::domain::repositories::{StoreError, UrlStore};
    pub use crate::error::AppError;
    pub use crate::infrastructure::persistence::{SqliteStoreOptions, SqliteUrlStore};
    pub use crate::state::AppState;
    pub use crate::utils::code_generator::{CodeGenerator, RandomCodeGenerator};
}
