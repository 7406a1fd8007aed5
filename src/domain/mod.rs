//! Domain layer containing business entities and storage contracts.
//!
//! - [`entities`] - Core business data structures
//! - [`repositories`] - Data access trait definitions
//!
//! The domain layer has no dependency on the HTTP layer. Repository traits are
//! implemented by the infrastructure layer and consumed by
//! [`crate::application::services`].

pub mod entities;
pub mod repositories;
