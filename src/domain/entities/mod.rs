//! Core domain entities.
//!
//! - [`UrlRecord`] - A stored short code to long URL mapping

pub mod url_record;

pub use url_record::UrlRecord;
