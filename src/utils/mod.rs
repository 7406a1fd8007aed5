//! Utility functions for code generation and URL checks.
//!
//! - [`code_generator`] - Short code generation
//! - [`url_validator`] - URL format and blocklist checks

pub mod code_generator;
pub mod url_validator;
