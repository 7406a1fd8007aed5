//! HTTP middleware for request processing.
//!
//! Provides the header gate, CORS, panic recovery, and observability.

pub mod challenge;
pub mod cors;
pub mod panic;
pub mod tracing;
