//! Domain layer for the dig-site viewer
//!
//! This module contains the core models and the port traits that
//! infrastructure adapters implement.

pub mod errors;
pub mod models;
pub mod ports;

// Re-export error types for convenient access
pub use errors::{ApiError, CacheError, DomainError, DomainResult};
