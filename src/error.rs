//! # Structured Error Handling
//!
//! Crate-level error types for startup and configuration failures. Request-level
//! errors live in [`crate::web::errors`] and map to HTTP responses there.

use thiserror::Error;

/// Errors raised while bootstrapping the service (configuration, sockets).
#[derive(Debug, Error)]
pub enum StorefrontError {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for crate-level operations.
pub type Result<T> = std::result::Result<T, StorefrontError>;
