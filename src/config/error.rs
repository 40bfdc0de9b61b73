//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Invalid catalog base URL: {0}")]
    InvalidCatalogUrl(String),

    #[error("Invalid request timeout")]
    InvalidTimeout,

    #[error("Timing value must be greater than zero: {0}")]
    ZeroDuration(&'static str),

    #[error("Invalid log level: {0}")]
    InvalidLogLevel(String),
}
