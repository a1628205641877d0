//! Configuration error types

use thiserror::Error;

/// Errors raised while loading or validating configuration
#[derive(Debug, Error)]
pub enum ConfigurationError {
    /// Underlying loader failure (missing source, type mismatch)
    #[error("Configuration loading error: {0}")]
    Load(#[from] config::ConfigError),

    /// Structurally valid configuration with an unusable value
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}
