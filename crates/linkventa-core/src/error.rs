//! Core error types.

use thiserror::Error;

/// Errors raised by domain validation and configuration loading.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    /// Form or payload failed validation.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Configuration is malformed or inconsistent.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<toml::de::Error> for CoreError {
    fn from(e: toml::de::Error) -> Self {
        CoreError::Config(e.to_string())
    }
}
