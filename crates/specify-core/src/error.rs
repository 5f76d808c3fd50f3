//! Error types for specify-core

use thiserror::Error;

/// Result type alias using specify-core's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error types for Specify
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration file not found
    #[error("Configuration file not found: {path}")]
    ConfigNotFound { path: String },

    /// Invalid configuration format
    #[error("Invalid configuration format: {message}")]
    InvalidConfig { message: String },

    /// YAML parsing error
    #[error("YAML parsing error: {0}")]
    YamlParse(#[from] serde_yaml_ng::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Value outside a fixed set of choices
    #[error("Invalid {kind} '{value}'. Choose from: {valid}")]
    InvalidChoice {
        kind: String,
        value: String,
        valid: String,
    },
}

impl Error {
    /// Create a config not found error
    pub fn config_not_found(path: impl Into<String>) -> Self {
        Self::ConfigNotFound { path: path.into() }
    }

    /// Create an invalid config error
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    /// Create an invalid choice error
    pub fn invalid_choice(
        kind: impl Into<String>,
        value: impl Into<String>,
        valid: impl Into<String>,
    ) -> Self {
        Self::InvalidChoice {
            kind: kind.into(),
            value: value.into(),
            valid: valid.into(),
        }
    }
}
