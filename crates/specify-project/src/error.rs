//! Error types for specify-project

use thiserror::Error;

/// Result type alias using specify-project's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Project extraction and finalization errors
#[derive(Error, Debug)]
pub enum Error {
    /// Unzipping or reconciling the template tree failed
    #[error("Extraction failed: {message}")]
    Extraction { message: String },

    /// Fresh-directory mode requires an absent destination
    #[error("Directory '{path}' already exists")]
    DestinationExists { path: String },

    /// `.specify/context.yaml` is missing
    #[error("No context file found at {path}. Run 'specify init' to create one.")]
    ContextNotFound { path: String },

    /// Context store read or update failed
    #[error("Context error: {message}")]
    Context { message: String },

    /// Template error from Tera
    #[error("Template error: {0}")]
    Template(#[from] tera::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing error
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML parsing error
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),

    /// Archive format error
    #[error("Archive error: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// Release lookup or download failed
    #[error(transparent)]
    Release(#[from] specify_release::Error),

    /// Core library error
    #[error("Core error: {0}")]
    Core(#[from] specify_core::Error),
}

impl Error {
    /// Create an extraction error
    pub fn extraction(message: impl Into<String>) -> Self {
        Self::Extraction {
            message: message.into(),
        }
    }

    /// Create a destination exists error
    pub fn destination_exists(path: impl Into<String>) -> Self {
        Self::DestinationExists { path: path.into() }
    }

    /// Create a context not found error
    pub fn context_not_found(path: impl Into<String>) -> Self {
        Self::ContextNotFound { path: path.into() }
    }

    /// Create a context error
    pub fn context(message: impl Into<String>) -> Self {
        Self::Context {
            message: message.into(),
        }
    }

    /// Short heading for the failure panel shown by the CLI
    pub fn title(&self) -> &'static str {
        match self {
            Self::Release(e) => e.title(),
            Self::Extraction { .. } | Self::Zip(_) => "Extraction Error",
            Self::DestinationExists { .. } => "Directory Conflict",
            Self::ContextNotFound { .. } | Self::Context { .. } => "Context Error",
            _ => "Error",
        }
    }
}
