//! Error types for specify-release

use crate::http::HttpDiagnostic;
use thiserror::Error;

/// Result type alias using specify-release's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while resolving and downloading a template release
#[derive(Error, Debug)]
pub enum Error {
    /// The release API could not be reached or answered with something unusable
    #[error("{message}")]
    ReleaseFetch {
        message: String,
        diagnostic: Option<Box<HttpDiagnostic>>,
    },

    /// The release exists but no asset matches the expected name pattern
    #[error("No matching release asset found (expected pattern: {pattern}). Available assets: {}", format_available(.available))]
    NoMatchingAsset {
        pattern: String,
        available: Vec<String>,
    },

    /// Streaming the asset failed; any partial file has already been removed
    #[error("{message}")]
    DownloadHttp {
        message: String,
        diagnostic: Option<Box<HttpDiagnostic>>,
    },

    /// The HTTP client could not be constructed
    #[error("Failed to create HTTP client: {0}")]
    Client(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

fn format_available(available: &[String]) -> String {
    if available.is_empty() {
        "(no assets)".to_string()
    } else {
        available.join(", ")
    }
}

impl Error {
    /// Transport or parse failure against the release API
    pub fn release_fetch(message: impl Into<String>) -> Self {
        Self::ReleaseFetch {
            message: message.into(),
            diagnostic: None,
        }
    }

    /// Non-2xx answer from the release API
    pub fn release_status(diagnostic: HttpDiagnostic) -> Self {
        Self::ReleaseFetch {
            message: diagnostic.render(),
            diagnostic: Some(Box::new(diagnostic)),
        }
    }

    /// Transport failure while streaming an asset
    pub fn download(message: impl Into<String>) -> Self {
        Self::DownloadHttp {
            message: message.into(),
            diagnostic: None,
        }
    }

    /// Non-2xx answer from the asset host
    pub fn download_status(diagnostic: HttpDiagnostic) -> Self {
        Self::DownloadHttp {
            message: diagnostic.render(),
            diagnostic: Some(Box::new(diagnostic)),
        }
    }

    /// Create a no matching asset error
    pub fn no_matching_asset(pattern: impl Into<String>, available: Vec<String>) -> Self {
        Self::NoMatchingAsset {
            pattern: pattern.into(),
            available,
        }
    }

    /// Structured HTTP diagnostic, when the failure came from a non-2xx response
    pub fn diagnostic(&self) -> Option<&HttpDiagnostic> {
        match self {
            Self::ReleaseFetch { diagnostic, .. } | Self::DownloadHttp { diagnostic, .. } => {
                diagnostic.as_deref()
            }
            _ => None,
        }
    }

    /// Short title for the panel the CLI shows for this error
    pub fn title(&self) -> &'static str {
        match self {
            Self::ReleaseFetch { .. } => "Fetch Error",
            Self::NoMatchingAsset { .. } => "Available Assets",
            Self::DownloadHttp { .. } => "Download Error",
            Self::Client(_) | Self::Io(_) => "Error",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_matching_asset_lists_every_name() {
        let err = Error::no_matching_asset(
            "spec-kit-template-claude-sh",
            vec!["a.zip".to_string(), "b.zip".to_string()],
        );
        let text = err.to_string();
        assert!(text.contains("spec-kit-template-claude-sh"));
        assert!(text.contains("a.zip, b.zip"));
    }

    #[test]
    fn test_no_matching_asset_with_empty_release() {
        let err = Error::no_matching_asset("x", Vec::new());
        assert!(err.to_string().contains("(no assets)"));
    }

    #[test]
    fn test_titles() {
        assert_eq!(Error::release_fetch("boom").title(), "Fetch Error");
        assert_eq!(Error::download("boom").title(), "Download Error");
        assert!(Error::download("boom").diagnostic().is_none());
    }
}
