//! Template release discovery and download for the Specify CLI
//!
//! Provides:
//! - A GitHub client with bearer-token auth and rate-limit diagnostics
//! - Latest-release lookup and template asset selection
//! - Streamed archive download with progress tracking

pub mod download;
pub mod error;
pub mod http;
pub mod releases;

pub use download::{ArchiveFetcher, DownloadMetadata, DownloadOutcome};
pub use error::{Error, Result};
pub use http::{GitHubClient, HttpDiagnostic, RateLimitInfo};
pub use releases::{select_asset, Release, ReleaseAsset, ReleaseResolver, ResolvedAsset};

/// Current CLI version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
