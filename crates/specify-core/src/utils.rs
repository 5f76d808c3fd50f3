//! Shared utility functions for Specify crates

use anyhow::anyhow;
use std::path::PathBuf;

/// Get the user's home directory
///
/// `HOME` wins over `dirs::home_dir()` so tests and containers can redirect it.
pub fn get_home_dir() -> anyhow::Result<PathBuf> {
    if let Ok(home) = std::env::var("HOME") {
        if !home.is_empty() {
            return Ok(PathBuf::from(home));
        }
    }

    dirs::home_dir().ok_or_else(|| anyhow!("Could not determine home directory"))
}

/// Resolve the GitHub token: explicit value, then `GH_TOKEN`, then `GITHUB_TOKEN`.
///
/// The first non-empty candidate is taken and then trimmed; a value that is
/// only whitespace means "no token" and does not fall through.
pub fn resolve_github_token(explicit: Option<&str>) -> Option<String> {
    let candidates = [
        explicit.map(str::to_string),
        std::env::var("GH_TOKEN").ok(),
        std::env::var("GITHUB_TOKEN").ok(),
    ];

    let chosen = candidates.into_iter().flatten().find(|t| !t.is_empty())?;
    let token = chosen.trim();
    if token.is_empty() {
        None
    } else {
        Some(token.to_string())
    }
}

/// Current UTC time in the `%Y-%m-%dT%H:%M:%SZ` form used by generated files
pub fn utc_timestamp() -> String {
    chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ").to_string()
}
