//! CLI command implementations

pub mod check;
pub mod context;
pub mod init;
pub mod version;

use anyhow::{anyhow, Result};
use camino::Utf8PathBuf;

/// Current directory as a UTF-8 path
pub(crate) fn current_dir() -> Result<Utf8PathBuf> {
    let cwd = std::env::current_dir()?;
    Utf8PathBuf::from_path_buf(cwd)
        .map_err(|p| anyhow!("Current directory is not valid UTF-8: {}", p.display()))
}
