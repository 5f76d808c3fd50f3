//! # specify-core
//!
//! Core library for the Specify CLI providing:
//! - Runtime configuration with embedded defaults, user file and env overrides
//! - The AI assistant catalog and project-type profiles
//! - Shared helpers (home directory, GitHub token resolution, timestamps)

pub mod config;
pub mod error;
pub mod types;
pub mod utils;

pub use config::HierarchicalConfigLoader;
pub use error::{Error, Result};
pub use utils::{get_home_dir, resolve_github_token, utc_timestamp};
