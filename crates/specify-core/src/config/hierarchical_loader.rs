//! Hierarchical configuration loader with precedence
//!
//! Loads configuration from multiple sources with the following precedence (low to high):
//! 1. Embedded defaults (built into binary)
//! 2. Runtime config (~/.specify/specify-runtime.yaml)
//! 3. Environment variables (SPECIFY_* prefix)
//! 4. CLI flags (handled by caller)
//!
//! The agent catalog and project-type profiles are embedded only.

use crate::error::{Error, Result};
use crate::types::{AgentCatalog, ProjectTypeCatalog, RuntimeConfig};
use crate::utils::get_home_dir;
use camino::{Utf8Path, Utf8PathBuf};
use rust_embed::RustEmbed;
use serde::de::DeserializeOwned;
use std::env;
use std::fs;

/// Embedded configuration files
#[derive(RustEmbed)]
#[folder = "$CARGO_MANIFEST_DIR/../../embedded/config/"]
#[prefix = ""]
struct EmbeddedConfigs;

const RUNTIME_CONFIG_FILE: &str = "specify-runtime.yaml";

/// Configuration hierarchy loader
pub struct HierarchicalConfigLoader {
    /// Base directory for configuration files
    config_dir: Utf8PathBuf,
}

impl HierarchicalConfigLoader {
    /// Create a loader rooted at ~/.specify
    pub fn new() -> Result<Self> {
        let config_dir = Self::get_config_dir()?;
        Ok(Self { config_dir })
    }

    /// Create a loader with a custom config directory
    pub fn with_dir(config_dir: Utf8PathBuf) -> Self {
        Self { config_dir }
    }

    /// The standard config directory. Not created; a missing directory just means no user file.
    fn get_config_dir() -> Result<Utf8PathBuf> {
        let home = get_home_dir()
            .map_err(|_| Error::invalid_config("Could not determine home directory"))?;
        let home = Utf8PathBuf::from_path_buf(home)
            .map_err(|p| Error::invalid_config(format!("Non UTF-8 home directory: {}", p.display())))?;
        Ok(home.join(".specify"))
    }

    /// Load runtime configuration with hierarchical precedence
    pub fn load_runtime_config(&self) -> Result<RuntimeConfig> {
        let mut config = Self::load_embedded_config::<RuntimeConfig>("runtime-defaults.yaml")?;

        let runtime_config_path = self.config_dir.join(RUNTIME_CONFIG_FILE);
        if runtime_config_path.exists() {
            tracing::debug!("Loading runtime overrides from {}", runtime_config_path);
            config = self.load_yaml_file::<RuntimeConfig>(&runtime_config_path)?;
        }

        self.apply_env_overrides(config)
    }

    /// Load the supported AI assistant catalog
    pub fn load_agent_catalog(&self) -> Result<AgentCatalog> {
        Self::load_embedded_config("agents.yaml")
    }

    /// Load the project-type prose profiles
    pub fn load_project_types(&self) -> Result<ProjectTypeCatalog> {
        Self::load_embedded_config("project-types.yaml")
    }

    /// Load an embedded configuration file
    fn load_embedded_config<T: DeserializeOwned>(filename: &str) -> Result<T> {
        let embedded_file = EmbeddedConfigs::get(filename).ok_or_else(|| {
            Error::config_not_found(format!("Embedded config not found: {}", filename))
        })?;

        let content = std::str::from_utf8(&embedded_file.data).map_err(|_| {
            Error::invalid_config(format!("Invalid UTF-8 in embedded config: {}", filename))
        })?;

        serde_yaml_ng::from_str(content).map_err(|e| {
            Error::invalid_config(format!(
                "Failed to parse embedded config {}: {}",
                filename, e
            ))
        })
    }

    /// Load a YAML file and parse it.
    ///
    /// Every field carries a serde default, so a partial user file keeps
    /// the built-in values for anything it leaves out.
    fn load_yaml_file<T: DeserializeOwned>(&self, path: &Utf8Path) -> Result<T> {
        let content = fs::read_to_string(path)?;
        serde_yaml_ng::from_str(&content)
            .map_err(|e| Error::invalid_config(format!("Failed to parse {}: {}", path, e)))
    }

    /// Apply environment variable overrides to runtime config
    fn apply_env_overrides(&self, mut config: RuntimeConfig) -> Result<RuntimeConfig> {
        if let Ok(val) = env::var("SPECIFY_API_TIMEOUT_SECS") {
            config.network.api_timeout_secs = val.parse().map_err(|_| {
                Error::invalid_config("SPECIFY_API_TIMEOUT_SECS must be a valid number")
            })?;
        }

        if let Ok(val) = env::var("SPECIFY_DOWNLOAD_TIMEOUT_SECS") {
            config.network.download_timeout_secs = val.parse().map_err(|_| {
                Error::invalid_config("SPECIFY_DOWNLOAD_TIMEOUT_SECS must be a valid number")
            })?;
        }

        if let Ok(val) = env::var("SPECIFY_GITHUB_API_URL") {
            config.github.api_url = val;
        }

        if let Ok(val) = env::var("SPECIFY_GITHUB_REPO_OWNER") {
            config.github.repo_owner = val;
        }

        if let Ok(val) = env::var("SPECIFY_GITHUB_REPO_NAME") {
            config.github.repo_name = val;
        }

        Ok(config)
    }

    /// Get the config directory path
    pub fn config_dir(&self) -> &Utf8Path {
        &self.config_dir
    }
}
