//! Runtime configuration types for operational parameters
//!
//! These types control network timeouts, the upstream release repository,
//! template archive naming and the git bootstrap step.

use serde::{Deserialize, Serialize};

/// Complete runtime configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct RuntimeConfig {
    /// Network and HTTP configuration
    #[serde(default)]
    pub network: NetworkConfig,

    /// Upstream release repository
    #[serde(default)]
    pub github: GitHubConfig,

    /// Template archive layout
    #[serde(default)]
    pub template: TemplateConfig,

    /// Git workflow defaults
    #[serde(default)]
    pub git_workflow: GitWorkflowConfig,
}

/// Network and HTTP configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct NetworkConfig {
    /// Timeout for release metadata requests
    #[serde(default = "default_api_timeout")]
    pub api_timeout_secs: u64,

    /// Timeout for template archive downloads
    #[serde(default = "default_download_timeout")]
    pub download_timeout_secs: u64,

    /// Timeout for the release lookup done by `specify version`
    #[serde(default = "default_version_timeout")]
    pub version_timeout_secs: u64,

    /// Download chunk size in bytes
    #[serde(default = "default_chunk_size")]
    pub download_chunk_size: usize,

    /// User agent string for HTTP requests
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            api_timeout_secs: default_api_timeout(),
            download_timeout_secs: default_download_timeout(),
            version_timeout_secs: default_version_timeout(),
            download_chunk_size: default_chunk_size(),
            user_agent: default_user_agent(),
        }
    }
}

fn default_api_timeout() -> u64 {
    30
}
fn default_download_timeout() -> u64 {
    60
}
fn default_version_timeout() -> u64 {
    10
}
fn default_chunk_size() -> usize {
    8192
}
fn default_user_agent() -> String {
    format!(
        "specify/{} ({}; {})",
        env!("CARGO_PKG_VERSION"),
        std::env::consts::OS,
        std::env::consts::ARCH
    )
}

/// GitHub repository configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct GitHubConfig {
    /// Repository owner
    #[serde(default = "default_repo_owner")]
    pub repo_owner: String,

    /// Repository name
    #[serde(default = "default_repo_name")]
    pub repo_name: String,

    /// Base URL for GitHub API
    #[serde(default = "default_github_api_url")]
    pub api_url: String,
}

impl GitHubConfig {
    /// URL of the "latest release" resource for the configured repository
    pub fn latest_release_url(&self) -> String {
        format!(
            "{}/repos/{}/{}/releases/latest",
            self.api_url.trim_end_matches('/'),
            self.repo_owner,
            self.repo_name
        )
    }
}

impl Default for GitHubConfig {
    fn default() -> Self {
        Self {
            repo_owner: default_repo_owner(),
            repo_name: default_repo_name(),
            api_url: default_github_api_url(),
        }
    }
}

fn default_repo_owner() -> String {
    "mb-etc".to_string()
}
fn default_repo_name() -> String {
    "spec-kit-etc".to_string()
}
fn default_github_api_url() -> String {
    "https://api.github.com".to_string()
}

/// Template archive naming and post-extraction layout
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct TemplateConfig {
    /// Prefix shared by every template asset name
    #[serde(default = "default_asset_prefix")]
    pub asset_prefix: String,

    /// Required suffix of a template asset name
    #[serde(default = "default_asset_extension")]
    pub asset_extension: String,

    /// Directory (relative to the project root) swept for executable scripts
    #[serde(default = "default_scripts_dir")]
    pub scripts_dir: String,

    /// Extension of files considered by the executable-bit sweep
    #[serde(default = "default_script_extension")]
    pub script_extension: String,

    /// File name that is deep-merged instead of overwritten
    #[serde(default = "default_merge_file")]
    pub merge_file: String,

    /// Parent directory name the deep-merged file must live in
    #[serde(default = "default_merge_parent")]
    pub merge_parent: String,
}

impl TemplateConfig {
    /// Substring an asset name must contain for the given agent and script flavor
    pub fn asset_pattern(&self, agent: &str, script: &str) -> String {
        format!("{}-{}-{}", self.asset_prefix, agent, script)
    }
}

impl Default for TemplateConfig {
    fn default() -> Self {
        Self {
            asset_prefix: default_asset_prefix(),
            asset_extension: default_asset_extension(),
            scripts_dir: default_scripts_dir(),
            script_extension: default_script_extension(),
            merge_file: default_merge_file(),
            merge_parent: default_merge_parent(),
        }
    }
}

fn default_asset_prefix() -> String {
    "spec-kit-template".to_string()
}
fn default_asset_extension() -> String {
    ".zip".to_string()
}
fn default_scripts_dir() -> String {
    ".specify/scripts".to_string()
}
fn default_script_extension() -> String {
    ".sh".to_string()
}
fn default_merge_file() -> String {
    "settings.json".to_string()
}
fn default_merge_parent() -> String {
    ".vscode".to_string()
}

/// Git workflow configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct GitWorkflowConfig {
    /// Message used for the first commit of a new project
    #[serde(default = "default_initial_commit_message")]
    pub initial_commit_message: String,
}

impl Default for GitWorkflowConfig {
    fn default() -> Self {
        Self {
            initial_commit_message: default_initial_commit_message(),
        }
    }
}

fn default_initial_commit_message() -> String {
    "Initial commit from Specify template".to_string()
}
