//! GitHub release lookup and template asset selection

use crate::error::{Error, Result};
use crate::http::GitHubClient;
use serde::Deserialize;
use specify_core::types::{GitHubConfig, ScriptType, TemplateConfig};
use std::time::Duration;
use tracing::{debug, info};

/// Characters of the API response body kept in debug diagnostics
const API_BODY_EXCERPT: usize = 500;

/// Characters of an unparseable body quoted in the parse error
const PARSE_BODY_EXCERPT: usize = 400;

/// Release information
#[derive(Debug, Clone, Deserialize)]
pub struct Release {
    /// Release tag (e.g., "v0.0.79")
    pub tag_name: String,

    /// Release assets, in API order
    #[serde(default)]
    pub assets: Vec<ReleaseAsset>,

    /// Published date (RFC 3339)
    #[serde(default)]
    pub published_at: Option<String>,
}

impl Release {
    /// Tag without a leading `v`
    pub fn version(&self) -> &str {
        self.tag_name.strip_prefix('v').unwrap_or(&self.tag_name)
    }

    /// Publish date as `YYYY-MM-DD`
    pub fn published_date(&self) -> Option<String> {
        let published = self.published_at.as_deref()?;
        match chrono::DateTime::parse_from_rfc3339(published) {
            Ok(dt) => Some(dt.format("%Y-%m-%d").to_string()),
            Err(_) => published.get(..10).map(str::to_string),
        }
    }

    pub fn asset_names(&self) -> Vec<String> {
        self.assets.iter().map(|a| a.name.clone()).collect()
    }
}

/// Release asset
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ReleaseAsset {
    /// Asset name
    pub name: String,

    /// Download URL
    pub browser_download_url: String,

    /// Asset size in bytes
    #[serde(default)]
    pub size: u64,
}

/// The asset chosen for an (agent, script) pair together with its release
#[derive(Debug, Clone)]
pub struct ResolvedAsset {
    pub release_tag: String,
    pub published_at: Option<String>,
    pub asset: ReleaseAsset,
}

/// Pick the first asset whose name contains `pattern` and ends with `extension`.
///
/// Selection follows the order the API listed the assets in; there is no
/// tie-break on size or date.
pub fn select_asset<'a>(
    release: &'a Release,
    pattern: &str,
    extension: &str,
) -> Result<&'a ReleaseAsset> {
    release
        .assets
        .iter()
        .find(|a| a.name.contains(pattern) && a.name.ends_with(extension))
        .ok_or_else(|| Error::no_matching_asset(pattern, release.asset_names()))
}

/// Looks up the latest template release and selects assets from it
#[derive(Debug, Clone)]
pub struct ReleaseResolver {
    client: GitHubClient,
    github: GitHubConfig,
    template: TemplateConfig,
    timeout: Duration,
}

impl ReleaseResolver {
    pub fn new(
        client: GitHubClient,
        github: GitHubConfig,
        template: TemplateConfig,
        timeout: Duration,
    ) -> Self {
        Self {
            client,
            github,
            template,
            timeout,
        }
    }

    /// Get latest release
    pub async fn latest(&self) -> Result<Release> {
        let url = self.github.latest_release_url();
        debug!("Fetching latest release from: {}", url);

        let response = self
            .client
            .get(&url, self.timeout)
            .send()
            .await
            .map_err(|e| Error::release_fetch(format!("Failed to reach {}: {}", url, e)))?;

        if !response.status().is_success() {
            let diagnostic = self.client.diagnose(response, &url, API_BODY_EXCERPT).await;
            return Err(Error::release_status(diagnostic));
        }

        let body = response
            .text()
            .await
            .map_err(|e| Error::release_fetch(format!("Failed to read release response: {}", e)))?;

        serde_json::from_str(&body).map_err(|e| {
            let excerpt: String = body.chars().take(PARSE_BODY_EXCERPT).collect();
            Error::release_fetch(format!(
                "Failed to parse release JSON: {}\nRaw (truncated {}): {}",
                e, PARSE_BODY_EXCERPT, excerpt
            ))
        })
    }

    /// Resolve the template asset for an agent and script flavor from the latest release
    pub async fn resolve(&self, agent: &str, script: ScriptType) -> Result<ResolvedAsset> {
        let release = self.latest().await?;
        let pattern = self.template.asset_pattern(agent, script.as_str());
        let asset = select_asset(&release, &pattern, &self.template.asset_extension)?.clone();

        info!(
            "Selected {} from release {} ({} bytes)",
            asset.name, release.tag_name, asset.size
        );

        Ok(ResolvedAsset {
            release_tag: release.tag_name,
            published_at: release.published_at,
            asset,
        })
    }
}
