//! Builder for GitHub release payloads served by the mock API

use serde_json::{json, Value};

use super::constants::*;

/// Builds the JSON body of `GET /repos/{owner}/{repo}/releases/latest`
#[derive(Debug, Clone)]
pub struct ReleaseBuilder {
    tag_name: String,
    published_at: Option<String>,
    assets: Vec<Value>,
}

impl ReleaseBuilder {
    pub fn new() -> Self {
        Self {
            tag_name: TAG_V0_0_79.to_string(),
            published_at: Some(PUBLISHED_AT.to_string()),
            assets: Vec::new(),
        }
    }

    pub fn tag(mut self, tag: &str) -> Self {
        self.tag_name = tag.to_string();
        self
    }

    pub fn unpublished(mut self) -> Self {
        self.published_at = None;
        self
    }

    /// Add an asset downloadable from `base_url/download/<name>`
    pub fn asset(mut self, base_url: &str, name: &str, size: u64) -> Self {
        self.assets.push(json!({
            "name": name,
            "browser_download_url": format!("{}/download/{}", base_url, name),
            "size": size,
            "content_type": "application/zip",
        }));
        self
    }

    pub fn build(self) -> Value {
        json!({
            "tag_name": self.tag_name,
            "name": self.tag_name,
            "draft": false,
            "prerelease": false,
            "published_at": self.published_at,
            "assets": self.assets,
        })
    }
}

impl Default for ReleaseBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Release carrying copilot-sh, claude-sh and claude-ps assets, in that order
pub fn standard_release(base_url: &str) -> Value {
    ReleaseBuilder::new()
        .asset(base_url, ASSET_COPILOT_SH, 1024)
        .asset(base_url, ASSET_CLAUDE_SH, FAKE_ARCHIVE_CONTENT.len() as u64)
        .asset(base_url, ASSET_CLAUDE_PS, 1024)
        .build()
}
