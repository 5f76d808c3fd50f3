//! Mock release API and asset host

use serde_json::json;
use specify_core::types::{GitHubConfig, NetworkConfig, TemplateConfig};
use specify_project::{MergeRule, TemplatePipeline};
use specify_release::{ArchiveFetcher, GitHubClient, ReleaseResolver};
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::fixtures::*;

pub const LATEST_RELEASE_PATH: &str = "/repos/mb-etc/spec-kit-etc/releases/latest";

/// Serve a release listing [`ASSET_NAME`] and the archive bytes behind it
pub async fn mock_template_release(server: &MockServer, archive: Vec<u8>) {
    let release = json!({
        "tag_name": TAG,
        "published_at": "2025-10-01T08:00:00Z",
        "assets": [{
            "name": ASSET_NAME,
            "browser_download_url": format!("{}/download/{}", server.uri(), ASSET_NAME),
            "size": archive.len(),
        }],
    });

    Mock::given(method("GET"))
        .and(path(LATEST_RELEASE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(release))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path(format!("/download/{}", ASSET_NAME)))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(archive))
        .mount(server)
        .await;
}

/// Answer the release lookup with a rate-limit error
pub async fn mock_rate_limited(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path(LATEST_RELEASE_PATH))
        .respond_with(
            ResponseTemplate::new(403)
                .insert_header("x-ratelimit-limit", "60")
                .insert_header("x-ratelimit-remaining", "0"),
        )
        .mount(server)
        .await;
}

pub fn test_pipeline(server: &MockServer) -> TemplatePipeline {
    let network = NetworkConfig::default();
    let client = GitHubClient::builder(&network).build().expect("client");
    let github = GitHubConfig {
        api_url: server.uri(),
        ..Default::default()
    };
    let resolver = ReleaseResolver::new(
        client.clone(),
        github,
        TemplateConfig::default(),
        Duration::from_secs(5),
    );
    let fetcher = ArchiveFetcher::new(client, Duration::from_secs(5), network.download_chunk_size);
    TemplatePipeline::new(resolver, fetcher, MergeRule::default())
}
