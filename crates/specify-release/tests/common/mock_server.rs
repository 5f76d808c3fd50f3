//! Mock server helpers for the release API and asset host

use serde_json::Value;
use specify_core::types::{GitHubConfig, NetworkConfig, TemplateConfig};
use specify_release::{ArchiveFetcher, GitHubClient, ReleaseResolver};
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::constants::*;

/// Serve `release` as the latest release
pub async fn mock_latest_release(server: &MockServer, release: &Value) {
    Mock::given(method("GET"))
        .and(path(LATEST_RELEASE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(release))
        .mount(server)
        .await;
}

/// Serve a rate-limited answer for the latest release
pub async fn mock_rate_limited_release(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path(LATEST_RELEASE_PATH))
        .respond_with(
            ResponseTemplate::new(403)
                .insert_header("x-ratelimit-limit", "60")
                .insert_header("x-ratelimit-remaining", "0")
                .insert_header("x-ratelimit-reset", "1700000000")
                .insert_header("retry-after", "3600")
                .set_body_string("{\"message\":\"API rate limit exceeded\"}"),
        )
        .mount(server)
        .await;
}

/// Serve `content` for an asset name
pub async fn mock_asset_download(server: &MockServer, name: &str, content: &[u8]) {
    Mock::given(method("GET"))
        .and(path(format!("/download/{}", name)))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(content.to_vec()))
        .mount(server)
        .await;
}

/// Asset host that always fails with `status`
pub async fn mock_failing_download(server: &MockServer, name: &str, status: u16) {
    Mock::given(method("GET"))
        .and(path(format!("/download/{}", name)))
        .respond_with(ResponseTemplate::new(status).set_body_string("asset host is down"))
        .mount(server)
        .await;
}

/// GitHub settings pointing at the mock server
pub fn github_config(server: &MockServer) -> GitHubConfig {
    GitHubConfig {
        api_url: server.uri(),
        ..Default::default()
    }
}

pub fn test_client(token: Option<&str>, debug: bool) -> GitHubClient {
    GitHubClient::builder(&NetworkConfig::default())
        .token(token.map(str::to_string))
        .debug(debug)
        .build()
        .expect("client")
}

pub fn test_resolver(server: &MockServer, client: GitHubClient) -> ReleaseResolver {
    ReleaseResolver::new(
        client,
        github_config(server),
        TemplateConfig::default(),
        Duration::from_secs(5),
    )
}

pub fn test_fetcher(client: GitHubClient) -> ArchiveFetcher {
    ArchiveFetcher::new(client, Duration::from_secs(5), 8192)
}
