//! Archive download against a mocked asset host
//!
//! Tests cover:
//! - Streaming the asset into the destination directory
//! - Download metadata for the step tracker
//! - Partial file removal on non-2xx answers
//! - Progress bar enabled without a terminal

mod common;

use common::*;
use specify_core::types::ScriptType;
use specify_release::Error;
use std::fs;
use tempfile::TempDir;
use wiremock::MockServer;

#[tokio::test]
async fn test_fetch_writes_asset_into_dest_dir() {
    let server = MockServer::start().await;
    mock_latest_release(&server, &standard_release(&server.uri())).await;
    mock_asset_download(&server, ASSET_CLAUDE_SH, FAKE_ARCHIVE_CONTENT).await;

    let client = test_client(None, false);
    let resolved = test_resolver(&server, client.clone())
        .resolve("claude", ScriptType::Sh)
        .await
        .unwrap();

    let dest = TempDir::new().unwrap();
    let outcome = test_fetcher(client)
        .fetch(&resolved, dest.path())
        .await
        .unwrap();

    assert_eq!(outcome.local_path, dest.path().join(ASSET_CLAUDE_SH));
    assert_eq!(fs::read(&outcome.local_path).unwrap(), FAKE_ARCHIVE_CONTENT);

    let metadata = outcome.metadata;
    assert_eq!(metadata.filename, ASSET_CLAUDE_SH);
    assert_eq!(metadata.size, FAKE_ARCHIVE_CONTENT.len() as u64);
    assert_eq!(metadata.release_tag, TAG_V0_0_79);
    assert!(metadata.source_url.ends_with(ASSET_CLAUDE_SH));
}

#[tokio::test]
async fn test_fetch_larger_than_chunk_size() {
    let server = MockServer::start().await;
    let content: Vec<u8> = (0..50_000u32).map(|i| (i % 251) as u8).collect();
    let release = ReleaseBuilder::new()
        .asset(&server.uri(), ASSET_CLAUDE_SH, content.len() as u64)
        .build();
    mock_latest_release(&server, &release).await;
    mock_asset_download(&server, ASSET_CLAUDE_SH, &content).await;

    let client = test_client(None, false);
    let resolved = test_resolver(&server, client.clone())
        .resolve("claude", ScriptType::Sh)
        .await
        .unwrap();

    let dest = TempDir::new().unwrap();
    let outcome = specify_release::ArchiveFetcher::new(client, std::time::Duration::from_secs(5), 1024)
        .with_progress(true)
        .fetch(&resolved, dest.path())
        .await
        .unwrap();

    assert_eq!(fs::read(&outcome.local_path).unwrap(), content);
}

#[tokio::test]
async fn test_failed_download_leaves_no_file() {
    let server = MockServer::start().await;
    mock_latest_release(&server, &standard_release(&server.uri())).await;
    mock_failing_download(&server, ASSET_CLAUDE_SH, 502).await;

    let client = test_client(None, false);
    let resolved = test_resolver(&server, client.clone())
        .resolve("claude", ScriptType::Sh)
        .await
        .unwrap();

    let dest = TempDir::new().unwrap();
    // Stale file from an earlier interrupted run
    fs::write(dest.path().join(ASSET_CLAUDE_SH), b"stale").unwrap();

    let err = test_fetcher(client)
        .fetch(&resolved, dest.path())
        .await
        .unwrap_err();

    assert!(matches!(err, Error::DownloadHttp { .. }));
    assert_eq!(err.diagnostic().map(|d| d.status), Some(502));
    assert!(!dest.path().join(ASSET_CLAUDE_SH).exists());
}

#[tokio::test]
async fn test_debug_download_failure_includes_body() {
    let server = MockServer::start().await;
    mock_latest_release(&server, &standard_release(&server.uri())).await;
    mock_failing_download(&server, ASSET_CLAUDE_SH, 404).await;

    let client = test_client(None, true);
    let resolved = test_resolver(&server, client.clone())
        .resolve("claude", ScriptType::Sh)
        .await
        .unwrap();

    let dest = TempDir::new().unwrap();
    let err = test_fetcher(client)
        .fetch(&resolved, dest.path())
        .await
        .unwrap_err();

    assert!(err.to_string().contains("asset host is down"));
}
