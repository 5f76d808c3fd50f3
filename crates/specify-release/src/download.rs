//! Template archive download with progress tracking
//!
//! The asset body is streamed straight to `<dest_dir>/<asset name>` through a
//! buffered writer sized to the configured chunk size, so memory use does not
//! grow with the archive. A failed download never leaves a partial file behind.

use crate::error::{Error, Result};
use crate::http::GitHubClient;
use crate::releases::ResolvedAsset;
use futures_util::StreamExt;
use indicatif::{ProgressBar, ProgressStyle};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info, warn};

/// Characters of the asset host response body kept in debug diagnostics
const ASSET_BODY_EXCERPT: usize = 400;

/// Details of a finished download, for logging and the step tracker
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadMetadata {
    pub filename: String,
    /// Size declared by the release API
    pub size: u64,
    pub release_tag: String,
    pub source_url: String,
}

/// Result of a download operation
#[derive(Debug, Clone)]
pub struct DownloadOutcome {
    /// Where the archive was written. The caller owns its removal.
    pub local_path: PathBuf,
    pub metadata: DownloadMetadata,
}

/// Streams release assets to disk
#[derive(Debug, Clone)]
pub struct ArchiveFetcher {
    client: GitHubClient,
    timeout: Duration,
    chunk_size: usize,
    show_progress: bool,
}

impl ArchiveFetcher {
    pub fn new(client: GitHubClient, timeout: Duration, chunk_size: usize) -> Self {
        Self {
            client,
            timeout,
            chunk_size: chunk_size.max(1),
            show_progress: false,
        }
    }

    /// Enable or disable the progress bar
    pub fn with_progress(mut self, show: bool) -> Self {
        self.show_progress = show;
        self
    }

    /// Download `resolved` into `dest_dir`
    pub async fn fetch(&self, resolved: &ResolvedAsset, dest_dir: &Path) -> Result<DownloadOutcome> {
        let asset = &resolved.asset;
        let url = asset.browser_download_url.as_str();
        let local_path = dest_dir.join(&asset.name);

        info!(
            "Downloading {} ({})",
            asset.name,
            human_readable_size(asset.size)
        );

        let response = match self.client.get(url, self.timeout).send().await {
            Ok(response) => response,
            Err(e) => {
                remove_partial(&local_path);
                return Err(Error::download(format!("Failed to download {}: {}", url, e)));
            }
        };

        if !response.status().is_success() {
            remove_partial(&local_path);
            let diagnostic = self.client.diagnose(response, url, ASSET_BODY_EXCERPT).await;
            return Err(Error::download_status(diagnostic));
        }

        let total_size = response.content_length().unwrap_or(0);
        let progress = self.progress_bar(total_size, &asset.name);

        let written = match self.write_body(response, &local_path, progress.as_ref()).await {
            Ok(written) => written,
            Err(e) => {
                if let Some(pb) = &progress {
                    pb.abandon();
                }
                remove_partial(&local_path);
                return Err(e);
            }
        };

        if let Some(pb) = progress {
            pb.finish_with_message(format!("Downloaded {}", asset.name));
        }
        debug!("Wrote {} bytes to {}", written, local_path.display());

        Ok(DownloadOutcome {
            local_path,
            metadata: DownloadMetadata {
                filename: asset.name.clone(),
                size: asset.size,
                release_tag: resolved.release_tag.clone(),
                source_url: asset.browser_download_url.clone(),
            },
        })
    }

    async fn write_body(
        &self,
        response: reqwest::Response,
        path: &Path,
        progress: Option<&ProgressBar>,
    ) -> Result<u64> {
        let file = File::create(path)?;
        let mut writer = BufWriter::with_capacity(self.chunk_size, file);
        let mut downloaded = 0u64;
        let mut stream = response.bytes_stream();

        while let Some(chunk_result) = stream.next().await {
            let chunk: bytes::Bytes = chunk_result
                .map_err(|e| Error::download(format!("Failed to read download chunk: {}", e)))?;
            writer.write_all(&chunk)?;

            downloaded += chunk.len() as u64;
            if let Some(pb) = progress {
                pb.set_position(downloaded);
            }
        }

        writer.flush()?;
        Ok(downloaded)
    }

    /// Determinate bar when the size is known, spinner otherwise
    fn progress_bar(&self, total_size: u64, name: &str) -> Option<ProgressBar> {
        if !self.show_progress {
            return None;
        }

        let pb = if total_size > 0 {
            let pb = ProgressBar::new(total_size);
            if let Ok(style) = ProgressStyle::default_bar()
                .template("{spinner:.green} {msg} [{wide_bar:.cyan/blue}] {bytes}/{total_bytes} ({percent}%)")
            {
                pb.set_style(style.progress_chars("#>-"));
            }
            pb
        } else {
            let pb = ProgressBar::new_spinner();
            if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg} {bytes}") {
                pb.set_style(style);
            }
            pb.enable_steady_tick(Duration::from_millis(100));
            pb
        };
        pb.set_message(format!("Downloading {}", name));
        Some(pb)
    }
}

fn remove_partial(path: &Path) {
    if path.exists() {
        if let Err(e) = fs::remove_file(path) {
            warn!("Failed to remove partial download {}: {}", path.display(), e);
        }
    }
}

/// Convert bytes to human-readable size
pub fn human_readable_size(bytes: u64) -> String {
    const UNITS: &[&str] = &["B", "KB", "MB", "GB", "TB"];
    let mut size = bytes as f64;
    let mut unit_index = 0;

    while size >= 1024.0 && unit_index < UNITS.len() - 1 {
        size /= 1024.0;
        unit_index += 1;
    }

    format!("{:.2} {}", size, UNITS[unit_index])
}
