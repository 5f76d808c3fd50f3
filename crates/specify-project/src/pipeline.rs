//! Template acquisition: resolve, download, extract, clean up
//!
//! The downloaded archive never outlives a run. In fresh mode the project
//! directory is removed when any later stage fails.

use crate::error::{Error, Result};
use crate::extract::{extract_and_merge, ExtractMode, ExtractSummary};
use crate::merge::MergeRule;
use crate::observer::{Step, StepObserver};
use specify_core::types::ScriptType;
use specify_release::download::human_readable_size;
use specify_release::{ArchiveFetcher, DownloadMetadata, ReleaseResolver};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// What to fetch and where to put it
#[derive(Debug, Clone)]
pub struct TemplateRequest {
    pub agent: String,
    pub script: ScriptType,
    pub project_dir: PathBuf,
    pub mode: ExtractMode,
    /// Directory the archive is downloaded into before extraction
    pub download_dir: PathBuf,
}

/// Result of a successful acquisition
#[derive(Debug, Clone)]
pub struct TemplateOutcome {
    pub project_dir: PathBuf,
    pub download: DownloadMetadata,
    pub extract: ExtractSummary,
}

/// Resolver, fetcher and merge rule wired together
#[derive(Debug, Clone)]
pub struct TemplatePipeline {
    resolver: ReleaseResolver,
    fetcher: ArchiveFetcher,
    rule: MergeRule,
}

impl TemplatePipeline {
    pub fn new(resolver: ReleaseResolver, fetcher: ArchiveFetcher, rule: MergeRule) -> Self {
        Self {
            resolver,
            fetcher,
            rule,
        }
    }

    /// Fetch the latest template for `request` and place it on disk
    pub async fn download_and_extract(
        &self,
        request: &TemplateRequest,
        observer: &dyn StepObserver,
    ) -> Result<TemplateOutcome> {
        observer.on_start(Step::Fetch, "contacting GitHub API");
        let resolved = match self.resolver.resolve(&request.agent, request.script).await {
            Ok(resolved) => resolved,
            Err(e) => {
                observer.on_error(Step::Fetch, e.title());
                return Err(e.into());
            }
        };
        observer.on_complete(
            Step::Fetch,
            &format!(
                "release {} ({})",
                resolved.release_tag,
                human_readable_size(resolved.asset.size)
            ),
        );

        observer.on_start(Step::Download, &resolved.asset.name);
        let download = match self.fetcher.fetch(&resolved, &request.download_dir).await {
            Ok(download) => download,
            Err(e) => {
                observer.on_error(Step::Download, e.title());
                return Err(e.into());
            }
        };
        observer.on_complete(Step::Download, &download.metadata.filename);

        observer.on_start(Step::Extract, "");
        let extracted = extract_and_merge(
            &download.local_path,
            &request.project_dir,
            request.mode,
            &self.rule,
        );

        // The archive goes away whatever the extraction did
        remove_archive(&download.local_path, observer);

        let summary = match extracted {
            Ok(summary) => summary,
            Err(e) => {
                observer.on_error(Step::Extract, &e.to_string());
                return Err(e);
            }
        };

        observer.on_complete(Step::ZipList, &format!("{} entries", summary.archive_entries));
        observer.on_complete(Step::ExtractedSummary, &summary_detail(&summary));
        observer.on_complete(
            Step::Extract,
            if summary.flattened { "flattened" } else { "done" },
        );

        Ok(TemplateOutcome {
            project_dir: request.project_dir.clone(),
            download: download.metadata,
            extract: summary,
        })
    }
}

fn summary_detail(summary: &ExtractSummary) -> String {
    match summary.mode {
        ExtractMode::Fresh => format!("{} top-level items", summary.top_level.len()),
        ExtractMode::MergeIntoExisting => {
            let mut detail = format!("{} files copied", summary.files_copied);
            if summary.json_merged > 0 {
                detail.push_str(&format!(", {} merged", summary.json_merged));
            }
            if !summary.overwritten.is_empty() {
                detail.push_str(&format!(", {} overwritten", summary.overwritten.len()));
            }
            detail
        }
    }
}

fn remove_archive(path: &Path, observer: &dyn StepObserver) {
    observer.on_start(Step::Cleanup, "");
    match fs::remove_file(path) {
        Ok(()) => {
            debug!("Removed archive {}", path.display());
            observer.on_complete(Step::Cleanup, "archive removed");
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            observer.on_complete(Step::Cleanup, "nothing to remove");
        }
        Err(e) => {
            warn!("Failed to remove archive {}: {}", path.display(), e);
            observer.on_error(Step::Cleanup, &e.to_string());
        }
    }
}

/// Remove a project directory created by a failed fresh-mode run
pub fn rollback_project_dir(project_dir: &Path, mode: ExtractMode) -> Result<()> {
    if mode.is_merge() || !project_dir.exists() {
        return Ok(());
    }
    fs::remove_dir_all(project_dir)
        .map_err(|e| Error::extraction(format!("Failed to remove {}: {}", project_dir.display(), e)))
}
