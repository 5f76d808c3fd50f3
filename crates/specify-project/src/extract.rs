//! Template archive extraction
//!
//! Two modes:
//! - [`ExtractMode::Fresh`] creates the destination, unpacks straight into it
//!   and removes it again if anything fails.
//! - [`ExtractMode::MergeIntoExisting`] unpacks into a staging directory and
//!   reconciles each top-level entry against the destination. Nothing is
//!   rolled back in this mode since the destination belonged to the user.
//!
//! In both modes an archive that wraps everything in one top-level directory
//! is flattened so its contents become the project root.

use crate::error::{Error, Result};
use crate::merge::{copy_file, copy_tree, merge_directory, MergeRule};
use std::fs::{self, File};
use std::io::{self, BufReader};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Where the extracted files go
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractMode {
    /// Destination must not exist, it is created and owned by this run
    Fresh,
    /// Destination already holds user content
    MergeIntoExisting,
}

impl ExtractMode {
    pub fn is_merge(&self) -> bool {
        matches!(self, Self::MergeIntoExisting)
    }
}

/// What an extraction did, for step reporting
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractSummary {
    pub mode: ExtractMode,
    /// Number of entries in the archive
    pub archive_entries: usize,
    /// Names found at the (possibly flattened) root
    pub top_level: Vec<String>,
    /// Whether a single wrapper directory was collapsed
    pub flattened: bool,
    /// Plain file copies made while merging
    pub files_copied: usize,
    /// Structured settings files deep-merged
    pub json_merged: usize,
    /// Top-level files that replaced an existing file
    pub overwritten: Vec<PathBuf>,
}

impl ExtractSummary {
    fn new(mode: ExtractMode, archive_entries: usize) -> Self {
        Self {
            mode,
            archive_entries,
            top_level: Vec::new(),
            flattened: false,
            files_copied: 0,
            json_merged: 0,
            overwritten: Vec::new(),
        }
    }
}

/// Unpack `archive_path` into `dest_dir` according to `mode`
///
/// Every failure is reported as [`Error::Extraction`]. In fresh mode the
/// destination directory is gone when this returns an error.
pub fn extract_and_merge(
    archive_path: &Path,
    dest_dir: &Path,
    mode: ExtractMode,
    rule: &MergeRule,
) -> Result<ExtractSummary> {
    let result = match mode {
        ExtractMode::Fresh => extract_fresh(archive_path, dest_dir),
        ExtractMode::MergeIntoExisting => extract_merge(archive_path, dest_dir, rule),
    };
    result.map_err(into_extraction)
}

fn into_extraction(err: Error) -> Error {
    match err {
        Error::Extraction { .. } | Error::DestinationExists { .. } => err,
        other => Error::extraction(other.to_string()),
    }
}

fn extract_fresh(archive_path: &Path, dest_dir: &Path) -> Result<ExtractSummary> {
    if dest_dir.exists() {
        return Err(Error::destination_exists(dest_dir.display().to_string()));
    }

    fs::create_dir_all(dest_dir)?;

    match unpack_fresh(archive_path, dest_dir) {
        Ok(summary) => Ok(summary),
        Err(e) => {
            remove_project_dir(dest_dir);
            Err(e)
        }
    }
}

fn unpack_fresh(archive_path: &Path, dest_dir: &Path) -> Result<ExtractSummary> {
    let entries = unpack(archive_path, dest_dir)?;
    let mut summary = ExtractSummary::new(ExtractMode::Fresh, entries);

    let top_level = list_dir(dest_dir)?;
    if let [only] = top_level.as_slice() {
        if only.is_dir() {
            flatten_into(only, dest_dir)?;
            summary.flattened = true;
        }
    }

    summary.top_level = file_names(&list_dir(dest_dir)?);
    info!(
        "Extracted {} archive entries into {}",
        entries,
        dest_dir.display()
    );
    Ok(summary)
}

/// Move the contents of `nested` up so they sit directly in `dest_dir`
fn flatten_into(nested: &Path, dest_dir: &Path) -> Result<()> {
    let name = dest_dir
        .file_name()
        .ok_or_else(|| Error::extraction(format!("Cannot flatten into {}", dest_dir.display())))?;
    let mut temp_name = name.to_os_string();
    temp_name.push("_temp");
    let temp_dir = dest_dir.with_file_name(temp_name);

    debug!(
        "Flattening {} into {}",
        nested.display(),
        dest_dir.display()
    );
    fs::rename(nested, &temp_dir)?;
    fs::remove_dir(dest_dir)?;
    fs::rename(&temp_dir, dest_dir)?;
    Ok(())
}

fn remove_project_dir(dest_dir: &Path) {
    if dest_dir.exists() {
        if let Err(e) = fs::remove_dir_all(dest_dir) {
            warn!(
                "Failed to remove partially created project {}: {}",
                dest_dir.display(),
                e
            );
        }
    }
}

fn extract_merge(archive_path: &Path, dest_dir: &Path, rule: &MergeRule) -> Result<ExtractSummary> {
    let staging = tempfile::Builder::new().prefix("specify-").tempdir()?;
    let entries = unpack(archive_path, staging.path())?;
    let mut summary = ExtractSummary::new(ExtractMode::MergeIntoExisting, entries);

    let mut source_root = staging.path().to_path_buf();
    let staged = list_dir(&source_root)?;
    if let [only] = staged.as_slice() {
        if only.is_dir() {
            debug!("Using nested directory {} as source", only.display());
            source_root = only.clone();
            summary.flattened = true;
        }
    }

    fs::create_dir_all(dest_dir)?;

    let items = list_dir(&source_root)?;
    summary.top_level = file_names(&items);

    for item in &items {
        let Some(name) = item.file_name() else {
            continue;
        };
        let target = dest_dir.join(name);

        if item.is_dir() {
            if target.exists() {
                let stats = merge_directory(item, &target, rule)?;
                summary.files_copied += stats.files_copied;
                summary.json_merged += stats.json_merged;
            } else {
                summary.files_copied += copy_tree(item, &target)?;
            }
        } else {
            if target.exists() {
                warn!("Overwriting file: {}", name.to_string_lossy());
                summary.overwritten.push(target.clone());
            }
            copy_file(item, &target)?;
            summary.files_copied += 1;
        }
    }

    info!(
        "Merged {} top-level entries into {}",
        items.len(),
        dest_dir.display()
    );
    Ok(summary)
}

/// Extract every entry of the zip at `archive_path` below `dest`
fn unpack(archive_path: &Path, dest: &Path) -> Result<usize> {
    let file = File::open(archive_path)?;
    let mut archive = zip::ZipArchive::new(BufReader::new(file))?;

    for index in 0..archive.len() {
        let mut entry = archive.by_index(index)?;
        let relative = entry.enclosed_name().ok_or_else(|| {
            Error::extraction(format!(
                "Archive entry '{}' points outside the extraction directory",
                entry.name()
            ))
        })?;
        let out_path = dest.join(relative);

        if entry.is_dir() {
            fs::create_dir_all(&out_path)?;
            continue;
        }

        if let Some(parent) = out_path.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut out = File::create(&out_path)?;
        io::copy(&mut entry, &mut out)?;
    }

    Ok(archive.len())
}

fn list_dir(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut entries = fs::read_dir(dir)?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<io::Result<Vec<_>>>()?;
    entries.sort();
    Ok(entries)
}

fn file_names(paths: &[PathBuf]) -> Vec<String> {
    paths
        .iter()
        .filter_map(|p| p.file_name())
        .map(|n| n.to_string_lossy().into_owned())
        .collect()
}
