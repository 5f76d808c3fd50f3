//! Tree reconciliation used when a template lands in an existing directory
//!
//! Files are copied over their destination counterparts, except for one
//! structured settings file which is deep-merged key by key so user
//! settings survive a template refresh.

use crate::error::Result;
use filetime::FileTime;
use serde_json::Value;
use specify_core::types::TemplateConfig;
use std::fs;
use std::path::Path;
use tracing::{debug, warn};
use walkdir::WalkDir;

/// Identifies the file that is deep-merged instead of overwritten
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeRule {
    /// Exact file name, e.g. `settings.json`
    pub file_name: String,
    /// Exact name of the directory holding it, e.g. `.vscode`
    pub parent_name: String,
}

impl MergeRule {
    pub fn new(file_name: impl Into<String>, parent_name: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            parent_name: parent_name.into(),
        }
    }

    pub fn from_config(template: &TemplateConfig) -> Self {
        Self::new(&template.merge_file, &template.merge_parent)
    }

    /// Whether `path` names the merged file inside the merged parent
    pub fn matches(&self, path: &Path) -> bool {
        let file_matches = path
            .file_name()
            .is_some_and(|name| name == self.file_name.as_str());
        let parent_matches = path
            .parent()
            .and_then(Path::file_name)
            .is_some_and(|name| name == self.parent_name.as_str());
        file_matches && parent_matches
    }
}

impl Default for MergeRule {
    fn default() -> Self {
        Self::from_config(&TemplateConfig::default())
    }
}

/// How a structured file ended up at its destination
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JsonMergeOutcome {
    /// Existing and incoming trees were combined
    Merged,
    /// Existing file was unreadable, incoming content replaced it
    Replaced,
    /// Plain copy (no destination yet, or incoming file not parseable)
    Copied,
}

/// Counters for one directory merge
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MergeStats {
    pub files_copied: usize,
    pub json_merged: usize,
}

impl MergeStats {
    fn record(&mut self, outcome: JsonMergeOutcome) {
        match outcome {
            JsonMergeOutcome::Merged | JsonMergeOutcome::Replaced => self.json_merged += 1,
            JsonMergeOutcome::Copied => self.files_copied += 1,
        }
    }
}

/// Recursively combine `incoming` into `base`
///
/// Nested objects merge key by key. Every other value, arrays included,
/// is replaced wholesale. Keys only present in `base` are kept.
pub fn deep_merge(base: Value, incoming: Value) -> Value {
    match (base, incoming) {
        (Value::Object(mut base_map), Value::Object(incoming_map)) => {
            for (key, value) in incoming_map {
                match base_map.get_mut(&key) {
                    Some(existing) if existing.is_object() && value.is_object() => {
                        let current = existing.take();
                        *existing = deep_merge(current, value);
                    }
                    Some(existing) => *existing = value,
                    None => {
                        base_map.insert(key, value);
                    }
                }
            }
            Value::Object(base_map)
        }
        (_, incoming) => incoming,
    }
}

/// Two-space indented JSON with a trailing newline
pub fn to_pretty_json(value: &Value) -> Result<String> {
    let mut text = serde_json::to_string_pretty(value)?;
    text.push('\n');
    Ok(text)
}

/// Deep-merge `source` into `dest`, falling back to a plain copy
///
/// A missing or unparseable destination never blocks the write: the
/// incoming content wins outright.
pub fn merge_json_file(source: &Path, dest: &Path) -> Result<JsonMergeOutcome> {
    let incoming = match read_json(source) {
        Ok(value) => value,
        Err(e) => {
            warn!(
                "Could not parse {}, copying it as-is: {}",
                source.display(),
                e
            );
            copy_file(source, dest)?;
            return Ok(JsonMergeOutcome::Copied);
        }
    };

    if !dest.exists() {
        copy_file(source, dest)?;
        return Ok(JsonMergeOutcome::Copied);
    }

    let (merged, outcome) = match read_json(dest) {
        Ok(existing) => (deep_merge(existing, incoming), JsonMergeOutcome::Merged),
        Err(e) => {
            debug!(
                "Existing {} is not valid JSON, replacing it: {}",
                dest.display(),
                e
            );
            (incoming, JsonMergeOutcome::Replaced)
        }
    };

    fs::write(dest, to_pretty_json(&merged)?)?;
    debug!("Merged {} into {}", source.display(), dest.display());
    Ok(outcome)
}

fn read_json(path: &Path) -> Result<Value> {
    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

/// Copy one file, keeping its permissions and access/modification times
pub fn copy_file(source: &Path, dest: &Path) -> Result<()> {
    fs::copy(source, dest)?;
    let metadata = fs::metadata(source)?;
    filetime::set_file_times(
        dest,
        FileTime::from_last_access_time(&metadata),
        FileTime::from_last_modification_time(&metadata),
    )?;
    Ok(())
}

/// Merge the tree at `source` into the existing directory `dest` file by file
pub fn merge_directory(source: &Path, dest: &Path, rule: &MergeRule) -> Result<MergeStats> {
    let mut stats = MergeStats::default();

    for entry in WalkDir::new(source).min_depth(1).sort_by_file_name() {
        let entry = entry.map_err(std::io::Error::from)?;
        let relative = match entry.path().strip_prefix(source) {
            Ok(relative) => relative,
            Err(_) => continue,
        };
        let target = dest.join(relative);

        if entry.file_type().is_dir() {
            fs::create_dir_all(&target)?;
            continue;
        }

        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)?;
        }

        if rule.matches(&target) {
            stats.record(merge_json_file(entry.path(), &target)?);
        } else {
            copy_file(entry.path(), &target)?;
            stats.files_copied += 1;
        }
    }

    Ok(stats)
}

/// Copy a whole subtree to a destination that does not exist yet
pub fn copy_tree(source: &Path, dest: &Path) -> Result<usize> {
    let mut copied = 0;
    fs::create_dir_all(dest)?;

    for entry in WalkDir::new(source).min_depth(1).sort_by_file_name() {
        let entry = entry.map_err(std::io::Error::from)?;
        let Ok(relative) = entry.path().strip_prefix(source) else {
            continue;
        };
        let target = dest.join(relative);

        if entry.file_type().is_dir() {
            fs::create_dir_all(&target)?;
        } else {
            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent)?;
            }
            copy_file(entry.path(), &target)?;
            copied += 1;
        }
    }

    Ok(copied)
}
