//! `.specify/context.yaml` model and persistence

use crate::error::{Error, Result};
use camino::{Utf8Path, Utf8PathBuf};
use serde::{Deserialize, Serialize};
use specify_core::types::ProjectType;
use std::collections::BTreeMap;
use std::fs;
use tracing::debug;

/// Location of the context file relative to the project root
pub const CONTEXT_FILE: &str = ".specify/context.yaml";

const CONTEXT_HEADER: &str = "\
# Spec Kit Project Context
# Project context helps AI assistants write realistic specs.
#
# project_type:
#   greenfield - New project with full design freedom
#   brownfield - Existing system with legacy constraints
#   bluefield  - Existing platform with new components
#
# constraints: rules every spec must respect, e.g. \"Must not change existing APIs\"
# linked_artifacts: category -> references, e.g. jira: [PROJECT-1234]
#
# Edit with `specify context`; created/updated/version are maintained for you.

";

/// Persisted project classification and constraints
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectContext {
    pub project_type: ProjectType,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub constraints: Vec<String>,

    #[serde(default)]
    pub linked_artifacts: BTreeMap<String, Vec<String>>,

    pub created: String,

    pub updated: String,

    #[serde(default = "default_version")]
    pub version: u32,
}

fn default_version() -> u32 {
    1
}

/// Requested changes from `specify context`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContextUpdate {
    pub set_type: Option<ProjectType>,
    pub set_description: Option<String>,
    pub add_constraint: Option<String>,
    /// 1-based index into the constraint list
    pub remove_constraint: Option<usize>,
}

impl ContextUpdate {
    pub fn is_empty(&self) -> bool {
        self.set_type.is_none()
            && self.set_description.is_none()
            && self.add_constraint.is_none()
            && self.remove_constraint.is_none()
    }
}

/// A single applied change, for user feedback
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContextChange {
    TypeChanged(ProjectType),
    DescriptionChanged,
    ConstraintAdded(String),
    ConstraintRemoved(String),
}

impl ProjectContext {
    /// Version 1 context created at `timestamp`
    pub fn new(project_type: ProjectType, description: impl Into<String>, timestamp: &str) -> Self {
        Self {
            project_type,
            description: description.into(),
            constraints: Vec::new(),
            linked_artifacts: BTreeMap::new(),
            created: timestamp.to_string(),
            updated: timestamp.to_string(),
            version: 1,
        }
    }

    pub fn path(project_root: &Utf8Path) -> Utf8PathBuf {
        project_root.join(CONTEXT_FILE)
    }

    pub fn exists(project_root: &Utf8Path) -> bool {
        Self::path(project_root).is_file()
    }

    pub fn load(project_root: &Utf8Path) -> Result<Self> {
        let path = Self::path(project_root);
        if !path.is_file() {
            return Err(Error::context_not_found(path.as_str()));
        }

        let content = fs::read_to_string(&path)?;
        serde_yaml_ng::from_str(&content)
            .map_err(|e| Error::context(format!("Failed to parse {}: {}", path, e)))
    }

    /// Header comment followed by the YAML document
    pub fn to_yaml(&self) -> Result<String> {
        let body = serde_yaml_ng::to_string(self)?;
        Ok(format!("{}{}", CONTEXT_HEADER, body))
    }

    /// Write the context file, creating `.specify/` when needed
    pub fn save(&self, project_root: &Utf8Path) -> Result<Utf8PathBuf> {
        let path = Self::path(project_root);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, self.to_yaml()?)?;
        debug!("Saved project context to {}", path);
        Ok(path)
    }

    /// Apply `update` in order: type, description, add, remove
    ///
    /// Either every change lands or none does. When anything changed the
    /// version is bumped and `updated` set to `timestamp`.
    pub fn apply(&mut self, update: &ContextUpdate, timestamp: &str) -> Result<Vec<ContextChange>> {
        let mut next = self.clone();
        let mut changes = Vec::new();

        if let Some(project_type) = update.set_type {
            next.project_type = project_type;
            changes.push(ContextChange::TypeChanged(project_type));
        }

        if let Some(description) = &update.set_description {
            next.description = description.clone();
            changes.push(ContextChange::DescriptionChanged);
        }

        if let Some(constraint) = &update.add_constraint {
            next.constraints.push(constraint.clone());
            changes.push(ContextChange::ConstraintAdded(constraint.clone()));
        }

        if let Some(index) = update.remove_constraint {
            let removed = next.remove_constraint(index)?;
            changes.push(ContextChange::ConstraintRemoved(removed));
        }

        if !changes.is_empty() {
            next.touch(timestamp);
            *self = next;
        }

        Ok(changes)
    }

    /// Remove the constraint at 1-based `index`
    pub fn remove_constraint(&mut self, index: usize) -> Result<String> {
        if self.constraints.is_empty() {
            return Err(Error::context(format!(
                "Invalid constraint index {}. There are no constraints to remove",
                index
            )));
        }
        if index < 1 || index > self.constraints.len() {
            return Err(Error::context(format!(
                "Invalid constraint index {}. Valid range: 1-{}",
                index,
                self.constraints.len()
            )));
        }
        Ok(self.constraints.remove(index - 1))
    }

    /// Bump the version and stamp `updated`
    pub fn touch(&mut self, timestamp: &str) {
        self.version += 1;
        self.updated = timestamp.to_string();
    }
}
