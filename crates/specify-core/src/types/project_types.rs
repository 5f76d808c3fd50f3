//! Project classification and script flavor types

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::str::FromStr;

/// Script flavor shipped inside a template archive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScriptType {
    /// POSIX shell scripts
    Sh,
    /// PowerShell scripts
    Ps,
}

impl ScriptType {
    pub const ALL: [ScriptType; 2] = [ScriptType::Sh, ScriptType::Ps];

    pub fn as_str(&self) -> &'static str {
        match self {
            ScriptType::Sh => "sh",
            ScriptType::Ps => "ps",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            ScriptType::Sh => "POSIX Shell (bash/zsh)",
            ScriptType::Ps => "PowerShell",
        }
    }

    /// Flavor matching the host platform
    pub fn platform_default() -> Self {
        if cfg!(windows) {
            ScriptType::Ps
        } else {
            ScriptType::Sh
        }
    }
}

impl std::fmt::Display for ScriptType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ScriptType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "sh" => Ok(ScriptType::Sh),
            "ps" => Ok(ScriptType::Ps),
            other => Err(Error::invalid_choice("script type", other, "sh, ps")),
        }
    }
}

/// How much existing code and legacy constraint a project carries
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectType {
    /// New project with no existing codebase
    #[default]
    Greenfield,
    /// Existing system with active users
    Brownfield,
    /// New components on an existing platform
    Bluefield,
}

impl ProjectType {
    pub const ALL: [ProjectType; 3] = [
        ProjectType::Greenfield,
        ProjectType::Brownfield,
        ProjectType::Bluefield,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectType::Greenfield => "greenfield",
            ProjectType::Brownfield => "brownfield",
            ProjectType::Bluefield => "bluefield",
        }
    }
}

impl std::fmt::Display for ProjectType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ProjectType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "greenfield" => Ok(ProjectType::Greenfield),
            "brownfield" => Ok(ProjectType::Brownfield),
            "bluefield" => Ok(ProjectType::Bluefield),
            other => Err(Error::invalid_choice(
                "project type",
                other,
                "greenfield, brownfield, bluefield",
            )),
        }
    }
}

/// Static prose attached to one project type
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ProjectTypeProfile {
    /// One-line label shown in selection menus
    pub label: String,

    /// Paragraph describing the project type
    pub description: String,

    /// Markdown section on what the classification means for development
    #[serde(default)]
    pub implications: String,

    /// Markdown checklist of questions and red flags
    #[serde(default)]
    pub guidance: String,

    /// Example project descriptions offered at the description prompt
    #[serde(default)]
    pub examples: Vec<String>,

    /// Topics worth mentioning in the description
    #[serde(default)]
    pub considerations: Vec<String>,
}

/// Profiles for every project type
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProjectTypeCatalog {
    profiles: BTreeMap<ProjectType, ProjectTypeProfile>,
}

impl ProjectTypeCatalog {
    pub fn get(&self, project_type: ProjectType) -> Option<&ProjectTypeProfile> {
        self.profiles.get(&project_type)
    }

    /// Short label, or the bare type name when no profile exists
    pub fn label(&self, project_type: ProjectType) -> &str {
        self.get(project_type)
            .map(|p| p.label.as_str())
            .unwrap_or_else(|| project_type.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ProjectType, &ProjectTypeProfile)> {
        self.profiles.iter()
    }
}
