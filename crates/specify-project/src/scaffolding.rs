//! Optional getting-started files
//!
//! Each file is written once; an existing file is never touched.

use crate::error::Result;
use camino::{Utf8Path, Utf8PathBuf};
use std::fs;
use tracing::debug;

const INSTRUCTIONS: (&str, &str) = (
    "instructions.md",
    include_str!("../templates/instructions.md"),
);

const DOCS: [(&str, &str); 3] = [
    (
        "docs/architecture.md",
        include_str!("../templates/docs/architecture.md"),
    ),
    ("docs/roadmap.md", include_str!("../templates/docs/roadmap.md")),
    ("docs/ideas.md", include_str!("../templates/docs/ideas.md")),
];

/// Files created by a scaffolding step, relative paths
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScaffoldReport {
    pub created: Vec<Utf8PathBuf>,
    pub skipped: Vec<Utf8PathBuf>,
}

impl ScaffoldReport {
    pub fn detail(&self) -> String {
        match (self.created.len(), self.skipped.len()) {
            (0, _) => "already present".to_string(),
            (created, 0) => format!("{} created", created),
            (created, skipped) => format!("{} created, {} kept", created, skipped),
        }
    }
}

/// Write `instructions.md` unless it exists
pub fn create_instructions_file(project_root: &Utf8Path) -> Result<ScaffoldReport> {
    write_once(project_root, &[INSTRUCTIONS])
}

/// Write `docs/architecture.md`, `docs/roadmap.md` and `docs/ideas.md` where absent
pub fn create_docs_scaffolding(project_root: &Utf8Path) -> Result<ScaffoldReport> {
    write_once(project_root, &DOCS)
}

fn write_once(project_root: &Utf8Path, files: &[(&str, &str)]) -> Result<ScaffoldReport> {
    let mut report = ScaffoldReport::default();

    for (relative, content) in files {
        let path = project_root.join(relative);
        if path.exists() {
            debug!("{} exists, leaving it alone", path);
            report.skipped.push(Utf8PathBuf::from(*relative));
            continue;
        }
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, content)?;
        report.created.push(Utf8PathBuf::from(*relative));
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn root(temp: &TempDir) -> Utf8PathBuf {
        Utf8PathBuf::from_path_buf(temp.path().to_path_buf()).unwrap()
    }

    #[test]
    fn test_instructions_written_once() {
        let temp = TempDir::new().unwrap();
        let root = root(&temp);

        let first = create_instructions_file(&root).unwrap();
        assert_eq!(first.created, vec![Utf8PathBuf::from("instructions.md")]);

        fs::write(root.join("instructions.md"), "edited").unwrap();
        let second = create_instructions_file(&root).unwrap();

        assert!(second.created.is_empty());
        assert_eq!(second.detail(), "already present");
        assert_eq!(fs::read_to_string(root.join("instructions.md")).unwrap(), "edited");
    }

    #[test]
    fn test_docs_keep_existing_files() {
        let temp = TempDir::new().unwrap();
        let root = root(&temp);
        fs::create_dir_all(root.join("docs")).unwrap();
        fs::write(root.join("docs/roadmap.md"), "mine").unwrap();

        let report = create_docs_scaffolding(&root).unwrap();

        assert_eq!(report.created.len(), 2);
        assert_eq!(report.skipped, vec![Utf8PathBuf::from("docs/roadmap.md")]);
        assert_eq!(report.detail(), "2 created, 1 kept");
        assert!(fs::read_to_string(root.join("docs/architecture.md"))
            .unwrap()
            .starts_with("# Architecture Decisions"));
        assert_eq!(fs::read_to_string(root.join("docs/roadmap.md")).unwrap(), "mine");
    }
}
