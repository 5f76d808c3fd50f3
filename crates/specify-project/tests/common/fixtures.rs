//! Zip archive builders

use std::fs;
use std::io::{Cursor, Write};
use std::path::{Path, PathBuf};
use zip::write::SimpleFileOptions;

pub const ASSET_NAME: &str = "spec-kit-template-claude-sh-v0.0.79.zip";
pub const TAG: &str = "v0.0.79";

/// Builds a zip archive in memory
#[derive(Debug, Clone, Default)]
pub struct ZipFixture {
    entries: Vec<(String, Option<Vec<u8>>)>,
}

impl ZipFixture {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn file(mut self, name: &str, content: &str) -> Self {
        self.entries
            .push((name.to_string(), Some(content.as_bytes().to_vec())));
        self
    }

    pub fn dir(mut self, name: &str) -> Self {
        self.entries.push((name.to_string(), None));
        self
    }

    pub fn bytes(&self) -> Vec<u8> {
        let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
        let options = SimpleFileOptions::default();
        for (name, content) in &self.entries {
            match content {
                Some(data) => {
                    writer.start_file(name.as_str(), options).unwrap();
                    writer.write_all(data).unwrap();
                }
                None => {
                    writer.add_directory(name.as_str(), options).unwrap();
                }
            }
        }
        writer.finish().unwrap().into_inner()
    }

    pub fn write_to(&self, dir: &Path, name: &str) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, self.bytes()).unwrap();
        path
    }
}

/// Template laid out the way releases ship it: one wrapper directory
pub fn wrapped_template() -> ZipFixture {
    ZipFixture::new()
        .dir("spec-kit/")
        .file("spec-kit/README.md", "# Template\n")
        .file(
            "spec-kit/.specify/scripts/bash/setup.sh",
            "#!/usr/bin/env bash\necho setup\n",
        )
        .file("spec-kit/.specify/templates/spec.md", "# Spec\n")
        .file(
            "spec-kit/.vscode/settings.json",
            r#"{"chat.promptFiles": true, "files.exclude": {"specs": false}}"#,
        )
        .file("spec-kit/memory/constitution.md", "# Constitution\n")
}
