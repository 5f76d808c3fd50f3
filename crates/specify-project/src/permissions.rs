//! Execute-bit repair for shell scripts shipped in the template
//!
//! Zip archives do not reliably carry unix modes, so after extraction every
//! script under the scripts directory that starts with `#!` and has no
//! execute bit gets one per read bit.

use std::path::Path;

/// Outcome of a permission sweep
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PermissionReport {
    /// Scripts whose mode was changed
    pub updated: usize,
    /// `"<relative path>: <error>"` for each script that could not be fixed
    pub failures: Vec<String>,
}

impl PermissionReport {
    pub fn failed(&self) -> usize {
        self.failures.len()
    }

    /// One-line description for the step tracker
    pub fn detail(&self) -> String {
        let mut detail = format!("{} updated", self.updated);
        if !self.failures.is_empty() {
            detail.push_str(&format!(", {} failed", self.failures.len()));
        }
        detail
    }
}

/// Mode with each read bit mirrored into the matching execute bit
///
/// Owner execute is always set in the result.
pub fn executable_mode(mode: u32) -> u32 {
    let mut new_mode = mode;
    if mode & 0o400 != 0 {
        new_mode |= 0o100;
    }
    if mode & 0o040 != 0 {
        new_mode |= 0o010;
    }
    if mode & 0o004 != 0 {
        new_mode |= 0o001;
    }
    new_mode | 0o100
}

/// Give executable bits to `*{extension}` scripts below `project_root/scripts_dir`
///
/// Per-file failures are collected in the report instead of aborting the
/// sweep. A missing scripts directory yields an empty report.
#[cfg(unix)]
pub fn ensure_executable_scripts(
    project_root: &Path,
    scripts_dir: &str,
    extension: &str,
) -> PermissionReport {
    use std::fs;
    use std::os::unix::fs::PermissionsExt;
    use tracing::{debug, warn};
    use walkdir::WalkDir;

    let mut report = PermissionReport::default();
    let scripts_root = project_root.join(scripts_dir);
    if !scripts_root.is_dir() {
        debug!("No scripts directory at {}", scripts_root.display());
        return report;
    }

    for entry in WalkDir::new(&scripts_root).sort_by_file_name() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                report.failures.push(e.to_string());
                continue;
            }
        };

        // WalkDir does not follow links, so file_type() is the link itself
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.path();
        if !path.to_string_lossy().ends_with(extension) {
            continue;
        }

        let relative = path
            .strip_prefix(project_root)
            .unwrap_or(path)
            .display()
            .to_string();

        let result = (|| -> std::io::Result<bool> {
            if !has_shebang(path)? {
                return Ok(false);
            }
            let mode = fs::metadata(path)?.permissions().mode();
            if mode & 0o111 != 0 {
                return Ok(false);
            }
            fs::set_permissions(path, fs::Permissions::from_mode(executable_mode(mode)))?;
            Ok(true)
        })();

        match result {
            Ok(true) => {
                debug!("Made {} executable", relative);
                report.updated += 1;
            }
            Ok(false) => {}
            Err(e) => {
                warn!("Could not update permissions for {}: {}", relative, e);
                report.failures.push(format!("{}: {}", relative, e));
            }
        }
    }

    report
}

/// No permission bits to fix on this platform
#[cfg(not(unix))]
pub fn ensure_executable_scripts(
    _project_root: &Path,
    _scripts_dir: &str,
    _extension: &str,
) -> PermissionReport {
    PermissionReport::default()
}

#[cfg(unix)]
fn has_shebang(path: &Path) -> std::io::Result<bool> {
    use std::io::Read;

    let mut head = [0u8; 2];
    let mut file = std::fs::File::open(path)?;
    let mut read = 0;
    while read < head.len() {
        match file.read(&mut head[read..])? {
            0 => break,
            n => read += n,
        }
    }
    Ok(read == 2 && &head == b"#!")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_executable_mode_mirrors_read_bits() {
        assert_eq!(executable_mode(0o644), 0o755);
        assert_eq!(executable_mode(0o640), 0o750);
        assert_eq!(executable_mode(0o600), 0o700);
    }

    #[test]
    fn test_executable_mode_forces_owner_execute() {
        assert_eq!(executable_mode(0o000), 0o100);
        assert_eq!(executable_mode(0o044), 0o155);
    }

    #[test]
    fn test_report_detail() {
        let report = PermissionReport {
            updated: 3,
            failures: vec!["a.sh: denied".to_string()],
        };
        assert_eq!(report.detail(), "3 updated, 1 failed");
        assert_eq!(PermissionReport::default().detail(), "0 updated");
    }

    #[cfg(unix)]
    mod unix {
        use super::super::*;
        use std::fs;
        use std::os::unix::fs::PermissionsExt;
        use tempfile::TempDir;

        fn mode_of(path: &Path) -> u32 {
            fs::metadata(path).unwrap().permissions().mode() & 0o777
        }

        fn write_with_mode(path: &Path, content: &str, mode: u32) {
            fs::write(path, content).unwrap();
            fs::set_permissions(path, fs::Permissions::from_mode(mode)).unwrap();
        }

        #[test]
        fn test_sweep_only_touches_scripts_with_shebang() {
            let temp = TempDir::new().unwrap();
            let scripts = temp.path().join(".specify/scripts/bash");
            fs::create_dir_all(&scripts).unwrap();
            let script = scripts.join("setup.sh");
            let plain = scripts.join("notes.sh");
            write_with_mode(&script, "#!/usr/bin/env bash\necho hi\n", 0o644);
            write_with_mode(&plain, "echo hi\n", 0o644);

            let report = ensure_executable_scripts(temp.path(), ".specify/scripts", ".sh");

            assert_eq!(report.updated, 1);
            assert!(report.failures.is_empty());
            assert_eq!(mode_of(&script), 0o755);
            assert_eq!(mode_of(&plain), 0o644);
        }

        #[test]
        fn test_sweep_leaves_executable_scripts_alone() {
            let temp = TempDir::new().unwrap();
            let scripts = temp.path().join(".specify/scripts");
            fs::create_dir_all(&scripts).unwrap();
            let script = scripts.join("run.sh");
            write_with_mode(&script, "#!/bin/sh\n", 0o700);

            let report = ensure_executable_scripts(temp.path(), ".specify/scripts", ".sh");

            assert_eq!(report.updated, 0);
            assert_eq!(mode_of(&script), 0o700);
        }

        #[test]
        fn test_sweep_ignores_other_extensions_and_missing_dir() {
            let temp = TempDir::new().unwrap();
            assert_eq!(
                ensure_executable_scripts(temp.path(), ".specify/scripts", ".sh"),
                PermissionReport::default()
            );

            let scripts = temp.path().join(".specify/scripts");
            fs::create_dir_all(&scripts).unwrap();
            let ps = scripts.join("setup.ps1");
            write_with_mode(&ps, "#!/usr/bin/env pwsh\n", 0o644);

            let report = ensure_executable_scripts(temp.path(), ".specify/scripts", ".sh");
            assert_eq!(report.updated, 0);
            assert_eq!(mode_of(&ps), 0o644);
        }

        #[test]
        fn test_sweep_skips_symlinks() {
            let temp = TempDir::new().unwrap();
            let scripts = temp.path().join(".specify/scripts");
            fs::create_dir_all(&scripts).unwrap();
            let target = temp.path().join("outside.sh");
            write_with_mode(&target, "#!/bin/sh\n", 0o644);
            std::os::unix::fs::symlink(&target, scripts.join("link.sh")).unwrap();

            let report = ensure_executable_scripts(temp.path(), ".specify/scripts", ".sh");

            assert_eq!(report.updated, 0);
            assert_eq!(mode_of(&target), 0o644);
        }
    }
}
