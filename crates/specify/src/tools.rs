//! External tool detection

use specify_core::get_home_dir;
use std::path::{Path, PathBuf};

/// Where `claude migrate-installer` leaves the Claude CLI
///
/// The migrated install is not on `PATH`, so it is checked first.
pub fn claude_local_path() -> Option<PathBuf> {
    get_home_dir()
        .ok()
        .map(|home| home.join(".claude").join("local").join("claude"))
}

/// Whether `tool` can be run on this machine
pub fn check_tool(tool: &str) -> bool {
    check_tool_with(tool, claude_local_path().as_deref())
}

fn check_tool_with(tool: &str, claude_local: Option<&Path>) -> bool {
    if tool == "claude" && claude_local.is_some_and(Path::is_file) {
        return true;
    }
    which::which(tool).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_claude_local_install_counts() {
        let temp = TempDir::new().unwrap();
        let local = temp.path().join("claude");
        fs::write(&local, "#!/bin/sh\n").unwrap();

        assert!(check_tool_with("claude", Some(&local)));
    }

    #[test]
    fn test_local_path_only_applies_to_claude() {
        let temp = TempDir::new().unwrap();
        let local = temp.path().join("claude");
        fs::write(&local, "").unwrap();

        assert!(!check_tool_with("definitely-not-a-real-tool-1f3a", Some(&local)));
    }

    #[test]
    fn test_missing_local_install_falls_back_to_path() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("nope");
        assert_eq!(
            check_tool_with("claude", Some(&missing)),
            which::which("claude").is_ok()
        );
    }
}
