//! Repository detection

use camino::Utf8Path;
use tokio::process::Command;
use tracing::debug;

/// Whether `path` is inside a git work tree
///
/// Any failure to run git counts as "no".
pub async fn is_git_repo(path: &Utf8Path) -> bool {
    if !path.is_dir() {
        return false;
    }

    match Command::new("git")
        .current_dir(path)
        .args(["rev-parse", "--is-inside-work-tree"])
        .output()
        .await
    {
        Ok(output) => output.status.success(),
        Err(e) => {
            debug!("git rev-parse failed to run: {}", e);
            false
        }
    }
}

/// Whether a working `git` executable is on PATH
pub async fn git_available() -> bool {
    Command::new("git")
        .arg("--version")
        .output()
        .await
        .map(|output| output.status.success())
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use camino::Utf8PathBuf;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_missing_dir_is_not_repo() {
        let temp = TempDir::new().unwrap();
        let path = Utf8PathBuf::from_path_buf(temp.path().join("absent")).unwrap();
        assert!(!is_git_repo(&path).await);
    }
}
