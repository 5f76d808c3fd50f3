//! Repository bootstrap for a freshly scaffolded project

use camino::Utf8Path;
use specify_core::types::GitWorkflowConfig;
use std::fmt;
use tokio::process::Command;
use tracing::{debug, info, warn};

/// A git command that exited unsuccessfully or could not be spawned
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GitCommandFailure {
    /// Full command line, e.g. `git add .`
    pub command: String,
    /// Exit code, `None` when the process never ran or was killed
    pub exit_code: Option<i32>,
    pub stderr: String,
    pub stdout: String,
}

impl fmt::Display for GitCommandFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Command: {}", self.command)?;
        match self.exit_code {
            Some(code) => write!(f, "\nExit code: {}", code)?,
            None => write!(f, "\nExit code: unknown")?,
        }
        let stderr = self.stderr.trim();
        let stdout = self.stdout.trim();
        if !stderr.is_empty() {
            write!(f, "\nError: {}", stderr)?;
        } else if !stdout.is_empty() {
            write!(f, "\nOutput: {}", stdout)?;
        }
        Ok(())
    }
}

/// Result of [`init_repository`]; failure is data, not an error
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GitInitOutcome {
    Initialized,
    Failed(GitCommandFailure),
}

impl GitInitOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Initialized)
    }

    pub fn failure(&self) -> Option<&GitCommandFailure> {
        match self {
            Self::Initialized => None,
            Self::Failed(failure) => Some(failure),
        }
    }
}

/// Commands a user can run to finish the bootstrap by hand
pub fn manual_init_commands(project_dir: &str) -> Vec<String> {
    vec![
        format!("cd {}", project_dir),
        "git init".to_string(),
        "git add .".to_string(),
        "git commit -m \"Initial commit\"".to_string(),
    ]
}

/// Run `git init`, `git add .` and the initial commit in `path`
///
/// Stops at the first failing command and reports it in the outcome.
pub async fn init_repository(path: &Utf8Path, git_config: &GitWorkflowConfig) -> GitInitOutcome {
    info!("Initializing git repository at: {}", path);

    let steps: [&[&str]; 3] = [
        &["init"],
        &["add", "."],
        &["commit", "-m", git_config.initial_commit_message.as_str()],
    ];

    for args in steps {
        if let Err(failure) = run_git(path, args).await {
            warn!("Git bootstrap failed: {}", failure.command);
            return GitInitOutcome::Failed(failure);
        }
    }

    info!("Repository initialized with initial commit");
    GitInitOutcome::Initialized
}

async fn run_git(path: &Utf8Path, args: &[&str]) -> std::result::Result<(), GitCommandFailure> {
    let command = format!("git {}", args.join(" "));
    debug!("Running: {}", command);

    let output = match Command::new("git").current_dir(path).args(args).output().await {
        Ok(output) => output,
        Err(e) => {
            return Err(GitCommandFailure {
                command,
                exit_code: None,
                stderr: e.to_string(),
                stdout: String::new(),
            })
        }
    };

    if !output.status.success() {
        return Err(GitCommandFailure {
            command,
            exit_code: output.status.code(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        });
    }

    Ok(())
}
