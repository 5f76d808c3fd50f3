//! Git operations used after a template has been placed
//!
//! Everything shells out to the `git` executable. Bootstrap failures are
//! returned as [`GitInitOutcome::Failed`] so the caller can warn and carry on.
//!
//! ```no_run
//! use specify_project::git::{init_repository, is_git_repo};
//! use specify_core::types::GitWorkflowConfig;
//! use camino::Utf8Path;
//!
//! # async fn example() {
//! let path = Utf8Path::new("/tmp/my-project");
//! if !is_git_repo(path).await {
//!     let outcome = init_repository(path, &GitWorkflowConfig::default()).await;
//!     if let Some(failure) = outcome.failure() {
//!         eprintln!("{}", failure);
//!     }
//! }
//! # }
//! ```

mod init;
mod repo;

pub use init::{init_repository, manual_init_commands, GitCommandFailure, GitInitOutcome};
pub use repo::{git_available, is_git_repo};
