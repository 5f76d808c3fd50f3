//! # specify-project
//!
//! Places a template on disk and finishes the project around it:
//! - Zip extraction into a new or existing directory, with wrapper flattening
//! - Directory merge with JSON deep-merge for editor settings
//! - Execute-bit repair for shipped shell scripts
//! - Git bootstrap with non-fatal failure reporting
//! - `.specify/context.yaml` store and the generated `memory/context.md`
//! - Optional getting-started files
//!
//! # Example
//!
//! ```no_run
//! use specify_project::{ExtractMode, MergeRule, extract_and_merge};
//! use std::path::Path;
//!
//! # fn example() -> specify_project::Result<()> {
//! let summary = extract_and_merge(
//!     Path::new("/tmp/spec-kit-template-claude-sh-v0.0.79.zip"),
//!     Path::new("/tmp/my-project"),
//!     ExtractMode::Fresh,
//!     &MergeRule::default(),
//! )?;
//! println!("{} entries extracted", summary.archive_entries);
//! # Ok(())
//! # }
//! ```

pub mod context;
pub mod error;
pub mod extract;
pub mod git;
pub mod merge;
pub mod observer;
pub mod permissions;
pub mod pipeline;
pub mod scaffolding;

pub use error::{Error, Result};
pub use extract::{extract_and_merge, ExtractMode, ExtractSummary};
pub use merge::{deep_merge, MergeRule};
pub use observer::{Step, StepObserver};
pub use permissions::{ensure_executable_scripts, PermissionReport};
pub use pipeline::{TemplateOutcome, TemplatePipeline, TemplateRequest};
