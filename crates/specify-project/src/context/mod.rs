//! Project context store
//!
//! `.specify/context.yaml` holds the project classification, description,
//! constraints and linked artifacts. `memory/context.md` is regenerated from
//! it after every write so AI agents always read the current state.

mod render;
mod store;

pub use render::{ContextRenderer, CONTEXT_REFERENCE_FILE};
pub use store::{ContextChange, ContextUpdate, ProjectContext, CONTEXT_FILE};

use crate::error::Result;
use camino::Utf8Path;
use specify_core::types::{ProjectType, ProjectTypeCatalog};
use tracing::info;

/// Write a version 1 context and its summary for a new project
pub fn create_project_context(
    project_root: &Utf8Path,
    project_type: ProjectType,
    description: &str,
    catalog: &ProjectTypeCatalog,
    timestamp: &str,
) -> Result<ProjectContext> {
    let context = ProjectContext::new(project_type, description, timestamp);
    save_with_reference(project_root, &context, catalog)?;
    info!("Created {} project context", project_type);
    Ok(context)
}

/// Load, apply `update`, then save and regenerate the summary
///
/// Nothing is written when the update changes nothing.
pub fn update_project_context(
    project_root: &Utf8Path,
    update: &ContextUpdate,
    catalog: &ProjectTypeCatalog,
    timestamp: &str,
) -> Result<(ProjectContext, Vec<ContextChange>)> {
    let mut context = ProjectContext::load(project_root)?;
    let changes = context.apply(update, timestamp)?;
    if !changes.is_empty() {
        save_with_reference(project_root, &context, catalog)?;
    }
    Ok((context, changes))
}

fn save_with_reference(
    project_root: &Utf8Path,
    context: &ProjectContext,
    catalog: &ProjectTypeCatalog,
) -> Result<()> {
    context.save(project_root)?;
    ContextRenderer::new()?.write(project_root, context, catalog)?;
    Ok(())
}
