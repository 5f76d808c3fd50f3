//! Context command - view or update `.specify/context.yaml`

use anyhow::{Context as _, Result};
use camino::Utf8Path;
use console::style;
use specify_core::types::{ProjectType, ProjectTypeCatalog};
use specify_core::{utc_timestamp, HierarchicalConfigLoader};
use specify_project::context::{
    update_project_context, ContextChange, ContextUpdate, ProjectContext, CONTEXT_REFERENCE_FILE,
};

use crate::cli::ContextArgs;
use crate::output;

pub fn run(args: ContextArgs) -> Result<()> {
    let root = super::current_dir()?;

    if !ProjectContext::exists(&root) {
        output::error("No context.yaml found in current directory");
        output::hint(
            "Run 'specify init .' in a Spec Kit project, or create .specify/context.yaml manually",
        );
        std::process::exit(1);
    }

    let catalog = HierarchicalConfigLoader::new()?.load_project_types()?;
    let update = build_update(&args)?;

    if args.show || update.is_empty() {
        let context = ProjectContext::load(&root)?;
        show(&root, &context, &catalog);
        return Ok(());
    }

    let (_, changes) = update_project_context(&root, &update, &catalog, &utc_timestamp())
        .context("Failed to update project context")?;

    for change in &changes {
        report_change(change);
    }
    output::hint(&format!(
        "Context saved to {}",
        ProjectContext::path(&root)
    ));
    output::hint(&format!("AI reference updated at {}", CONTEXT_REFERENCE_FILE));

    Ok(())
}

/// Validate flags into an update before anything is read or written
fn build_update(args: &ContextArgs) -> Result<ContextUpdate> {
    let set_type = args
        .set_type
        .as_deref()
        .map(str::parse::<ProjectType>)
        .transpose()?;

    Ok(ContextUpdate {
        set_type,
        set_description: args.set_description.clone(),
        add_constraint: args.add_constraint.clone(),
        remove_constraint: args.remove_constraint,
    })
}

fn report_change(change: &ContextChange) {
    match change {
        ContextChange::TypeChanged(project_type) => output::success(&format!(
            "Project type updated to: {}",
            style(project_type).cyan()
        )),
        ContextChange::DescriptionChanged => output::success("Description updated"),
        ContextChange::ConstraintAdded(constraint) => output::success(&format!(
            "Constraint added: {}",
            style(constraint).yellow()
        )),
        ContextChange::ConstraintRemoved(constraint) => output::success(&format!(
            "Constraint removed: {}",
            style(constraint).yellow()
        )),
    }
}

fn show(root: &Utf8Path, context: &ProjectContext, catalog: &ProjectTypeCatalog) {
    output::header("Project Context");
    for (key, value) in summary_rows(root, context, catalog) {
        output::kv(&key, &value);
    }

    println!("\n{}", style("Available project types:").bold());
    for project_type in ProjectType::ALL {
        let marker = if project_type == context.project_type {
            style("●").green()
        } else {
            style("○").dim()
        };
        println!(
            "  {} {} - {}",
            marker,
            style(project_type).cyan(),
            catalog.label(project_type)
        );
    }
    println!();
}

fn summary_rows(
    root: &Utf8Path,
    context: &ProjectContext,
    catalog: &ProjectTypeCatalog,
) -> Vec<(String, String)> {
    let description = if context.description.is_empty() {
        "(not set)".to_string()
    } else {
        context.description.clone()
    };

    let constraints = if context.constraints.is_empty() {
        "(none)".to_string()
    } else {
        context
            .constraints
            .iter()
            .enumerate()
            .map(|(i, c)| format!("{}. {}", i + 1, c))
            .collect::<Vec<_>>()
            .join("\n    ")
    };

    vec![
        (
            "Project Type".to_string(),
            format!(
                "{} - {}",
                context.project_type,
                catalog.label(context.project_type)
            ),
        ),
        ("Description".to_string(), description),
        ("Constraints".to_string(), constraints),
        (
            "Context File".to_string(),
            ProjectContext::path(root).to_string(),
        ),
        (
            "Version".to_string(),
            format!("{} (updated {})", context.version, context.updated),
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use camino::Utf8PathBuf;

    fn catalog() -> ProjectTypeCatalog {
        HierarchicalConfigLoader::with_dir(Utf8PathBuf::from("/nonexistent"))
            .load_project_types()
            .unwrap()
    }

    #[test]
    fn test_build_update_rejects_unknown_type() {
        let args = ContextArgs {
            set_type: Some("purplefield".to_string()),
            ..Default::default()
        };
        let err = build_update(&args).unwrap_err();
        assert!(err.to_string().contains("greenfield, brownfield, bluefield"));
    }

    #[test]
    fn test_build_update_collects_flags() {
        let args = ContextArgs {
            set_type: Some("brownfield".to_string()),
            add_constraint: Some("Keep the REST API stable".to_string()),
            remove_constraint: Some(1),
            ..Default::default()
        };
        let update = build_update(&args).unwrap();
        assert_eq!(update.set_type, Some(ProjectType::Brownfield));
        assert_eq!(update.remove_constraint, Some(1));
        assert!(update.set_description.is_none());
    }

    #[test]
    fn test_show_only_when_no_mutation() {
        assert!(build_update(&ContextArgs::default()).unwrap().is_empty());
    }

    #[test]
    fn test_summary_rows_placeholders_and_numbering() {
        let root = Utf8Path::new("/work/demo");
        let mut context = ProjectContext::new(ProjectType::Greenfield, "", "2026-01-01T00:00:00Z");

        let rows = summary_rows(root, &context, &catalog());
        assert_eq!(rows[1].1, "(not set)");
        assert_eq!(rows[2].1, "(none)");
        assert_eq!(rows[3].1, "/work/demo/.specify/context.yaml");
        assert!(rows[0].1.starts_with("greenfield - "));

        context.constraints = vec!["No downtime".to_string(), "Use Postgres".to_string()];
        let rows = summary_rows(root, &context, &catalog());
        assert_eq!(rows[2].1, "1. No downtime\n    2. Use Postgres");
    }
}
