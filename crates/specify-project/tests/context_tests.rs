//! Context store round trips through the public helpers
//!
//! Tests cover:
//! - Initial context and summary files
//! - Updates bump the version and regenerate the summary
//! - Regenerating with identical inputs is stable

use camino::Utf8PathBuf;
use specify_core::types::{ProjectType, ProjectTypeCatalog};
use specify_core::HierarchicalConfigLoader;
use specify_project::context::{
    create_project_context, update_project_context, ContextChange, ContextUpdate, ProjectContext,
    CONTEXT_REFERENCE_FILE,
};
use specify_project::Error;
use std::fs;
use tempfile::TempDir;

const T0: &str = "2026-05-01T09:00:00Z";
const T1: &str = "2026-05-02T09:00:00Z";

fn catalog() -> ProjectTypeCatalog {
    HierarchicalConfigLoader::with_dir(Utf8PathBuf::from("/nonexistent"))
        .load_project_types()
        .unwrap()
}

fn root(temp: &TempDir) -> Utf8PathBuf {
    Utf8PathBuf::from_path_buf(temp.path().to_path_buf()).unwrap()
}

#[test]
fn test_create_writes_both_files() {
    let temp = TempDir::new().unwrap();
    let root = root(&temp);

    let context =
        create_project_context(&root, ProjectType::Brownfield, "Legacy billing", &catalog(), T0)
            .unwrap();

    assert_eq!(context.version, 1);
    assert!(root.join(".specify/context.yaml").is_file());
    let summary = fs::read_to_string(root.join(CONTEXT_REFERENCE_FILE)).unwrap();
    assert!(summary.contains("## Project Type: BROWNFIELD"));
    assert!(summary.contains("Legacy billing"));
    assert!(summary.contains("*Last updated: 2026-05-01T09:00:00Z*"));
}

#[test]
fn test_update_regenerates_summary() {
    let temp = TempDir::new().unwrap();
    let root = root(&temp);
    let catalog = catalog();
    create_project_context(&root, ProjectType::Greenfield, "", &catalog, T0).unwrap();

    let update = ContextUpdate {
        add_constraint: Some("Must not change existing APIs".to_string()),
        ..Default::default()
    };
    let (context, changes) = update_project_context(&root, &update, &catalog, T1).unwrap();

    assert_eq!(
        changes,
        vec![ContextChange::ConstraintAdded(
            "Must not change existing APIs".to_string()
        )]
    );
    assert_eq!(context.version, 2);
    assert_eq!(ProjectContext::load(&root).unwrap(), context);

    let summary = fs::read_to_string(root.join(CONTEXT_REFERENCE_FILE)).unwrap();
    assert!(summary.contains("- Must not change existing APIs"));
    assert!(summary.contains("*Context version: 2*"));
}

#[test]
fn test_update_without_context_file() {
    let temp = TempDir::new().unwrap();
    let err = update_project_context(
        &root(&temp),
        &ContextUpdate::default(),
        &catalog(),
        T1,
    )
    .unwrap_err();
    assert!(matches!(err, Error::ContextNotFound { .. }));
}

#[test]
fn test_recreate_with_same_inputs_is_byte_identical() {
    let temp = TempDir::new().unwrap();
    let root = root(&temp);
    let catalog = catalog();

    create_project_context(&root, ProjectType::Bluefield, "Plugin", &catalog, T0).unwrap();
    let yaml_a = fs::read(root.join(".specify/context.yaml")).unwrap();
    let md_a = fs::read(root.join(CONTEXT_REFERENCE_FILE)).unwrap();

    create_project_context(&root, ProjectType::Bluefield, "Plugin", &catalog, T0).unwrap();

    assert_eq!(fs::read(root.join(".specify/context.yaml")).unwrap(), yaml_a);
    assert_eq!(fs::read(root.join(CONTEXT_REFERENCE_FILE)).unwrap(), md_a);
}
