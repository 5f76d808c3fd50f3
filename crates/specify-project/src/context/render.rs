//! `memory/context.md` rendering with Tera

use super::store::ProjectContext;
use crate::error::Result;
use camino::{Utf8Path, Utf8PathBuf};
use serde::Serialize;
use specify_core::types::ProjectTypeCatalog;
use std::fs;
use tera::Tera;

/// Location of the generated summary relative to the project root
pub const CONTEXT_REFERENCE_FILE: &str = "memory/context.md";

const TEMPLATE_NAME: &str = "context.md";

const NO_DESCRIPTION: &str = "_No description provided._";
const UNKNOWN_TYPE: &str = "Unknown project type.";

#[derive(Debug, Serialize)]
struct ArtifactGroup {
    title: String,
    items: Vec<String>,
}

#[derive(Debug, Serialize)]
struct ReferenceVars<'a> {
    project_type_upper: String,
    type_description: &'a str,
    description: &'a str,
    implications: &'a str,
    constraints: &'a [String],
    artifacts: Vec<ArtifactGroup>,
    guidance: &'a str,
    timestamp: &'a str,
    version: u32,
}

/// Renders the AI-facing context summary
pub struct ContextRenderer {
    tera: Tera,
}

impl ContextRenderer {
    pub fn new() -> Result<Self> {
        let mut tera = Tera::default();
        tera.add_raw_template(
            TEMPLATE_NAME,
            include_str!("../../templates/context.md.tera"),
        )?;
        Ok(Self { tera })
    }

    /// Render the summary for `context`, stamped with its `updated` time
    pub fn render(&self, context: &ProjectContext, catalog: &ProjectTypeCatalog) -> Result<String> {
        let profile = catalog.get(context.project_type);
        let vars = ReferenceVars {
            project_type_upper: context.project_type.as_str().to_uppercase(),
            type_description: profile
                .map(|p| p.description.trim())
                .unwrap_or(UNKNOWN_TYPE),
            description: match context.description.trim() {
                "" => NO_DESCRIPTION,
                _ => context.description.as_str(),
            },
            implications: profile.map(|p| p.implications.trim()).unwrap_or_default(),
            constraints: &context.constraints,
            artifacts: context
                .linked_artifacts
                .iter()
                .filter(|(_, items)| !items.is_empty())
                .map(|(category, items)| ArtifactGroup {
                    title: title_case(category),
                    items: items.clone(),
                })
                .collect(),
            guidance: profile.map(|p| p.guidance.trim()).unwrap_or_default(),
            timestamp: &context.updated,
            version: context.version,
        };

        let ctx = tera::Context::from_serialize(&vars)?;
        Ok(self.tera.render(TEMPLATE_NAME, &ctx)?)
    }

    /// Render and write `memory/context.md` below `project_root`
    pub fn write(
        &self,
        project_root: &Utf8Path,
        context: &ProjectContext,
        catalog: &ProjectTypeCatalog,
    ) -> Result<Utf8PathBuf> {
        let path = project_root.join(CONTEXT_REFERENCE_FILE);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, self.render(context, catalog)?)?;
        Ok(path)
    }
}

/// Upper-case the first letter of every alphabetic run
fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut at_word_start = true;
    for c in text.chars() {
        if c.is_alphabetic() {
            if at_word_start {
                out.extend(c.to_uppercase());
            } else {
                out.extend(c.to_lowercase());
            }
            at_word_start = false;
        } else {
            out.push(c);
            at_word_start = true;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use specify_core::types::ProjectType;
    use specify_core::HierarchicalConfigLoader;

    fn catalog() -> ProjectTypeCatalog {
        HierarchicalConfigLoader::with_dir(Utf8PathBuf::from("/nonexistent"))
            .load_project_types()
            .unwrap()
    }

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("jira"), "Jira");
        assert_eq!(title_case("design_docs"), "Design_Docs");
        assert_eq!(title_case("API links"), "Api Links");
    }

    #[test]
    fn test_render_placeholders() {
        let renderer = ContextRenderer::new().unwrap();
        let context = ProjectContext::new(ProjectType::Greenfield, "", "2026-03-01T10:00:00Z");

        let text = renderer.render(&context, &catalog()).unwrap();

        assert!(text.starts_with("# Project Context\n"));
        assert!(text.contains("## Project Type: GREENFIELD\n"));
        assert!(text.contains("_No description provided._"));
        assert!(text.contains(
            "## Constraints\n\n_No constraints defined. Add via `specify context --add-constraint`._\n\n---"
        ));
        assert!(text.contains("_No linked artifacts. Edit `.specify/context.yaml` to add._\n\n---"));
        assert!(text
            .trim_end()
            .ends_with("*Last updated: 2026-03-01T10:00:00Z*\n*Context version: 1*"));
    }

    #[test]
    fn test_render_lists() {
        let renderer = ContextRenderer::new().unwrap();
        let mut context = ProjectContext::new(ProjectType::Brownfield, "Billing", "t");
        context.constraints = vec!["No API changes".to_string(), "Keep <v2> clients".to_string()];
        context
            .linked_artifacts
            .insert("jira".to_string(), vec!["BILL-1".to_string(), "BILL-2".to_string()]);
        context.linked_artifacts.insert("docs".to_string(), vec![]);

        let text = renderer.render(&context, &catalog()).unwrap();

        assert!(text.contains("## Constraints\n\n- No API changes\n- Keep <v2> clients\n\n---"));
        assert!(text.contains("## Linked Artifacts\n\n### Jira\n- BILL-1\n- BILL-2\n\n---"));
        assert!(!text.contains("### Docs"));
        assert!(text.contains("## Project Type: BROWNFIELD"));
    }

    #[test]
    fn test_render_is_deterministic() {
        let renderer = ContextRenderer::new().unwrap();
        let context = ProjectContext::new(ProjectType::Bluefield, "x", "t");
        let catalog = catalog();
        assert_eq!(
            renderer.render(&context, &catalog).unwrap(),
            renderer.render(&context, &catalog).unwrap()
        );
    }
}
