//! Interactive choices for `specify init`

use anyhow::Result;
use console::style;
use dialoguer::{Confirm, Input, Select};
use specify_core::types::{AgentCatalog, ProjectType, ProjectTypeCatalog, ProjectTypeProfile, ScriptType};

const DEFAULT_AGENT: &str = "copilot";

pub(super) fn select_agent(catalog: &AgentCatalog) -> Result<String> {
    let agents: Vec<_> = catalog.iter().collect();
    let items: Vec<String> = agents
        .iter()
        .map(|a| format!("{} ({})", a.key, a.name))
        .collect();
    let default = agents
        .iter()
        .position(|a| a.key == DEFAULT_AGENT)
        .unwrap_or(0);

    let selection = Select::new()
        .with_prompt("Choose your AI assistant")
        .items(&items)
        .default(default)
        .interact()?;

    Ok(agents[selection].key.clone())
}

pub(super) fn select_script() -> Result<ScriptType> {
    let items: Vec<String> = ScriptType::ALL
        .iter()
        .map(|s| format!("{} ({})", s.as_str(), s.description()))
        .collect();
    let default = ScriptType::ALL
        .iter()
        .position(|s| *s == ScriptType::platform_default())
        .unwrap_or(0);

    let selection = Select::new()
        .with_prompt("Choose script type (or press Enter)")
        .items(&items)
        .default(default)
        .interact()?;

    Ok(ScriptType::ALL[selection])
}

pub(super) fn select_project_type(catalog: &ProjectTypeCatalog) -> Result<ProjectType> {
    let items: Vec<String> = ProjectType::ALL
        .iter()
        .map(|t| format!("{} - {}", t, catalog.label(*t)))
        .collect();

    let selection = Select::new()
        .with_prompt("What type of project is this?")
        .items(&items)
        .default(0)
        .interact()?;

    Ok(ProjectType::ALL[selection])
}

/// Examples and topics shown before the description prompt
pub(super) fn description_hints(profile: &ProjectTypeProfile) -> Vec<String> {
    let mut lines = Vec::new();
    if !profile.examples.is_empty() {
        lines.push(style("Examples:").dim().to_string());
        lines.extend(profile.examples.iter().map(|e| format!("  • {}", e)));
    }
    if !profile.considerations.is_empty() {
        if !lines.is_empty() {
            lines.push(String::new());
        }
        lines.push(style("Consider mentioning:").dim().to_string());
        lines.extend(profile.considerations.iter().map(|c| format!("  • {}", c)));
    }
    lines
}

pub(super) fn prompt_description() -> Result<String> {
    let description: String = Input::new()
        .with_prompt("Brief project description (optional, press Enter to skip)")
        .allow_empty(true)
        .interact_text()?;
    Ok(description.trim().to_string())
}

pub(super) fn confirm(prompt: &str, default: bool) -> Result<bool> {
    Ok(Confirm::new()
        .with_prompt(prompt)
        .default(default)
        .interact()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_description_hints_sections() {
        let profile = ProjectTypeProfile {
            examples: vec!["Legacy billing system".to_string()],
            considerations: vec!["Technical debt areas".to_string()],
            ..Default::default()
        };
        let lines: Vec<String> = description_hints(&profile)
            .iter()
            .map(|l| console::strip_ansi_codes(l).to_string())
            .collect();
        assert_eq!(
            lines,
            [
                "Examples:",
                "  • Legacy billing system",
                "",
                "Consider mentioning:",
                "  • Technical debt areas"
            ]
        );
    }

    #[test]
    fn test_description_hints_empty_profile() {
        assert!(description_hints(&ProjectTypeProfile::default()).is_empty());
    }
}
