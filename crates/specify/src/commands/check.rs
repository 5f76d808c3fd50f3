//! Check command - report which tools Specify can use

use anyhow::Result;
use console::style;
use specify_core::types::AgentCatalog;
use specify_core::HierarchicalConfigLoader;
use tabled::{settings::Style, Table, Tabled};

use crate::output;
use crate::tools::check_tool;

#[derive(Tabled, Debug, Clone, PartialEq, Eq)]
struct ToolRow {
    tool: String,
    name: String,
    status: String,
}

#[derive(Debug, Default)]
struct CheckReport {
    rows: Vec<ToolRow>,
    git_found: bool,
    agent_found: bool,
}

pub fn run() -> Result<()> {
    println!("{}\n", style("Checking for installed tools...").bold());

    let catalog = HierarchicalConfigLoader::new()?.load_agent_catalog()?;
    let report = collect(&catalog, check_tool);

    let mut table = Table::new(&report.rows);
    table.with(Style::sharp());
    println!("{}", table);

    println!();
    output::success("Specify CLI is ready to use!");

    if !report.git_found {
        output::hint("Tip: Install git for repository management");
    }
    if !report.agent_found {
        output::hint("Tip: Install an AI assistant for the best experience");
    }

    Ok(())
}

fn collect(catalog: &AgentCatalog, detect: impl Fn(&str) -> bool) -> CheckReport {
    let mut report = CheckReport::default();

    report.git_found = detect("git");
    report.rows.push(row("git", "Git version control", found(report.git_found)));

    for agent in catalog.iter() {
        let status = if agent.requires_cli {
            let present = detect(&agent.key);
            report.agent_found |= present;
            found(present)
        } else {
            "skipped (IDE-based, no CLI check)".to_string()
        };
        report.rows.push(row(&agent.key, &agent.name, status));
    }

    for (tool, name) in [
        ("code", "Visual Studio Code"),
        ("code-insiders", "Visual Studio Code Insiders"),
    ] {
        report.rows.push(row(tool, name, found(detect(tool))));
    }

    report
}

fn row(tool: &str, name: &str, status: String) -> ToolRow {
    ToolRow {
        tool: tool.to_string(),
        name: name.to_string(),
        status,
    }
}

fn found(present: bool) -> String {
    if present { "available" } else { "not found" }.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use specify_core::types::AgentConfig;

    fn agent(key: &str, name: &str, requires_cli: bool) -> AgentConfig {
        AgentConfig {
            key: key.to_string(),
            name: name.to_string(),
            folder: format!(".{}/", key),
            install_url: None,
            requires_cli,
        }
    }

    fn catalog() -> AgentCatalog {
        AgentCatalog::new(vec![
            agent("claude", "Claude Code", true),
            agent("copilot", "GitHub Copilot", false),
        ])
    }

    #[test]
    fn test_ide_agents_are_skipped_and_not_counted() {
        let report = collect(&catalog(), |tool| tool == "git" || tool == "copilot");

        assert!(report.git_found);
        assert!(!report.agent_found);
        let copilot = report.rows.iter().find(|r| r.tool == "copilot").unwrap();
        assert!(copilot.status.starts_with("skipped"));
    }

    #[test]
    fn test_rows_in_report_order() {
        let report = collect(&catalog(), |tool| tool == "claude");

        let tools: Vec<&str> = report.rows.iter().map(|r| r.tool.as_str()).collect();
        assert_eq!(tools, ["git", "claude", "copilot", "code", "code-insiders"]);
        assert!(report.agent_found);
        assert!(!report.git_found);
        assert_eq!(report.rows[0].status, "not found");
        assert_eq!(report.rows[1].status, "available");
    }
}
