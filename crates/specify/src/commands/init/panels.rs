//! Panel bodies printed around `specify init`

use console::style;
use specify_core::types::{AgentConfig, ProjectType};
use specify_project::git::{manual_init_commands, GitCommandFailure};

use super::Target;
use crate::output::{code, dim};

const LABEL_WIDTH: usize = 15;

pub(super) fn setup(target: &Target, cwd: &str) -> Vec<String> {
    let mut lines = vec![
        style("Specify Project Setup").cyan().to_string(),
        String::new(),
        format!(
            "{:<LABEL_WIDTH$} {}",
            "Project",
            style(&target.name).green()
        ),
        format!("{:<LABEL_WIDTH$} {}", "Working Path", dim(cwd)),
    ];
    if !target.here {
        lines.push(format!(
            "{:<LABEL_WIDTH$} {}",
            "Target Path",
            dim(target.path.as_str())
        ));
    }
    lines
}

pub(super) fn directory_conflict(name: &str) -> Vec<String> {
    vec![
        format!("Directory '{}' already exists", code(name)),
        "Please choose a different project name or remove the existing directory.".to_string(),
    ]
}

pub(super) fn agent_missing(agent: &AgentConfig) -> Vec<String> {
    vec![
        format!("{} not found", code(&agent.key)),
        format!(
            "Install from: {}",
            code(agent.install_url.as_deref().unwrap_or("(no install URL known)"))
        ),
        format!(
            "{} is required to continue with this project type.",
            agent.name
        ),
        String::new(),
        format!("Tip: Use {} to skip this check", code("--ignore-agent-tools")),
    ]
}

pub(super) fn failure(error: &anyhow::Error) -> Vec<String> {
    let mut lines = Vec::new();
    if let Some(title) = error_title(error) {
        lines.push(style(title).bold().to_string());
    }
    let message = format!("Initialization failed: {:#}", error);
    lines.extend(message.lines().map(str::to_string));
    lines
}

/// Category of a typed library error, if the chain carries one
fn error_title(error: &anyhow::Error) -> Option<&'static str> {
    if let Some(e) = error.downcast_ref::<specify_project::Error>() {
        return Some(e.title()).filter(|t| *t != "Error");
    }
    if let Some(e) = error.downcast_ref::<specify_release::Error>() {
        return Some(e.title()).filter(|t| *t != "Error");
    }
    None
}

pub(super) fn debug_environment(cwd: &str) -> Vec<String> {
    let pairs = [
        ("Specify", env!("CARGO_PKG_VERSION").to_string()),
        (
            "Platform",
            format!("{}-{}", std::env::consts::OS, std::env::consts::ARCH),
        ),
        ("CWD", cwd.to_string()),
    ];
    let width = pairs.iter().map(|(k, _)| k.len()).max().unwrap_or(0);
    pairs
        .iter()
        .map(|(k, v)| format!("{:<width$} → {}", k, dim(v)))
        .collect()
}

pub(super) fn git_failure(failure: &GitCommandFailure, target: &Target) -> Vec<String> {
    let dir = if target.here { "." } else { target.path.as_str() };
    let mut lines = vec![
        format!(
            "{} Git repository initialization failed",
            style("Warning:").yellow()
        ),
        String::new(),
    ];
    lines.extend(failure.to_string().lines().map(str::to_string));
    lines.push(String::new());
    lines.push(dim("You can initialize git manually later with:"));
    lines.extend(manual_init_commands(dir).iter().map(|c| code(c)));
    lines
}

pub(super) fn agent_security(folder: &str) -> Vec<String> {
    vec![
        "Some agents may store credentials, auth tokens, or other identifying and private"
            .to_string(),
        "artifacts in the agent folder within your project.".to_string(),
        format!(
            "Consider adding {} (or parts of it) to {} to prevent accidental credential leakage.",
            code(folder),
            code(".gitignore")
        ),
    ]
}

const CORE_COMMANDS: [(&str, &str); 5] = [
    ("/speckit.constitution", "Establish project principles"),
    ("/speckit.specify", "Create baseline specification"),
    ("/speckit.plan", "Create implementation plan"),
    ("/speckit.tasks", "Generate actionable tasks"),
    ("/speckit.implement", "Execute implementation"),
];

pub(super) fn next_steps(
    target: &Target,
    agent_key: &str,
    project_type: ProjectType,
    windows: bool,
) -> Vec<String> {
    let mut lines = Vec::new();
    if target.here {
        lines.push("1. You're already in the project directory!".to_string());
    } else {
        lines.push(format!(
            "1. Go to the project folder: {}",
            code(&format!("cd {}", target.name))
        ));
    }
    let mut step = 2;

    if agent_key == "codex" {
        let quoted = shell_quote(target.path.join(".codex").as_str());
        let cmd = if windows {
            format!("setx CODEX_HOME {}", quoted)
        } else {
            format!("export CODEX_HOME={}", quoted)
        };
        lines.push(format!(
            "{}. Set {} environment variable before running Codex: {}",
            step,
            code("CODEX_HOME"),
            code(&cmd)
        ));
        step += 1;
    }

    lines.push(format!(
        "{}. Start using slash commands with your AI agent:",
        step
    ));

    let mut commands = Vec::with_capacity(CORE_COMMANDS.len() + 1);
    if project_type == ProjectType::Greenfield {
        commands.push((
            "/speckit.initialize",
            "Bootstrap project vision, architecture & roadmap",
        ));
    }
    commands.extend(CORE_COMMANDS);

    for (i, (command, description)) in commands.iter().enumerate() {
        lines.push(format!(
            "   {}.{} {} - {}",
            step,
            i + 1,
            code(command),
            description
        ));
    }
    lines
}

pub(super) fn enhancement_commands() -> Vec<String> {
    let optional = dim("(optional)");
    vec![
        format!(
            "Optional commands that you can use for your specs {}",
            dim("(improve quality & confidence)")
        ),
        String::new(),
        format!(
            "○ {} {} - Ask structured questions to de-risk ambiguous areas before planning (run before {} if used)",
            code("/speckit.clarify"),
            optional,
            code("/speckit.plan")
        ),
        format!(
            "○ {} {} - Cross-artifact consistency & alignment report (after {}, before {})",
            code("/speckit.analyze"),
            optional,
            code("/speckit.tasks"),
            code("/speckit.implement")
        ),
        format!(
            "○ {} {} - Generate quality checklists for requirements completeness and clarity (after {})",
            code("/speckit.checklist"),
            optional,
            code("/speckit.plan")
        ),
        format!(
            "○ {} {} - Diagnose and fix issues with targeted remediation",
            code("/speckit.fix"),
            optional
        ),
    ]
}

pub(super) fn review_commands() -> Vec<String> {
    let mut lines = vec![
        format!(
            "Quality gates and release preparation {}",
            dim("(run after implementation)")
        ),
        String::new(),
    ];
    for (command, description) in [
        (
            "/speckit.review-implementation",
            "Audit code against spec with compliance matrix",
        ),
        (
            "/speckit.review-security",
            "Security review with language-aware rules",
        ),
        (
            "/speckit.review-readiness",
            "Production deployment gates with cutover/rollback runbooks",
        ),
        (
            "/speckit.review-uat",
            "Generate UAT plans and manual checklists from acceptance criteria",
        ),
        (
            "/speckit.review-summary",
            "Create documentation packs (technical, user, admin guides)",
        ),
        (
            "/speckit.release-notes",
            "Generate changelog entries and release notes",
        ),
    ] {
        lines.push(format!("○ {} - {}", code(command), description));
    }
    lines
}

pub(super) fn greenfield_tip() -> Vec<String> {
    vec![
        format!(
            "Since this is a {}, start by running {} to have a conversation about your project vision.",
            style("greenfield project").bold(),
            code("/speckit.initialize")
        ),
        String::new(),
        format!(
            "This will populate your {}, {}, and {} files,",
            code("docs/architecture.md"),
            code("docs/roadmap.md"),
            code("docs/ideas.md")
        ),
        "giving you a solid foundation before establishing your constitution and specifying features."
            .to_string(),
        String::new(),
        dim("Tip: You can paste an initial idea or project description after the command:"),
        code("/speckit.initialize I want to build a task management app with real-time collaboration..."),
        String::new(),
        dim("Feel free to use AI to flesh out your idea first - the more context you provide, the better!"),
    ]
}

/// Quote `value` for a POSIX shell when it contains anything unsafe
pub(super) fn shell_quote(value: &str) -> String {
    if value.is_empty() {
        return "''".to_string();
    }
    let safe = value
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || "@%+=:,./-_".contains(c));
    if safe {
        value.to_string()
    } else {
        format!("'{}'", value.replace('\'', r#"'"'"'"#))
    }
}
