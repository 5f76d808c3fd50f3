//! Init command - scaffold a project from the latest template
//!
//! Resolves the target directory, gathers choices (flags first, prompts when
//! stdin is a terminal), then runs the acquisition pipeline and the
//! finishing steps under a live step tracker.

mod panels;
mod prompts;

use anyhow::{bail, Result};
use camino::{Utf8Path, Utf8PathBuf};
use console::style;
use specify_core::types::{
    AgentCatalog, AgentConfig, ProjectType, ProjectTypeCatalog, RuntimeConfig, ScriptType,
};
use specify_core::{resolve_github_token, utc_timestamp, HierarchicalConfigLoader};
use specify_project::context::create_project_context;
use specify_project::git::{
    git_available, init_repository, is_git_repo, GitCommandFailure, GitInitOutcome,
};
use specify_project::pipeline::rollback_project_dir;
use specify_project::scaffolding::{create_docs_scaffolding, create_instructions_file};
use specify_project::{
    ensure_executable_scripts, Error as ProjectError, ExtractMode, MergeRule, Step, StepObserver,
    TemplatePipeline, TemplateRequest,
};
use specify_release::{ArchiveFetcher, GitHubClient, ReleaseResolver};
use std::io::IsTerminal;
use std::time::Duration;
use tracing::{debug, warn};

use crate::cli::InitArgs;
use crate::output::{self, Tone};
use crate::tools::check_tool;
use crate::tracker::StepTracker;

/// Where the project is placed
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Target {
    pub name: String,
    pub path: Utf8PathBuf,
    /// Merge into the current directory instead of creating a new one
    pub here: bool,
}

impl Target {
    fn mode(&self) -> ExtractMode {
        if self.here {
            ExtractMode::MergeIntoExisting
        } else {
            ExtractMode::Fresh
        }
    }
}

/// Everything decided before the pipeline starts
#[derive(Debug, Clone)]
struct Plan {
    target: Target,
    agent: AgentConfig,
    script: ScriptType,
    project_type: ProjectType,
    description: String,
    instructions: bool,
    scaffolding: bool,
    no_git: bool,
    git_found: bool,
}

pub async fn run(args: InitArgs) -> Result<()> {
    let loader = HierarchicalConfigLoader::new()?;
    let config = loader.load_runtime_config()?;
    let agents = loader.load_agent_catalog()?;
    let project_types = loader.load_project_types()?;

    let cwd = super::current_dir()?;
    let interactive = std::io::stdin().is_terminal();

    let target = resolve_target(args.project_name.as_deref(), args.here, &cwd)
        .unwrap_or_else(|e| fail(&e.to_string()));

    if target.here {
        if !confirm_merge(&target.path, args.force, interactive)? {
            output::warning("Operation cancelled");
            return Ok(());
        }
    } else if target.path.exists() {
        output::panel(
            "Directory Conflict",
            Tone::Error,
            &panels::directory_conflict(&target.name),
        );
        std::process::exit(1);
    }

    output::panel("", Tone::Info, &panels::setup(&target, cwd.as_str()));

    let git_found = !args.no_git && git_available().await;
    if !args.no_git && !git_found {
        output::warning("Git not found - will skip repository initialization");
    }

    let agent = choose_agent(args.ai.as_deref(), &agents, interactive)?;
    if !args.ignore_agent_tools && agent.requires_cli && !check_tool(&agent.key) {
        output::panel(
            "Agent Detection Error",
            Tone::Error,
            &panels::agent_missing(&agent),
        );
        std::process::exit(1);
    }

    let script = match args.script.as_deref() {
        Some(script) => script
            .parse::<ScriptType>()
            .unwrap_or_else(|e| fail(&e.to_string())),
        None if interactive => prompts::select_script()?,
        None => ScriptType::platform_default(),
    };

    let project_type = match args.project_type.as_deref() {
        Some(project_type) => project_type
            .parse::<ProjectType>()
            .unwrap_or_else(|e| fail(&e.to_string())),
        None if interactive => prompts::select_project_type(&project_types)?,
        None => ProjectType::default(),
    };

    let description = match &args.description {
        Some(description) => description.trim().to_string(),
        None if interactive => {
            println!();
            if let Some(profile) = project_types.get(project_type) {
                for line in prompts::description_hints(profile) {
                    println!("{}", line);
                }
            }
            prompts::prompt_description()?
        }
        None => String::new(),
    };

    let first_run = !target.path.join(".specify").exists();
    let instructions = match args.instructions_choice() {
        Some(choice) => choice,
        None if interactive && first_run => prompts::confirm(
            "Create instructions.md with Spec Kit getting started guide?",
            true,
        )?,
        None => false,
    };
    let scaffolding = match args.scaffolding_choice() {
        Some(choice) => choice,
        None if interactive && project_type == ProjectType::Greenfield => prompts::confirm(
            "Create docs/ folder with architecture, roadmap, and ideas templates?",
            true,
        )?,
        None => false,
    };

    let plan = Plan {
        target,
        agent,
        script,
        project_type,
        description,
        instructions,
        scaffolding,
        no_git: args.no_git,
        git_found,
    };
    print_selections(&plan);

    let tracker = new_tracker(&plan).live();
    let result = scaffold(&plan, &args, &config, &project_types, &cwd, &tracker).await;
    if let Err(e) = &result {
        tracker.error(Step::Final.key(), &format!("{:#}", e));
    }
    tracker.finish();
    println!("{}", tracker.render());

    let git_failure = match result {
        Ok(git_failure) => git_failure,
        Err(e) => {
            output::panel("Failure", Tone::Error, &panels::failure(&e));
            if args.debug {
                output::panel(
                    "Debug Environment",
                    Tone::Accent,
                    &panels::debug_environment(cwd.as_str()),
                );
            }
            roll_back(&plan.target, &e);
            std::process::exit(1);
        }
    };

    println!("\n{}", style("Project ready.").green().bold());
    print_closing_panels(&plan, git_failure.as_ref());

    Ok(())
}

/// Remove a fresh project directory after a failed run
///
/// Merge mode never removes anything. A destination conflict means the
/// directory was not created by this run, so it stays as well.
fn roll_back(target: &Target, error: &anyhow::Error) {
    let preexisting = error.chain().any(|cause| {
        matches!(
            cause.downcast_ref::<ProjectError>(),
            Some(ProjectError::DestinationExists { .. })
        )
    });
    if preexisting {
        debug!("Leaving {} in place: it was not created by this run", target.path);
        return;
    }
    if let Err(cleanup) = rollback_project_dir(target.path.as_std_path(), target.mode()) {
        warn!("{}", cleanup);
    }
}

/// Work out the target directory from `PROJECT_NAME` / `--here`
///
/// A name of `.` means the current directory.
fn resolve_target(project_name: Option<&str>, here: bool, cwd: &Utf8Path) -> Result<Target> {
    let (project_name, here) = match project_name {
        Some(".") => (None, true),
        other => (other, here),
    };

    match (project_name, here) {
        (Some(_), true) => bail!("Cannot specify both project name and --here flag"),
        (None, false) => bail!(
            "Must specify either a project name, use '.' for current directory, or use --here flag"
        ),
        (None, true) => Ok(Target {
            name: cwd.file_name().unwrap_or(cwd.as_str()).to_string(),
            path: cwd.to_path_buf(),
            here: true,
        }),
        (Some(name), false) => Ok(Target {
            name: name.to_string(),
            path: cwd.join(name),
            here: false,
        }),
    }
}

/// Ask before merging into a non-empty directory
fn confirm_merge(path: &Utf8Path, force: bool, interactive: bool) -> Result<bool> {
    let existing = path.read_dir_utf8()?.count();
    if existing == 0 {
        return Ok(true);
    }

    output::warning(&format!(
        "Current directory is not empty ({} items)",
        existing
    ));
    output::warning(
        "Template files will be merged with existing content and may overwrite existing files",
    );

    if force {
        output::info("--force supplied: skipping confirmation and proceeding with merge");
        return Ok(true);
    }
    if !interactive {
        fail("Refusing to merge into a non-empty directory without a terminal; pass --force");
    }
    prompts::confirm("Do you want to continue?", false)
}

fn choose_agent(ai: Option<&str>, agents: &AgentCatalog, interactive: bool) -> Result<AgentConfig> {
    let key = match ai {
        Some(key) => key.to_string(),
        None if interactive => prompts::select_agent(agents)?,
        None => "copilot".to_string(),
    };

    match agents.get(&key) {
        Some(agent) => Ok(agent.clone()),
        None => fail(&format!(
            "Invalid AI assistant '{}'. Choose from: {}",
            key,
            agents.keys().join(", ")
        )),
    }
}

fn print_selections(plan: &Plan) {
    println!("{} {}", style("Selected AI assistant:").cyan(), plan.agent.key);
    println!("{} {}", style("Selected script type:").cyan(), plan.script);
    println!("{} {}", style("Project type:").cyan(), plan.project_type);
    if !plan.description.is_empty() {
        println!(
            "{} {}",
            style("Description:").cyan(),
            truncate(&plan.description, 50)
        );
    }
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let head: String = text.chars().take(max_chars).collect();
    format!("{}...", head)
}

fn new_tracker(plan: &Plan) -> StepTracker {
    let tracker = StepTracker::new("Initialize Specify Project");
    tracker.add("precheck", "Check required tools");
    tracker.complete("precheck", "ok");
    tracker.add("ai-select", "Select AI assistant");
    tracker.complete("ai-select", &plan.agent.key);
    tracker.add("script-select", "Select script type");
    tracker.complete("script-select", plan.script.as_str());
    tracker.add("context-select", "Select project context");
    tracker.complete("context-select", plan.project_type.as_str());

    for step in Step::PIPELINE {
        let wanted = match step {
            Step::Instructions => plan.instructions,
            Step::Docs => plan.scaffolding,
            _ => true,
        };
        if wanted {
            tracker.add(step.key(), step.label());
        }
    }
    tracker
}

/// Fetch, place and finish the project
///
/// Returns the git bootstrap failure, if any; every other failure is fatal.
async fn scaffold(
    plan: &Plan,
    args: &InitArgs,
    config: &RuntimeConfig,
    project_types: &ProjectTypeCatalog,
    cwd: &Utf8Path,
    tracker: &StepTracker,
) -> Result<Option<GitCommandFailure>> {
    let network = &config.network;
    let client = GitHubClient::builder(network)
        .token(resolve_github_token(args.github_token.as_deref()))
        .skip_tls(args.skip_tls)
        .debug(args.debug)
        .build()?;
    debug!(
        "GitHub requests are {}",
        if client.is_authenticated() { "authenticated" } else { "anonymous" }
    );
    let resolver = ReleaseResolver::new(
        client.clone(),
        config.github.clone(),
        config.template.clone(),
        Duration::from_secs(network.api_timeout_secs),
    );
    let fetcher = ArchiveFetcher::new(
        client,
        Duration::from_secs(network.download_timeout_secs),
        network.download_chunk_size,
    );
    let pipeline =
        TemplatePipeline::new(resolver, fetcher, MergeRule::from_config(&config.template));

    let root = plan.target.path.as_path();
    let request = TemplateRequest {
        agent: plan.agent.key.clone(),
        script: plan.script,
        project_dir: root.as_std_path().to_path_buf(),
        mode: plan.target.mode(),
        download_dir: cwd.as_std_path().to_path_buf(),
    };
    let outcome = pipeline.download_and_extract(&request, tracker).await?;
    debug!(
        "Placed {} from {}",
        outcome.download.filename, outcome.download.release_tag
    );

    tracker.on_start(Step::Chmod, "");
    let permissions = ensure_executable_scripts(
        root.as_std_path(),
        &config.template.scripts_dir,
        &config.template.script_extension,
    );
    for failure in &permissions.failures {
        warn!("Could not make script executable: {}", failure);
    }
    tracker.on_complete(Step::Chmod, &permissions.detail());

    tracker.on_start(Step::Context, "");
    create_project_context(
        root,
        plan.project_type,
        &plan.description,
        project_types,
        &utc_timestamp(),
    )?;
    tracker.on_complete(Step::Context, ".specify/context.yaml");

    if plan.instructions {
        tracker.on_start(Step::Instructions, "");
        let report = create_instructions_file(root)?;
        tracker.on_complete(Step::Instructions, &report.detail());
    }

    if plan.scaffolding {
        tracker.on_start(Step::Docs, "");
        let report = create_docs_scaffolding(root)?;
        tracker.on_complete(Step::Docs, &report.detail());
    }

    let mut git_failure = None;
    if plan.no_git {
        tracker.on_skip(Step::Git, "--no-git flag");
    } else {
        tracker.on_start(Step::Git, "");
        if is_git_repo(root).await {
            tracker.on_complete(Step::Git, "existing repo detected");
        } else if plan.git_found {
            match init_repository(root, &config.git_workflow).await {
                GitInitOutcome::Initialized => tracker.on_complete(Step::Git, "initialized"),
                GitInitOutcome::Failed(failure) => {
                    tracker.on_error(Step::Git, "init failed");
                    git_failure = Some(failure);
                }
            }
        } else {
            tracker.on_skip(Step::Git, "git not available");
        }
    }

    tracker.on_complete(Step::Final, "project ready");
    Ok(git_failure)
}

fn print_closing_panels(plan: &Plan, git_failure: Option<&GitCommandFailure>) {
    if let Some(failure) = git_failure {
        output::panel(
            "Git Initialization Failed",
            Tone::Error,
            &panels::git_failure(failure, &plan.target),
        );
    }

    output::panel(
        "Agent Folder Security",
        Tone::Warning,
        &panels::agent_security(&plan.agent.folder),
    );
    output::panel(
        "Next Steps",
        Tone::Info,
        &panels::next_steps(
            &plan.target,
            &plan.agent.key,
            plan.project_type,
            cfg!(windows),
        ),
    );
    output::panel(
        "Enhancement Commands",
        Tone::Info,
        &panels::enhancement_commands(),
    );
    output::panel("Review Commands", Tone::Accent, &panels::review_commands());

    if plan.project_type == ProjectType::Greenfield {
        output::panel("💡 Greenfield Tip", Tone::Success, &panels::greenfield_tip());
    }
}

/// Print `message` as an error and exit non-zero
fn fail(message: &str) -> ! {
    output::error(message);
    std::process::exit(1);
}
