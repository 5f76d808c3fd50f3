//! CLI argument parsing with clap

use clap::{Args, Parser, Subcommand};

/// Specify - bootstrap spec-driven development projects
#[derive(Parser, Debug)]
#[command(name = "specify")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize a new Specify project from the latest template
    Init(InitArgs),

    /// Check that all required tools are installed
    Check,

    /// Display version and system information
    Version(VersionArgs),

    /// View or update project context settings
    Context(ContextArgs),
}

// Init command
#[derive(Args, Debug, Default)]
#[command(after_help = "Examples:
  specify init my-project
  specify init my-project --ai claude
  specify init my-project --ai copilot --no-git
  specify init . --ai claude
  specify init --here --force")]
pub struct InitArgs {
    /// Name for your new project directory ('.' for the current directory)
    pub project_name: Option<String>,

    /// AI assistant to use (claude, gemini, copilot, cursor-agent, codex, ...)
    #[arg(long = "ai")]
    pub ai: Option<String>,

    /// Script type to use: sh or ps
    #[arg(long)]
    pub script: Option<String>,

    /// Skip checks for AI agent tools like Claude Code
    #[arg(long)]
    pub ignore_agent_tools: bool,

    /// Skip git repository initialization
    #[arg(long)]
    pub no_git: bool,

    /// Initialize in the current directory instead of creating a new one
    #[arg(long)]
    pub here: bool,

    /// Merge into a non-empty current directory without asking
    #[arg(long)]
    pub force: bool,

    /// Skip TLS certificate verification (not recommended)
    #[arg(long)]
    pub skip_tls: bool,

    /// Show verbose diagnostics for network and extraction failures
    #[arg(long)]
    pub debug: bool,

    /// GitHub token for API requests (defaults to GH_TOKEN or GITHUB_TOKEN)
    #[arg(long)]
    pub github_token: Option<String>,

    /// Project type: greenfield, brownfield or bluefield
    #[arg(long)]
    pub project_type: Option<String>,

    /// Brief project description
    #[arg(long)]
    pub description: Option<String>,

    /// Create instructions.md with the getting started guide
    #[arg(long, overrides_with = "no_instructions")]
    pub instructions: bool,

    /// Do not create instructions.md
    #[arg(long)]
    pub no_instructions: bool,

    /// Create docs/ architecture, roadmap and ideas templates
    #[arg(long, overrides_with = "no_scaffolding")]
    pub scaffolding: bool,

    /// Do not create docs/ templates
    #[arg(long)]
    pub no_scaffolding: bool,
}

impl InitArgs {
    /// Explicit instructions.md choice, `None` when neither flag was given
    pub fn instructions_choice(&self) -> Option<bool> {
        flag_pair(self.instructions, self.no_instructions)
    }

    /// Explicit docs scaffolding choice, `None` when neither flag was given
    pub fn scaffolding_choice(&self) -> Option<bool> {
        flag_pair(self.scaffolding, self.no_scaffolding)
    }
}

fn flag_pair(yes: bool, no: bool) -> Option<bool> {
    match (yes, no) {
        (true, _) => Some(true),
        (_, true) => Some(false),
        _ => None,
    }
}

// Version command
#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

// Context command
#[derive(Args, Debug, Default)]
#[command(after_help = "Examples:
  specify context --show
  specify context --set-type brownfield
  specify context --set-description \"API service\"
  specify context --add-constraint \"Must not change API\"
  specify context --remove-constraint 1")]
pub struct ContextArgs {
    /// Display current project context
    #[arg(long)]
    pub show: bool,

    /// Update project type (greenfield, brownfield, bluefield)
    #[arg(long)]
    pub set_type: Option<String>,

    /// Update project description
    #[arg(long)]
    pub set_description: Option<String>,

    /// Add a constraint to the project
    #[arg(long)]
    pub add_constraint: Option<String>,

    /// Remove constraint by index (1-based)
    #[arg(long, value_name = "INDEX")]
    pub remove_constraint: Option<usize>,
}
