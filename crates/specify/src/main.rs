//! Specify CLI - bootstrap spec-driven development projects
//!
//! This is the main entry point for the `specify` command-line interface.

mod cli;
mod commands;
mod output;
mod tools;
mod tracker;
mod version;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::{Cli, Commands};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Must run before any TLS operation
    let _ = rustls::crypto::aws_lc_rs::default_provider().install_default();

    let cli = Cli::parse();

    init_tracing(cli.verbose, cli.quiet);

    match cli.command {
        Commands::Init(args) => commands::init::run(args).await,
        Commands::Check => commands::check::run(),
        Commands::Version(args) => commands::version::run(args).await,
        Commands::Context(args) => commands::context::run(args),
    }
}

/// Initialize tracing with appropriate verbosity
///
/// Defaults to `warn` so log lines do not interleave with the step tracker.
fn init_tracing(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("warn"),
            1 => EnvFilter::new("info"),
            2 => EnvFilter::new("debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();
}
