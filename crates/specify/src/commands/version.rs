//! Version command

use anyhow::Result;
use console::style;
use serde::Serialize;
use specify_core::{resolve_github_token, HierarchicalConfigLoader};
use specify_release::{GitHubClient, Release, ReleaseResolver};
use std::time::Duration;
use tracing::debug;

use crate::cli::VersionArgs;
use crate::output::{self, Tone};
use crate::version::{TemplateVersion, VersionInfo};

#[derive(Serialize)]
struct VersionReport {
    cli: VersionInfo,
    template: TemplateVersion,
    platform: &'static str,
    architecture: &'static str,
}

pub async fn run(args: VersionArgs) -> Result<()> {
    let pb = (!args.json).then(|| output::spinner("Checking latest template release..."));
    let template = latest_template_version().await;
    if let Some(pb) = pb {
        pb.finish_and_clear();
    }

    let report = VersionReport {
        cli: VersionInfo::current(),
        template,
        platform: std::env::consts::OS,
        architecture: std::env::consts::ARCH,
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        output::panel("Specify CLI Information", Tone::Info, &info_lines(&report));
    }

    Ok(())
}

/// Lookup failures degrade to "unknown"
async fn latest_template_version() -> TemplateVersion {
    match fetch_latest_release().await {
        Ok(release) => TemplateVersion::from(&release),
        Err(e) => {
            debug!("Template version lookup failed: {:#}", e);
            TemplateVersion::unknown()
        }
    }
}

async fn fetch_latest_release() -> Result<Release> {
    let config = HierarchicalConfigLoader::new()?.load_runtime_config()?;
    let client = GitHubClient::builder(&config.network)
        .token(resolve_github_token(None))
        .build()?;
    let timeout = Duration::from_secs(config.network.version_timeout_secs);
    let resolver = ReleaseResolver::new(client, config.github, config.template, timeout);
    Ok(resolver.latest().await?)
}

fn info_lines(report: &VersionReport) -> Vec<String> {
    let mut rows: Vec<(&str, String)> = vec![
        ("CLI Version", report.cli.version.clone()),
        ("Template Version", report.template.version.clone()),
        ("Released", report.template.released.clone()),
        ("", String::new()),
        ("Platform", report.platform.to_string()),
        ("Architecture", report.architecture.to_string()),
    ];
    if let Some(commit) = &report.cli.commit {
        rows.push(("Commit", commit.clone()));
    }
    if let Some(date) = &report.cli.build_date {
        rows.push(("Build Date", date.clone()));
    }

    let width = rows.iter().map(|(k, _)| k.len()).max().unwrap_or(0);
    rows.into_iter()
        .map(|(key, value)| {
            if key.is_empty() {
                String::new()
            } else {
                format!("{}  {}", style(format!("{:>width$}", key)).cyan(), value)
            }
        })
        .collect()
}
