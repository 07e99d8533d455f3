// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Report command - aggregates MAINTAINERS files across an organization

use crate::config::Settings;
use crate::pipeline::{filter_candidates, Exclusion, FilterOutcome, FilterPolicy};
use crate::report::{self, Details, Rendered};
use crate::source::{GitHubSource, MirrorSource, RepoSource};
use crate::store;
use anyhow::{Context, Result};
use chrono::Local;
use std::io::Write;
use std::path::PathBuf;
use tracing::info;

/// Arguments for the report command
#[derive(Debug, Default)]
pub struct ReportArgs {
    /// Projection to render
    pub details: Details,
    /// Organization override
    pub org: Option<String>,
    /// Fork threshold override
    pub fork_threshold: Option<u64>,
    /// Extra denylist entries
    pub deny: Vec<String>,
    /// Read from an on-disk mirror instead of the API
    pub mirror: Option<PathBuf>,
    /// Destination of the lists export
    pub output: Option<PathBuf>,
    /// Print per-stage counts to stderr
    pub verbose: bool,
}

/// Run the report command
pub fn run(settings: &Settings, args: ReportArgs) -> Result<()> {
    let source: Box<dyn RepoSource> = match &args.mirror {
        Some(dir) => Box::new(MirrorSource::new(dir)),
        None => Box::new(
            GitHubSource::from_env(&settings.api_url, &settings.token_env)
                .context("Failed to build GitHub client")?,
        ),
    };
    let org = args.org.clone().unwrap_or_else(|| settings.organization.clone());

    let mut policy = settings.policy();
    if let Some(threshold) = args.fork_threshold {
        policy.fork_threshold = threshold;
    }
    policy.denylist.extend(args.deny.iter().cloned());

    let outcome = collect(source.as_ref(), &org, &settings.maintainers_path, &policy)?;

    if args.verbose {
        print_summary(&outcome, &policy);
    }

    match report::render(args.details, &outcome.accepted) {
        Rendered::Lines(lines) => {
            let mut stdout = std::io::stdout().lock();
            for line in lines {
                writeln!(stdout, "{line}")?;
            }
        }
        Rendered::Rows(rows) => {
            let path = args
                .output
                .unwrap_or_else(|| PathBuf::from(report::lists_filename(&Local::now())));
            store::write_atomic(&path, &report::to_csv(&rows))?;
            println!("Wrote {} rows to {}", rows.len(), path.display());
        }
    }

    Ok(())
}

/// List the organization and run the filter pipeline over it
pub fn collect(
    source: &dyn RepoSource,
    org: &str,
    maintainers_path: &str,
    policy: &FilterPolicy,
) -> Result<FilterOutcome> {
    info!("Collecting {} from {}", maintainers_path, org);
    let repos = source
        .list_repositories(org)
        .with_context(|| format!("Failed to list repositories in {org}"))?;

    filter_candidates(&repos, policy, |name: &str| {
        source.fetch_file(org, name, maintainers_path)
    })
    .with_context(|| format!("Failed to fetch {maintainers_path}"))
}

fn print_summary(outcome: &FilterOutcome, policy: &FilterPolicy) {
    let ex = &outcome.exclusions;
    eprintln!(
        "Skipped {} repos with fewer than {} forks",
        ex.bucket(Exclusion::LowForkCount).len(),
        policy.fork_threshold
    );
    eprintln!("Skipped {} denylisted repos", ex.bucket(Exclusion::Denylisted).len());
    eprintln!(
        "Skipped {} repos without a MAINTAINERS file",
        ex.bucket(Exclusion::MissingFile).len()
    );
    eprintln!(
        "Skipped {} repos with an unrecognized MAINTAINERS format",
        ex.bucket(Exclusion::UnrecognizedFormat).len()
    );
    for name in ex.bucket(Exclusion::UnrecognizedFormat) {
        eprintln!("  {name}");
    }
    eprintln!("Found {} repos with MAINTAINERS files", outcome.accepted.len());
}
