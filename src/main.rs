// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//
//! Maintainers CLI - declare repository maintainers and report coverage

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use maintainers::commands;
use maintainers::commands::create::CreateArgs;
use maintainers::commands::report::ReportArgs;
use maintainers::report::Details;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "maintainers")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Increase verbosity (-v, -vv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Quiet mode (suppress non-error output)
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Configuration file path
    #[arg(short, long, global = true, env = "MAINTAINERS_CONFIG")]
    config: Option<PathBuf>,

    /// MAINTAINERS file to operate on
    #[arg(short, long, global = true, env = "MAINTAINERS_FILE", default_value = "MAINTAINERS")]
    file: PathBuf,

    /// Disable colored output
    #[arg(long, global = true, env = "NO_COLOR")]
    no_color: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a new MAINTAINERS file
    Create {
        /// Where to file issues (URL or free text)
        #[arg(short, long)]
        issues: String,

        /// Organizational list the maintainers belong to
        #[arg(long)]
        internal_list: Option<String>,

        /// Flag the repository as unmaintained
        #[arg(long)]
        unmaintained: bool,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Add a maintainer, or fill in missing details of an existing one
    Add {
        /// GitHub handle
        #[arg(short, long)]
        github: String,

        /// Email address
        #[arg(short, long)]
        email: Option<String>,

        /// Real name
        #[arg(short, long)]
        name: Option<String>,
    },

    /// Remove a maintainer
    Remove {
        /// GitHub handle
        #[arg(short, long)]
        github: String,
    },

    /// List maintainers
    List,

    /// Validate the MAINTAINERS file against the schema
    Validate,

    /// Report on MAINTAINERS files across an organization
    Report {
        /// Level of detail
        #[arg(short, long, value_enum, default_value_t = Details::None)]
        details: Details,

        /// Organization to report on
        #[arg(long)]
        org: Option<String>,

        /// Skip repositories with fewer forks
        #[arg(long)]
        fork_threshold: Option<u64>,

        /// Additional repositories to skip
        #[arg(long = "deny", value_name = "REPO")]
        deny: Vec<String>,

        /// Read from an on-disk organization mirror instead of GitHub
        #[arg(long, value_name = "DIR")]
        mirror: Option<PathBuf>,

        /// Output file for the lists export
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show configuration
    Config {
        /// Configuration key (omit to show all)
        key: Option<String>,
    },

    /// Generate shell completions
    Completions {
        /// Shell type (bash, zsh, fish, powershell)
        shell: clap_complete::Shell,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = match cli.verbose {
        0 if cli.quiet => tracing::Level::ERROR,
        0 => tracing::Level::INFO,
        1 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("maintainers={log_level}")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    if cli.no_color {
        owo_colors::set_override(false);
    }

    let settings = maintainers::config::load(cli.config.as_deref())?;
    let file = cli.file;

    // Execute command
    match cli.command {
        Commands::Create { issues, internal_list, unmaintained, force } => {
            commands::create::run(&file, CreateArgs { issues, internal_list, unmaintained, force })
        }
        Commands::Add { github, email, name } => {
            commands::add::run(&file, github, email, name)
        }
        Commands::Remove { github } => {
            commands::remove::run(&file, &github)
        }
        Commands::List => {
            commands::list::run(&file)
        }
        Commands::Validate => {
            commands::validate::run(&file)
        }
        Commands::Report { details, org, fork_threshold, deny, mirror, output } => {
            commands::report::run(&settings, ReportArgs {
                details,
                org,
                fork_threshold,
                deny,
                mirror,
                output,
                verbose: cli.verbose > 0,
            })
        }
        Commands::Config { key } => {
            commands::config::run(&settings, key.as_deref())
        }
        Commands::Completions { shell } => {
            commands::completions::run(shell, &mut Cli::command())
        }
    }
}
