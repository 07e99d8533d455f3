// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Configuration management
//!
//! Settings are layered: built-in defaults, then an optional TOML file, then
//! `MAINTAINERS_*` environment variables.

use crate::pipeline::{FilterPolicy, DEFAULT_FORK_THRESHOLD};
use anyhow::{Context, Result};
use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Prefix for environment overrides, e.g. `MAINTAINERS_FORK_THRESHOLD`
pub const ENV_PREFIX: &str = "MAINTAINERS";

/// Repositories known not to be products, skipped by reports
pub const DEFAULT_DENYLIST: &[&str] = &[
    "puppetlabs.github.io",
    "community",
    "docs-archive",
    "maintainers",
    "modulesync_configs",
];

/// Application configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Forge organization reported on
    pub organization: String,
    /// Repositories with fewer forks are skipped
    pub fork_threshold: u64,
    /// Repository names always skipped
    pub denylist: Vec<String>,
    /// Path of the maintainers file inside each repository
    pub maintainers_path: String,
    /// Base URL of the GitHub API
    pub api_url: String,
    /// Environment variable holding the API token
    pub token_env: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            organization: "puppetlabs".to_string(),
            fork_threshold: DEFAULT_FORK_THRESHOLD,
            denylist: DEFAULT_DENYLIST.iter().map(ToString::to_string).collect(),
            maintainers_path: "MAINTAINERS".to_string(),
            api_url: "https://api.github.com".to_string(),
            token_env: "GITHUB_TOKEN".to_string(),
        }
    }
}

impl Settings {
    /// Filter policy derived from these settings
    #[must_use]
    pub fn policy(&self) -> FilterPolicy {
        FilterPolicy {
            fork_threshold: self.fork_threshold,
            denylist: self.denylist.clone(),
        }
    }

    /// Render as TOML
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize settings")
    }
}

/// Default location of the configuration file
#[must_use]
pub fn default_path() -> Option<PathBuf> {
    directories::ProjectDirs::from("com", "hyperpolymath", "maintainers")
        .map(|d| d.config_dir().join("config.toml"))
}

/// Load configuration from an explicit file, the default file, or defaults
pub fn load(path: Option<&Path>) -> Result<Settings> {
    let defaults = Config::try_from(&Settings::default()).context("Invalid default settings")?;
    let mut builder = Config::builder().add_source(defaults);

    match path {
        Some(p) => {
            builder = builder.add_source(File::from(p).format(FileFormat::Toml).required(true));
        }
        None => {
            if let Some(p) = default_path() {
                builder =
                    builder.add_source(File::from(p).format(FileFormat::Toml).required(false));
            }
        }
    }

    builder = builder.add_source(
        Environment::with_prefix(ENV_PREFIX)
            .try_parsing(true)
            .list_separator(",")
            .with_list_parse_key("denylist"),
    );

    let settings = builder
        .build()
        .context("Failed to read configuration")?
        .try_deserialize()
        .context("Invalid configuration")?;
    tracing::trace!("Loaded settings: {:?}", settings);
    Ok(settings)
}
