// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Filter pipeline - partitions an organization's repositories into the
//! accepted set and per-stage exclusion buckets
//!
//! Stages run in a fixed order and each only sees the survivors of the
//! previous one:
//!
//! 1. fork count below the threshold
//! 2. name on the denylist
//! 3. maintainers file absent
//! 4. maintainers file does not pass the validation gate

use crate::schema;
use crate::source::{FetchError, RepoSummary};
use crate::types::MaintainerRecord;
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::{debug, trace};

/// Default minimum fork count for a repository to be considered
pub const DEFAULT_FORK_THRESHOLD: u64 = 5;

/// Inputs that decide which repositories are worth fetching
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterPolicy {
    /// Repositories with fewer forks than this are skipped
    pub fork_threshold: u64,
    /// Repository names that are never considered
    pub denylist: Vec<String>,
}

impl Default for FilterPolicy {
    fn default() -> Self {
        Self {
            fork_threshold: DEFAULT_FORK_THRESHOLD,
            denylist: Vec::new(),
        }
    }
}

impl FilterPolicy {
    fn is_denied(&self, name: &str) -> bool {
        self.denylist.iter().any(|d| d == name)
    }
}

/// Pipeline stage at which a repository was dropped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Exclusion {
    /// Fewer forks than the threshold
    LowForkCount,
    /// Listed in the denylist
    Denylisted,
    /// No maintainers file
    MissingFile,
    /// Maintainers file present but not recognized
    UnrecognizedFormat,
}

impl Exclusion {
    /// All stages in pipeline order
    pub const ALL: [Self; 4] = [
        Self::LowForkCount,
        Self::Denylisted,
        Self::MissingFile,
        Self::UnrecognizedFormat,
    ];

    /// Bucket name used in diagnostics
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::LowForkCount => "lowForkCount",
            Self::Denylisted => "denylisted",
            Self::MissingFile => "missingFile",
            Self::UnrecognizedFormat => "unrecognizedFormat",
        }
    }
}

/// Repositories dropped by each stage, in evaluation order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Exclusions {
    /// Dropped for having too few forks
    pub low_fork_count: Vec<String>,
    /// Dropped by the denylist
    pub denylisted: Vec<String>,
    /// Dropped for lacking a maintainers file
    pub missing_file: Vec<String>,
    /// Dropped for failing validation
    pub unrecognized_format: Vec<String>,
}

impl Exclusions {
    /// The bucket for a stage
    #[must_use]
    pub fn bucket(&self, stage: Exclusion) -> &[String] {
        match stage {
            Exclusion::LowForkCount => &self.low_fork_count,
            Exclusion::Denylisted => &self.denylisted,
            Exclusion::MissingFile => &self.missing_file,
            Exclusion::UnrecognizedFormat => &self.unrecognized_format,
        }
    }

    fn push(&mut self, stage: Exclusion, name: &str) {
        debug!("{}: {}", stage.label(), name);
        let bucket = match stage {
            Exclusion::LowForkCount => &mut self.low_fork_count,
            Exclusion::Denylisted => &mut self.denylisted,
            Exclusion::MissingFile => &mut self.missing_file,
            Exclusion::UnrecognizedFormat => &mut self.unrecognized_format,
        };
        bucket.push(name.to_string());
    }

    /// Total number of excluded repositories
    #[must_use]
    pub fn total(&self) -> usize {
        Exclusion::ALL.iter().map(|s| self.bucket(*s).len()).sum()
    }
}

/// Result of one pipeline run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterOutcome {
    /// Records that survived every stage, keyed (and ordered) by repo name
    pub accepted: BTreeMap<String, MaintainerRecord>,
    /// Per-stage exclusions
    pub exclusions: Exclusions,
}

/// Run every filter stage over `repositories`.
///
/// `fetch` returns the raw maintainers file for a repository name. It is
/// called at most once per repository. `FetchError::NotFound` moves the
/// repository to the missing-file bucket; any other error aborts the run.
pub fn filter_candidates<F>(
    repositories: &[RepoSummary],
    policy: &FilterPolicy,
    mut fetch: F,
) -> Result<FilterOutcome, FetchError>
where
    F: FnMut(&str) -> Result<Vec<u8>, FetchError>,
{
    let mut exclusions = Exclusions::default();

    let forked: Vec<&RepoSummary> = repositories
        .iter()
        .filter(|repo| {
            let keep = repo.forks >= policy.fork_threshold;
            if !keep {
                exclusions.push(Exclusion::LowForkCount, &repo.name);
            }
            keep
        })
        .collect();

    let allowed: Vec<&RepoSummary> = forked
        .into_iter()
        .filter(|repo| {
            let keep = !policy.is_denied(&repo.name);
            if !keep {
                exclusions.push(Exclusion::Denylisted, &repo.name);
            }
            keep
        })
        .collect();

    let mut fetched: Vec<(&str, Vec<u8>)> = Vec::with_capacity(allowed.len());
    for repo in allowed {
        trace!("Fetching maintainers file for {}", repo.name);
        match fetch(&repo.name) {
            Ok(raw) => fetched.push((repo.name.as_str(), raw)),
            Err(e) if e.is_not_found() => exclusions.push(Exclusion::MissingFile, &repo.name),
            Err(e) => return Err(e),
        }
    }

    let mut accepted = BTreeMap::new();
    for (name, raw) in fetched {
        match recognize(&raw) {
            Some(record) => {
                accepted.insert(name.to_string(), record);
            }
            None => exclusions.push(Exclusion::UnrecognizedFormat, name),
        }
    }

    Ok(FilterOutcome {
        accepted,
        exclusions,
    })
}

/// Gate and decode a raw maintainers file
fn recognize(raw: &[u8]) -> Option<MaintainerRecord> {
    if !schema::validate(raw, true) {
        if let Err(e) = schema::check(raw) {
            debug!("rejected: {}", e);
        }
        return None;
    }
    match serde_json::from_slice(raw) {
        Ok(record) => Some(record),
        Err(e) => {
            debug!("validated but not decodable: {}", e);
            None
        }
    }
}
