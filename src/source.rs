// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Repository sources - list an organization's repositories and fetch files
//!
//! [`GitHubSource`] talks to the GitHub REST API. [`MirrorSource`] reads an
//! on-disk copy of an organization, used for offline runs and tests.

use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, USER_AGENT};
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, trace};

/// Repositories requested per listing page
const PER_PAGE: usize = 100;

/// A repository as listed by a source
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepoSummary {
    /// Repository name (without owner)
    pub name: String,
    /// Number of forks
    #[serde(rename = "forks_count", default)]
    pub forks: u64,
}

impl RepoSummary {
    /// Convenience constructor
    #[must_use]
    pub fn new(name: impl Into<String>, forks: u64) -> Self {
        Self {
            name: name.into(),
            forks,
        }
    }
}

/// Errors from a repository source
#[derive(Debug, Error)]
pub enum FetchError {
    /// The requested file does not exist in the repository
    #[error("{path} not found in {repo}")]
    NotFound {
        /// Repository name
        repo: String,
        /// File path within the repository
        path: String,
    },
    /// The forge answered with an unexpected status
    #[error("{url} returned {status}")]
    Status {
        /// Request URL
        url: String,
        /// HTTP status code
        status: u16,
    },
    /// The request could not be completed
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    /// A mirror file could not be read
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        /// Path that failed
        path: PathBuf,
        /// Underlying error
        #[source]
        source: io::Error,
    },
    /// A repository listing could not be decoded
    #[error("malformed repository listing: {0}")]
    Decode(#[from] serde_json::Error),
}

impl FetchError {
    /// Whether this is the expected "file absent" case
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// Something that can enumerate an organization and read files from it
pub trait RepoSource {
    /// List every repository in the organization
    fn list_repositories(&self, org: &str) -> Result<Vec<RepoSummary>, FetchError>;

    /// Fetch the raw content of `path` in `repo`
    fn fetch_file(&self, org: &str, repo: &str, path: &str) -> Result<Vec<u8>, FetchError>;
}

// =============================================================================
// GitHub
// =============================================================================

/// GitHub REST API source
pub struct GitHubSource {
    client: Client,
    api_url: String,
}

impl GitHubSource {
    /// Build a client against `api_url`, authenticating when a token is given
    pub fn new(api_url: impl Into<String>, token: Option<&str>) -> Result<Self, FetchError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            USER_AGENT,
            HeaderValue::from_static(concat!("maintainers/", env!("CARGO_PKG_VERSION"))),
        );
        headers.insert(
            "X-GitHub-Api-Version",
            HeaderValue::from_static("2022-11-28"),
        );
        if let Some(token) = token {
            // Tokens with non-visible characters cannot be sent; fall back to anonymous.
            if let Ok(mut value) = HeaderValue::from_str(&format!("Bearer {token}")) {
                value.set_sensitive(true);
                headers.insert(AUTHORIZATION, value);
            }
        }

        let client = Client::builder().default_headers(headers).build()?;
        Ok(Self {
            client,
            api_url: api_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Build a client reading the token from the named environment variable
    pub fn from_env(api_url: impl Into<String>, token_env: &str) -> Result<Self, FetchError> {
        let token = std::env::var(token_env).ok().filter(|t| !t.is_empty());
        if token.is_none() {
            debug!("{} not set, using unauthenticated GitHub access", token_env);
        }
        Self::new(api_url, token.as_deref())
    }

    fn list_page(&self, org: &str, page: usize) -> Result<Vec<RepoSummary>, FetchError> {
        let url = format!(
            "{}/orgs/{}/repos?per_page={}&page={}",
            self.api_url, org, PER_PAGE, page
        );
        trace!("GET {}", url);
        let resp = self
            .client
            .get(&url)
            .header(ACCEPT, "application/vnd.github+json")
            .send()?;
        if !resp.status().is_success() {
            return Err(FetchError::Status {
                url,
                status: resp.status().as_u16(),
            });
        }
        let body = resp.bytes()?;
        Ok(serde_json::from_slice(&body)?)
    }
}

impl RepoSource for GitHubSource {
    fn list_repositories(&self, org: &str) -> Result<Vec<RepoSummary>, FetchError> {
        let mut repos = Vec::new();
        let mut page = 1;
        loop {
            let batch = self.list_page(org, page)?;
            let len = batch.len();
            repos.extend(batch);
            if len < PER_PAGE {
                break;
            }
            page += 1;
        }
        debug!("Listed {} repositories in {}", repos.len(), org);
        Ok(repos)
    }

    fn fetch_file(&self, org: &str, repo: &str, path: &str) -> Result<Vec<u8>, FetchError> {
        let url = format!("{}/repos/{}/{}/contents/{}", self.api_url, org, repo, path);
        trace!("GET {}", url);
        let resp = self
            .client
            .get(&url)
            .header(ACCEPT, "application/vnd.github.raw+json")
            .send()?;
        match resp.status() {
            StatusCode::NOT_FOUND => Err(FetchError::NotFound {
                repo: repo.to_string(),
                path: path.to_string(),
            }),
            status if status.is_success() => Ok(resp.bytes()?.to_vec()),
            status => Err(FetchError::Status {
                url,
                status: status.as_u16(),
            }),
        }
    }
}

// =============================================================================
// On-disk mirror
// =============================================================================

/// Name of the listing file at the root of a mirror
pub const MIRROR_LISTING: &str = "repos.json";

/// An organization mirrored on disk.
///
/// `<root>/repos.json` holds `[{"name": ..., "forks_count": ...}]` and each
/// repository's files live under `<root>/<name>/`. The organization argument
/// is ignored.
pub struct MirrorSource {
    root: PathBuf,
}

impl MirrorSource {
    /// Mirror rooted at `root`
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Root directory of the mirror
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl RepoSource for MirrorSource {
    fn list_repositories(&self, _org: &str) -> Result<Vec<RepoSummary>, FetchError> {
        let path = self.root.join(MIRROR_LISTING);
        let content = fs::read(&path).map_err(|source| FetchError::Io {
            path: path.clone(),
            source,
        })?;
        Ok(serde_json::from_slice(&content)?)
    }

    fn fetch_file(&self, _org: &str, repo: &str, path: &str) -> Result<Vec<u8>, FetchError> {
        let file = self.root.join(repo).join(path);
        match fs::read(&file) {
            Ok(content) => Ok(content),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Err(FetchError::NotFound {
                repo: repo.to_string(),
                path: path.to_string(),
            }),
            Err(source) => Err(FetchError::Io { path: file, source }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_repo_summary_reads_github_fields() {
        let json = r#"[{"name": "puppet", "forks_count": 2200, "private": false}]"#;
        let repos: Vec<RepoSummary> = serde_json::from_str(json).unwrap();
        assert_eq!(repos, vec![RepoSummary::new("puppet", 2200)]);
    }

    #[test]
    fn test_mirror_lists_and_fetches() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join(MIRROR_LISTING),
            r#"[{"name": "alpha", "forks_count": 7}]"#,
        )
        .unwrap();
        fs::create_dir(dir.path().join("alpha")).unwrap();
        fs::write(dir.path().join("alpha/MAINTAINERS"), "{}").unwrap();

        let source = MirrorSource::new(dir.path());
        let repos = source.list_repositories("any").unwrap();
        assert_eq!(repos, vec![RepoSummary::new("alpha", 7)]);
        assert_eq!(source.fetch_file("any", "alpha", "MAINTAINERS").unwrap(), b"{}");
    }

    #[test]
    fn test_mirror_missing_file_is_not_found() {
        let dir = TempDir::new().unwrap();
        let source = MirrorSource::new(dir.path());
        let err = source.fetch_file("any", "ghost", "MAINTAINERS").unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_mirror_missing_listing_is_fatal() {
        let dir = TempDir::new().unwrap();
        let source = MirrorSource::new(dir.path());
        let err = source.list_repositories("any").unwrap_err();
        assert!(matches!(err, FetchError::Io { .. }));
    }

    #[test]
    fn test_github_source_builds_without_token() {
        assert!(GitHubSource::new("https://api.github.com/", None).is_ok());
    }
}
