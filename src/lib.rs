// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//
//! Maintainers library - declare who maintains a repository and audit
//! maintenance coverage across a forge organization
//!
//! A `MAINTAINERS` file is a small JSON record validated against a fixed
//! schema. The report engine fetches those records from every repository in
//! an organization, filters them through an ordered pipeline and renders one
//! of several projections.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod commands;
pub mod config;
pub mod index;
pub mod pipeline;
pub mod report;
pub mod schema;
pub mod source;
pub mod store;

/// Core data types for MAINTAINERS records
pub mod types {
    use serde::{Deserialize, Serialize};

    /// Current record schema version
    pub const RECORD_VERSION: u32 = 1;

    /// Informational `file_format` string written into new records
    pub const FILE_FORMAT: &str =
        "This MAINTAINERS file format is described at http://pup.pt/maintainers";

    // =========================================================================
    // Person
    // =========================================================================

    /// One maintainer entry within a record
    #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
    pub struct Person {
        /// GitHub handle, the key of a person within a record
        pub github: String,
        /// Contact email
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub email: Option<String>,
        /// Display name
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub name: Option<String>,
    }

    impl Person {
        /// Create a person with only a GitHub handle
        #[must_use]
        pub fn new(github: impl Into<String>) -> Self {
            Self {
                github: github.into(),
                email: None,
                name: None,
            }
        }

        /// Set the email
        #[must_use]
        pub fn with_email(mut self, email: impl Into<String>) -> Self {
            self.email = Some(email.into());
            self
        }

        /// Set the display name
        #[must_use]
        pub fn with_name(mut self, name: impl Into<String>) -> Self {
            self.name = Some(name.into());
            self
        }

        /// Merge an incoming partial entry into an existing one.
        ///
        /// The existing entry is layered on top of the incoming one: fields
        /// already set on `existing` are kept, `incoming` only fills gaps.
        #[must_use]
        pub fn merge(existing: &Self, incoming: &Self) -> Self {
            Self {
                github: existing.github.clone(),
                email: existing.email.clone().or_else(|| incoming.email.clone()),
                name: existing.name.clone().or_else(|| incoming.name.clone()),
            }
        }

        /// Name if present, otherwise the GitHub handle
        #[must_use]
        pub fn display_name(&self) -> &str {
            self.name.as_deref().unwrap_or(&self.github)
        }

        /// Contact used by the lists export: email, then name, then handle
        #[must_use]
        pub fn contact(&self) -> &str {
            self.email
                .as_deref()
                .or(self.name.as_deref())
                .unwrap_or(&self.github)
        }
    }

    // =========================================================================
    // MaintainerRecord
    // =========================================================================

    /// Result of adding a person to a record
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum AddOutcome {
        /// The handle was new and has been appended
        Added,
        /// The handle existed and the entries were merged
        Merged,
    }

    /// One repository's maintainer declaration
    #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
    pub struct MaintainerRecord {
        /// Schema version, always 1
        pub version: u32,
        /// Informational pointer to the format documentation
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub file_format: Option<String>,
        /// Where to file issues (URL or free text)
        pub issues: String,
        /// `Some(false)` flags the repository as unmaintained
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub maintained: Option<bool>,
        /// Organizational list used by the lists export
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub internal_list: Option<String>,
        /// Maintainers, in declaration order
        #[serde(default)]
        pub people: Vec<Person>,
    }

    impl MaintainerRecord {
        /// Create an empty record pointing at an issue tracker
        #[must_use]
        pub fn new(issues: impl Into<String>) -> Self {
            Self {
                version: RECORD_VERSION,
                file_format: Some(FILE_FORMAT.to_string()),
                issues: issues.into(),
                maintained: None,
                internal_list: None,
                people: Vec::new(),
            }
        }

        /// Whether the record is explicitly marked unmaintained
        #[must_use]
        pub fn is_unmaintained(&self) -> bool {
            self.maintained == Some(false)
        }

        /// The internal list name, if set and non-empty
        #[must_use]
        pub fn list_name(&self) -> Option<&str> {
            self.internal_list.as_deref().filter(|l| !l.is_empty())
        }

        /// Add a person, merging with an existing entry of the same handle
        pub fn add_person(&mut self, incoming: Person) -> AddOutcome {
            match self.people.iter_mut().find(|p| p.github == incoming.github) {
                Some(existing) => {
                    *existing = Person::merge(existing, &incoming);
                    AddOutcome::Merged
                }
                None => {
                    self.people.push(incoming);
                    AddOutcome::Added
                }
            }
        }

        /// Remove the first person with this handle, returning it
        pub fn remove_person(&mut self, github: &str) -> Option<Person> {
            let pos = self.people.iter().position(|p| p.github == github)?;
            Some(self.people.remove(pos))
        }
    }

}
