// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! People index - which repositories each maintainer looks after

use crate::types::{MaintainerRecord, Person};
use serde::Serialize;
use std::collections::BTreeMap;

/// Aggregated view of one maintainer across repositories
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PersonEntry {
    /// Display name from the first record that mentioned this person
    pub name: Option<String>,
    /// Email from the first record that mentioned this person
    pub email: Option<String>,
    /// Repositories maintained, in ascending name order
    pub repos: Vec<String>,
}

impl PersonEntry {
    fn seed(person: &Person, repo: &str) -> Self {
        Self {
            name: person.name.clone(),
            email: person.email.clone(),
            repos: vec![repo.to_string()],
        }
    }
}

/// GitHub handle to aggregated entry, ordered by handle
pub type PeopleIndex = BTreeMap<String, PersonEntry>;

/// Build the people index from accepted records.
///
/// Records are visited in ascending repository name order. Attributes from
/// the first record that mentions a handle win; later records only append
/// their repository. A handle repeated within one record counts once.
#[must_use]
pub fn build_people_index(accepted: &BTreeMap<String, MaintainerRecord>) -> PeopleIndex {
    let mut index = PeopleIndex::new();

    for (repo, record) in accepted {
        for person in &record.people {
            match index.get_mut(&person.github) {
                None => {
                    index.insert(person.github.clone(), PersonEntry::seed(person, repo));
                }
                Some(entry) => {
                    if entry.repos.last() != Some(repo) {
                        entry.repos.push(repo.clone());
                    }
                }
            }
        }
    }

    index
}
