// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Report projections over the accepted records
//!
//! Every projection iterates repositories in ascending name order (the
//! order of the accepted map) and people in declaration order.

use crate::index::{build_people_index, PeopleIndex};
use crate::types::MaintainerRecord;
use chrono::{DateTime, TimeZone};
use clap::ValueEnum;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt::Display;

/// Marker for repositories flagged `"maintained": false`
pub const UNMAINTAINED: &str = "(unmaintained)";

/// Header row of the lists export
pub const LIST_HEADER: [&str; 3] = ["repo", "repo_group", "maintainer"];

const INDENT: &str = "  ";

/// Which projection to render
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum Details {
    /// One line per repository
    #[default]
    None,
    /// Repositories with their maintainers
    Repo,
    /// Maintainers with their repositories
    People,
    /// CSV export grouped by internal list
    Lists,
}

/// One row of the lists export
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListRow {
    /// Repository name
    pub repo: String,
    /// The record's internal list
    pub repo_group: String,
    /// Email, name or handle of the maintainer
    pub maintainer: String,
}

/// A rendered report
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rendered {
    /// Plain text lines for stdout
    Lines(Vec<String>),
    /// Rows for the CSV export
    Rows(Vec<ListRow>),
}

/// Render the projection selected by `details`
#[must_use]
pub fn render(details: Details, accepted: &BTreeMap<String, MaintainerRecord>) -> Rendered {
    match details {
        Details::None => Rendered::Lines(render_basic(accepted)),
        Details::Repo => Rendered::Lines(render_repos(accepted)),
        Details::People => Rendered::Lines(render_people(&build_people_index(accepted))),
        Details::Lists => Rendered::Rows(list_rows(accepted)),
    }
}

/// Repository names, marking unmaintained ones
#[must_use]
pub fn render_basic(accepted: &BTreeMap<String, MaintainerRecord>) -> Vec<String> {
    accepted
        .iter()
        .map(|(repo, record)| {
            if record.is_unmaintained() {
                format!("{repo} {UNMAINTAINED}")
            } else {
                repo.clone()
            }
        })
        .collect()
}

/// Repository names followed by their maintainers
#[must_use]
pub fn render_repos(accepted: &BTreeMap<String, MaintainerRecord>) -> Vec<String> {
    let mut lines = Vec::new();
    for (repo, record) in accepted {
        lines.push(repo.clone());
        if record.is_unmaintained() {
            lines.push(format!("{INDENT}{UNMAINTAINED}"));
        }
        for person in &record.people {
            lines.push(format!("{INDENT}{}", person.display_name()));
        }
    }
    lines
}

/// Maintainers followed by the repositories they maintain
#[must_use]
pub fn render_people(index: &PeopleIndex) -> Vec<String> {
    let mut lines = Vec::new();
    for (github, entry) in index {
        lines.push(entry.name.clone().unwrap_or_else(|| github.clone()));
        for repo in &entry.repos {
            lines.push(format!("{INDENT}{repo}"));
        }
    }
    lines
}

/// Rows for every person of every record with an internal list
#[must_use]
pub fn list_rows(accepted: &BTreeMap<String, MaintainerRecord>) -> Vec<ListRow> {
    accepted
        .iter()
        .filter_map(|(repo, record)| record.list_name().map(|list| (repo, list, record)))
        .flat_map(|(repo, list, record)| {
            record.people.iter().map(move |person| ListRow {
                repo: repo.clone(),
                repo_group: list.to_string(),
                maintainer: person.contact().to_string(),
            })
        })
        .collect()
}

/// Serialize rows as CSV, header first
#[must_use]
pub fn to_csv(rows: &[ListRow]) -> String {
    let mut out = String::new();
    push_csv_line(&mut out, &LIST_HEADER);
    for row in rows {
        push_csv_line(
            &mut out,
            &[row.repo.as_str(), row.repo_group.as_str(), row.maintainer.as_str()],
        );
    }
    out
}

fn push_csv_line(out: &mut String, fields: &[&str]) {
    let line: Vec<String> = fields.iter().map(|f| csv_field(f)).collect();
    out.push_str(&line.join(","));
    out.push('\n');
}

fn csv_field(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

/// File name for a lists export generated at `at`
#[must_use]
pub fn lists_filename<Tz>(at: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    format!("maintainers-lists-{}.csv", at.format("%Y%m%dT%H%M%S"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Person;
    use chrono::Utc;

    fn record(people: Vec<Person>) -> MaintainerRecord {
        let mut r = MaintainerRecord::new("issues");
        r.people = people;
        r
    }

    fn sample() -> BTreeMap<String, MaintainerRecord> {
        let mut old = record(vec![Person::new("carol")]);
        old.maintained = Some(false);
        BTreeMap::from([
            (
                "puppet".to_string(),
                record(vec![Person::new("alice").with_name("Alice"), Person::new("bob")]),
            ),
            ("facter".to_string(), old),
        ])
    }

    #[test]
    fn test_basic_marks_unmaintained() {
        assert_eq!(render_basic(&sample()), vec!["facter (unmaintained)", "puppet"]);
    }

    #[test]
    fn test_repo_detail_lines() {
        assert_eq!(
            render_repos(&sample()),
            vec!["facter", "  (unmaintained)", "  carol", "puppet", "  Alice", "  bob"]
        );
    }

    #[test]
    fn test_people_detail_lines() {
        let lines = render_people(&build_people_index(&sample()));
        assert_eq!(lines, vec!["Alice", "  puppet", "bob", "  puppet", "carol", "  facter"]);
    }

    #[test]
    fn test_lists_only_records_with_internal_list() {
        let mut with_list = record(vec![Person::new("x").with_email("x@y.com")]);
        with_list.internal_list = Some("core".into());
        let accepted = BTreeMap::from([
            ("repoA".to_string(), with_list),
            ("repoB".to_string(), record(vec![Person::new("z")])),
        ]);

        assert_eq!(
            list_rows(&accepted),
            vec![ListRow {
                repo: "repoA".into(),
                repo_group: "core".into(),
                maintainer: "x@y.com".into(),
            }]
        );
    }

    #[test]
    fn test_lists_contact_priority_and_order() {
        let mut rec = record(vec![
            Person::new("h1"),
            Person::new("h2").with_name("Two"),
            Person::new("h3").with_name("Three").with_email("three@example.com"),
        ]);
        rec.internal_list = Some("ops".into());
        let accepted = BTreeMap::from([("r".to_string(), rec)]);

        let maintainers: Vec<_> = list_rows(&accepted).into_iter().map(|r| r.maintainer).collect();

        assert_eq!(maintainers, vec!["h1", "Two", "three@example.com"]);
    }

    #[test]
    fn test_empty_internal_list_is_skipped() {
        let mut rec = record(vec![Person::new("x")]);
        rec.internal_list = Some(String::new());
        assert!(list_rows(&BTreeMap::from([("r".to_string(), rec)])).is_empty());
    }

    #[test]
    fn test_csv_header_and_quoting() {
        let rows = vec![ListRow {
            repo: "r".into(),
            repo_group: "a,b".into(),
            maintainer: "Say \"hi\"".into(),
        }];
        assert_eq!(
            to_csv(&rows),
            "repo,repo_group,maintainer\nr,\"a,b\",\"Say \"\"hi\"\"\"\n"
        );
    }

    #[test]
    fn test_render_dispatch() {
        assert!(matches!(render(Details::Lists, &sample()), Rendered::Rows(rows) if rows.is_empty()));
        assert!(matches!(render(Details::None, &sample()), Rendered::Lines(lines) if lines.len() == 2));
    }

    #[test]
    fn test_lists_filename_embeds_timestamp() {
        let at = Utc.with_ymd_and_hms(2024, 3, 9, 14, 5, 7).unwrap();
        assert_eq!(lists_filename(&at), "maintainers-lists-20240309T140507.csv");
    }
}
