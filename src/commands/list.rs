// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! List command - prints the maintainers of one file

use crate::report::UNMAINTAINED;
use crate::store;
use crate::types::{MaintainerRecord, Person};
use anyhow::{Context, Result};
use std::path::Path;

/// Run the list command
pub fn run(path: &Path) -> Result<()> {
    let record = store::load(path)
        .with_context(|| format!("Failed to load {}", path.display()))?;

    for line in lines(&record) {
        println!("{line}");
    }
    Ok(())
}

/// Lines printed for a record
#[must_use]
pub fn lines(record: &MaintainerRecord) -> Vec<String> {
    let mut out = Vec::with_capacity(record.people.len() + 1);
    if record.is_unmaintained() {
        out.push(UNMAINTAINED.to_string());
    }
    out.extend(record.people.iter().map(person_line));
    out
}

fn person_line(person: &Person) -> String {
    let mut line = person.github.clone();
    if let Some(name) = &person.name {
        line.push_str(" - ");
        line.push_str(name);
    }
    if let Some(email) = &person.email {
        line.push_str(&format!(" <{email}>"));
    }
    line
}
