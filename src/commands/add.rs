// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Add command - adds or updates a maintainer

use crate::store;
use crate::types::{AddOutcome, Person};
use anyhow::{Context, Result};
use std::path::Path;

/// Run the add command
pub fn run(path: &Path, github: String, email: Option<String>, name: Option<String>) -> Result<()> {
    let mut record = store::load(path)
        .with_context(|| format!("Failed to load {}", path.display()))?;

    let incoming = Person { github, email, name };
    let handle = incoming.github.clone();
    let outcome = record.add_person(incoming);

    store::save(path, &record)?;

    match outcome {
        AddOutcome::Added => println!("Added {handle}"),
        AddOutcome::Merged => println!("Updated {handle}"),
    }
    Ok(())
}
