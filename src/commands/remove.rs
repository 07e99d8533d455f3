// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Remove command - drops a maintainer

use crate::store;
use anyhow::{Context, Result};
use std::path::Path;

/// Run the remove command
pub fn run(path: &Path, github: &str) -> Result<()> {
    let mut record = store::load(path)
        .with_context(|| format!("Failed to load {}", path.display()))?;

    if record.remove_person(github).is_some() {
        store::save(path, &record)?;
        println!("Removed {github}");
    } else {
        println!("{github} is not listed in {}", path.display());
    }
    Ok(())
}
