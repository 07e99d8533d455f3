// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Validate command - checks a MAINTAINERS file against the schema

use crate::schema;
use anyhow::{bail, Context, Result};
use std::fs;
use std::path::Path;

/// Run the validate command
pub fn run(path: &Path) -> Result<()> {
    let content =
        fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;

    if !schema::validate(&content, false) {
        bail!("{} failed validation", path.display());
    }
    println!("{} is valid", path.display());
    Ok(())
}
