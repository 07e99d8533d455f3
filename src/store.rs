// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Reading and writing a local MAINTAINERS file
//!
//! Every write passes through the validation gate and replaces the file in
//! one rename, so a rejected or interrupted write leaves the old file intact.

use crate::schema;
use crate::types::MaintainerRecord;
use anyhow::{bail, Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Load and validate a record
pub fn load(path: &Path) -> Result<MaintainerRecord> {
    let content =
        fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
    schema::check(&content).with_context(|| format!("{} is not valid", path.display()))?;
    serde_json::from_slice(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))
}

/// Serialize a record the way it is stored on disk
pub fn to_document(record: &MaintainerRecord) -> Result<String> {
    let mut json =
        serde_json::to_string_pretty(record).context("Failed to serialize MAINTAINERS")?;
    json.push('\n');
    Ok(json)
}

/// Validate and atomically write a record
pub fn save(path: &Path, record: &MaintainerRecord) -> Result<()> {
    let document = to_document(record)?;
    if !schema::validate(&document, false) {
        bail!("Refusing to write invalid MAINTAINERS to {}", path.display());
    }

    write_atomic(path, &document)?;
    tracing::debug!("Wrote {}", path.display());
    Ok(())
}

/// Write arbitrary content through the same temp-then-rename path
pub fn write_atomic(path: &Path, content: &str) -> Result<()> {
    let tmp = temp_path(path);
    fs::write(&tmp, content).with_context(|| format!("Failed to write {}", tmp.display()))?;
    if let Err(e) = fs::rename(&tmp, path) {
        let _ = fs::remove_file(&tmp);
        return Err(e).with_context(|| format!("Failed to replace {}", path.display()));
    }
    Ok(())
}

fn temp_path(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map_or_else(|| "MAINTAINERS".into(), |n| n.to_string_lossy().into_owned());
    path.with_file_name(format!(".{name}.tmp"))
}
