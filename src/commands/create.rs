// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Create command - writes a new MAINTAINERS file

use crate::store;
use crate::types::MaintainerRecord;
use anyhow::{bail, Result};
use std::path::Path;

/// Arguments for create
#[derive(Debug, Default)]
pub struct CreateArgs {
    /// Where to file issues
    pub issues: String,
    /// Organizational list for the lists export
    pub internal_list: Option<String>,
    /// Flag the repository as unmaintained
    pub unmaintained: bool,
    /// Overwrite an existing file
    pub force: bool,
}

/// Run the create command
pub fn run(path: &Path, args: CreateArgs) -> Result<()> {
    if path.exists() && !args.force {
        bail!("{} already exists (use --force to overwrite)", path.display());
    }

    let mut record = MaintainerRecord::new(args.issues);
    record.internal_list = args.internal_list;
    if args.unmaintained {
        record.maintained = Some(false);
    }

    store::save(path, &record)?;
    println!("Created {}", path.display());
    Ok(())
}
