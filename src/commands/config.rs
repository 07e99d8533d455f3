// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell

use crate::config::Settings;
use anyhow::{anyhow, Result};

/// Print the effective settings, or a single key
pub fn run(settings: &Settings, key: Option<&str>) -> Result<()> {
    match key {
        None => print!("{}", settings.to_toml()?),
        Some(key) => {
            let value = serde_json::to_value(settings)?;
            let field = value
                .get(key)
                .ok_or_else(|| anyhow!("Unknown configuration key: {}", key))?;
            match field {
                serde_json::Value::String(s) => println!("{s}"),
                serde_json::Value::Array(items) => {
                    for item in items {
                        println!("{}", item.as_str().unwrap_or_default());
                    }
                }
                other => println!("{other}"),
            }
        }
    }
    Ok(())
}
