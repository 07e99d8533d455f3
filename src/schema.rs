// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Validation gate for MAINTAINERS documents
//!
//! Wraps a JSON Schema validator compiled once from the embedded schema.
//! [`validate`] is the boolean predicate used by the report pipeline;
//! [`check`] returns the reason for callers that need it.

use jsonschema::Validator;
use owo_colors::{OwoColorize, Stream};
use serde_json::Value;
use std::sync::OnceLock;
use thiserror::Error;

/// The maintainers JSON Schema (draft 7)
pub const MAINTAINERS_SCHEMA: &str = include_str!("../schema/maintainers.json");

/// Characters of the offending document echoed in diagnostics
const FRAGMENT_LEN: usize = 200;

/// Why a document was rejected
#[derive(Debug, Error)]
pub enum SchemaError {
    /// The document is not JSON
    #[error("not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    /// The document is JSON but does not match the schema
    #[error("does not match the maintainers schema: {0}")]
    Invalid(String),
    /// The embedded schema itself failed to compile
    #[error("maintainers schema failed to compile: {0}")]
    Schema(String),
}

static VALIDATOR: OnceLock<Result<Validator, String>> = OnceLock::new();

fn validator() -> Result<&'static Validator, SchemaError> {
    VALIDATOR
        .get_or_init(|| {
            let schema: Value =
                serde_json::from_str(MAINTAINERS_SCHEMA).map_err(|e| e.to_string())?;
            jsonschema::draft7::new(&schema).map_err(|e| e.to_string())
        })
        .as_ref()
        .map_err(|e| SchemaError::Schema(e.clone()))
}

/// Check a document against the maintainers schema
pub fn check(document: impl AsRef<[u8]>) -> Result<(), SchemaError> {
    let instance: Value = serde_json::from_slice(document.as_ref())?;
    validator()?
        .validate(&instance)
        .map_err(|e| SchemaError::Invalid(e.to_string()))
}

/// Boolean validation gate.
///
/// Returns `false` on parse failure or schema mismatch. Unless `quiet`, the
/// error and a fragment of the document are written to stderr.
pub fn validate(document: impl AsRef<[u8]>, quiet: bool) -> bool {
    let document = document.as_ref();
    match check(document) {
        Ok(()) => true,
        Err(err) => {
            if !quiet {
                report_failure(&err, document);
            }
            false
        }
    }
}

fn report_failure(err: &SchemaError, document: &[u8]) {
    let text = String::from_utf8_lossy(document);
    let fragment: String = text.chars().take(FRAGMENT_LEN).collect();
    eprintln!(
        "{} {}",
        "invalid MAINTAINERS:".if_supports_color(Stream::Stderr, |t| t.red()),
        err
    );
    eprintln!("{}", fragment.if_supports_color(Stream::Stderr, |t| t.dimmed()));
    if text.chars().count() > FRAGMENT_LEN {
        eprintln!("...");
    }
}
