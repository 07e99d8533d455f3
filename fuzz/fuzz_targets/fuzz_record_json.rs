// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
#![no_main]

use libfuzzer_sys::fuzz_target;
use maintainers::schema;
use maintainers::types::MaintainerRecord;

fuzz_target!(|data: &[u8]| {
    // The gate and the decoder must reject garbage without panicking. They can
    // disagree (`"version": 1.0` passes the schema but not the decoder), which
    // the pipeline treats as unrecognized.
    let _ = schema::validate(data, true);
    let _: Result<MaintainerRecord, _> = serde_json::from_slice(data);
});
