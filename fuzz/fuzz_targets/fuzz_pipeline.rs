// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
#![no_main]

use libfuzzer_sys::fuzz_target;
use maintainers::pipeline::{filter_candidates, FilterPolicy};
use maintainers::source::RepoSummary;

fuzz_target!(|data: &[u8]| {
    let repos = vec![RepoSummary::new("fuzzed", 10)];
    let outcome = filter_candidates(&repos, &FilterPolicy::default(), |_: &str| Ok(data.to_vec()))
        .expect("only NotFound-free fetches are fed in");
    assert_eq!(outcome.accepted.len() + outcome.exclusions.total(), 1);
});
