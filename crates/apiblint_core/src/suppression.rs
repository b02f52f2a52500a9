//! Matching warnings against the ignore baseline.

use std::collections::HashSet;

use serde::Serialize;

use crate::baseline::{IgnoreBaseline, IgnoreEntry};
use crate::warning::Warning;

/// Why a warning was suppressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "by", content = "entry", rename_all = "camelCase")]
pub enum SuppressionReason {
    /// The code is ignored everywhere (`--ignore-codes`).
    GlobalCode,
    /// A baseline entry matched within the fuzz window.
    Baseline(IgnoreEntry),
}

/// Decides whether warnings should be suppressed.
///
/// An entry matches when both the start line and the end line are within
/// `fuzz_factor` lines of the recorded ones. The two bounds are checked
/// independently.
#[derive(Debug, Clone)]
pub struct SuppressionMatcher<'a> {
    baseline: &'a IgnoreBaseline,
    fuzz_factor: usize,
    global_codes: &'a HashSet<String>,
}

impl<'a> SuppressionMatcher<'a> {
    pub fn new(
        baseline: &'a IgnoreBaseline,
        fuzz_factor: usize,
        global_codes: &'a HashSet<String>,
    ) -> Self {
        Self {
            baseline,
            fuzz_factor,
            global_codes,
        }
    }

    pub fn reason(&self, warning: &Warning) -> Option<SuppressionReason> {
        if self.global_codes.contains(&warning.code) {
            return Some(SuppressionReason::GlobalCode);
        }

        self.baseline
            .entries_for(&warning.code)
            .iter()
            .find(|entry| entry_matches(entry, warning, self.fuzz_factor))
            .map(|entry| SuppressionReason::Baseline(*entry))
    }

    pub fn should_ignore(&self, warning: &Warning) -> bool {
        self.reason(warning).is_some()
    }
}

fn entry_matches(entry: &IgnoreEntry, warning: &Warning, fuzz_factor: usize) -> bool {
    warning.start_line.abs_diff(entry.start_line) <= fuzz_factor
        && warning.end_line.abs_diff(entry.end_line) <= fuzz_factor
}

/// Convenience wrapper for a one-off check without global codes.
pub fn should_ignore(baseline: &IgnoreBaseline, fuzz_factor: usize, warning: &Warning) -> bool {
    let no_codes = HashSet::new();
    SuppressionMatcher::new(baseline, fuzz_factor, &no_codes).should_ignore(warning)
}
