//! Structured Metric Extraction
//!
//! Targets may print `<label>: <integer>` lines (e.g. `Facts: 1234`) to
//! stdout. Extraction is a pure function over captured text, kept separate
//! from process management so it can be tested without spawning anything.
//! A stdout that matches nothing yields an empty map, never an error.

use regex::Regex;
use std::collections::BTreeMap;
use thiserror::Error;

/// Default line pattern: a word-ish label, a colon, an integer count.
const DEFAULT_PATTERN: &str = r"(?m)^\s*([A-Za-z][A-Za-z0-9 _.-]*?)\s*:\s*(\d+)\s*$";

/// Errors from building a [`MetricRule`].
#[derive(Debug, Error)]
pub enum MetricRuleError {
    /// The pattern is not a valid regex.
    #[error("invalid metric pattern: {0}")]
    InvalidPattern(#[from] regex::Error),

    /// The pattern lacks the label and count capture groups.
    #[error("metric pattern must have two capture groups (label, count), found {0}")]
    MissingCaptures(usize),
}

/// How to extract named counts from a target's stdout.
#[derive(Debug, Clone)]
pub struct MetricRule {
    regex: Regex,
}

impl Default for MetricRule {
    fn default() -> Self {
        Self {
            // DEFAULT_PATTERN is a checked constant.
            regex: Regex::new(DEFAULT_PATTERN).expect("default metric pattern is valid"),
        }
    }
}

impl MetricRule {
    /// Build a rule from a custom pattern.
    ///
    /// The pattern must contain two capture groups: the metric label and the
    /// integer count, in that order.
    pub fn new(pattern: &str) -> Result<Self, MetricRuleError> {
        let regex = Regex::new(pattern)?;
        // captures_len counts the implicit whole-match group.
        if regex.captures_len() < 3 {
            return Err(MetricRuleError::MissingCaptures(regex.captures_len() - 1));
        }
        Ok(Self { regex })
    }

    /// Extract all named counts from `text`.
    ///
    /// The first occurrence of a label wins; counts that overflow `u64` are
    /// skipped. No match is not an error - the map is simply empty.
    pub fn extract(&self, text: &str) -> BTreeMap<String, u64> {
        let mut metrics = BTreeMap::new();
        for caps in self.regex.captures_iter(text) {
            let (Some(label), Some(count)) = (caps.get(1), caps.get(2)) else {
                continue;
            };
            let Ok(count) = count.as_str().parse::<u64>() else {
                continue;
            };
            metrics
                .entry(label.as_str().trim().to_string())
                .or_insert(count);
        }
        metrics
    }
}
