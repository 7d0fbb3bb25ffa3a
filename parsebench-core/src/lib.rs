#![warn(missing_docs)]
//! Parsebench Core - Target Model and Measurement Engine
//!
//! Defines the benchmarked-target data model and the measurement primitives:
//! - [`Target`] / [`InputCase`]: static configuration for one sweep
//! - [`invoke`]: run one target against one input under a timeout
//! - [`SampleCollector`]: repeat invocations and collect raw [`Sample`]s
//!
//! Every target is measured as an isolated external process. Nothing in this
//! crate runs benchmarked code in-process.

mod collector;
mod invoker;
mod metrics;

pub use collector::{SampleCollector, representative_metrics};
pub use invoker::invoke;
pub use metrics::{MetricRule, MetricRuleError};

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use thiserror::Error;

/// Placeholder in a target's argument template that is replaced with the
/// input file path at invocation time.
pub const INPUT_PLACEHOLDER: &str = "{input}";

/// Errors from constructing a [`Target`].
#[derive(Debug, Error)]
pub enum TargetError {
    /// No argument contains the `{input}` placeholder.
    #[error("target '{0}' has no argument containing an {{input}} placeholder")]
    MissingInputSlot(String),

    /// The target name is empty.
    #[error("target name must not be empty")]
    EmptyName,
}

/// One benchmarked external program.
///
/// The invocation template is `program` plus `args`, where at least one
/// argument contains [`INPUT_PLACEHOLDER`]; the placeholder is substituted
/// with the input file path when the target is invoked.
#[derive(Debug, Clone)]
pub struct Target {
    /// Unique human-readable name, used in reports.
    pub name: String,
    /// Path to the executable.
    pub program: PathBuf,
    /// Argument template containing the input placeholder.
    pub args: Vec<String>,
    /// Rule for extracting structured metrics from the target's stdout.
    pub metric_rule: MetricRule,
}

impl Target {
    /// Create a target, validating the invocation template.
    pub fn new(
        name: impl Into<String>,
        program: impl Into<PathBuf>,
        args: Vec<String>,
    ) -> Result<Self, TargetError> {
        let name = name.into();
        if name.is_empty() {
            return Err(TargetError::EmptyName);
        }
        if !args.iter().any(|a| a.contains(INPUT_PLACEHOLDER)) {
            return Err(TargetError::MissingInputSlot(name));
        }
        Ok(Self {
            name,
            program: program.into(),
            args,
            metric_rule: MetricRule::default(),
        })
    }

    /// Replace the default metric rule.
    pub fn with_metric_rule(mut self, rule: MetricRule) -> Self {
        self.metric_rule = rule;
        self
    }

    /// Build the concrete argument list for one input file.
    pub fn command_args(&self, input: &Path) -> Vec<String> {
        let input = input.to_string_lossy();
        self.args
            .iter()
            .map(|a| a.replace(INPUT_PLACEHOLDER, &input))
            .collect()
    }
}

/// One benchmark input: a file on disk plus its display label.
#[derive(Debug, Clone)]
pub struct InputCase {
    /// Display name, e.g. "Medium (1K facts)".
    pub label: String,
    /// Path to the input file.
    pub path: PathBuf,
}

impl InputCase {
    /// Create an input case.
    pub fn new(label: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            label: label.into(),
            path: path.into(),
        }
    }

    /// Size of the input file in bytes, read at run time.
    ///
    /// Returns `None` for a missing, unreadable, or empty file; the sweep
    /// skips such cases rather than failing.
    pub fn byte_size(&self) -> Option<u64> {
        match std::fs::metadata(&self.path) {
            Ok(meta) if meta.is_file() && meta.len() > 0 => Some(meta.len()),
            _ => None,
        }
    }
}

/// Outcome of one execution of a target against one input.
#[derive(Debug, Clone)]
pub struct Sample {
    /// Wall-clock time from just before process start to termination.
    pub elapsed: Duration,
    /// Whether the process exited with status 0 within the timeout.
    pub success: bool,
    /// Structured metrics extracted from stdout (successful runs only).
    pub metrics: BTreeMap<String, u64>,
    /// Captured stderr or a timeout/launch marker (failed runs only).
    pub diagnostic: Option<String>,
}

impl Sample {
    /// A successful sample with extracted metrics.
    pub fn ok(elapsed: Duration, metrics: BTreeMap<String, u64>) -> Self {
        Self {
            elapsed,
            success: true,
            metrics,
            diagnostic: None,
        }
    }

    /// A failed sample carrying diagnostic text.
    pub fn failed(elapsed: Duration, diagnostic: impl Into<String>) -> Self {
        Self {
            elapsed,
            success: false,
            metrics: BTreeMap::new(),
            diagnostic: Some(diagnostic.into()),
        }
    }
}

/// Cooperative cancellation flag, checked between runs.
///
/// Cancellation never interrupts a run mid-measurement; a cancelled run is
/// simply not started, so no misleading partial duration is ever recorded.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    /// Create a fresh, uncancelled token.
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    /// Whether cancellation has been requested.
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}
