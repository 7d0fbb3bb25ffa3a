//! Sweep Execution
//!
//! Drives the (target x input) matrix strictly sequentially: one external
//! process at a time, so runs never contend with each other for CPU cache,
//! memory bandwidth, or scheduler time. A failure in one cell never aborts
//! any other cell.
//!
//! ## Data flow
//!
//! ```text
//! Target list + InputCase worklist
//!        |
//!        v  (per input, per target)
//!  SampleCollector -> Vec<Sample> -> aggregate() -> Option<SummaryStatistic>
//!        |
//!        v  (per input)
//!  compare() -> ComparisonRecord
//!        |
//!        v
//!  compare_all() -> SweepResult (+ skipped input labels)
//! ```

use indicatif::{ProgressBar, ProgressStyle};
use parsebench_core::{CancelToken, InputCase, SampleCollector, Target, representative_metrics};
use parsebench_stats::{SweepResult, aggregate, compare, compare_all};
use std::time::Duration;

/// Sweep output: the comparison result plus the labels of skipped inputs.
#[derive(Debug)]
pub struct SweepOutcome {
    /// Ordered comparison records and aggregate speedups.
    pub result: SweepResult,
    /// Inputs skipped because the file was missing or empty, in worklist
    /// order. Reported once per input, not per target.
    pub skipped: Vec<String>,
}

/// Run the full sweep.
///
/// Inputs are processed in worklist order; for each usable input every
/// target is collected and aggregated. Cancellation stops between runs and
/// returns the records completed so far.
pub fn run_sweep(
    targets: &[Target],
    inputs: &[InputCase],
    runs: u32,
    timeout: Duration,
    cancel: &CancelToken,
    show_progress: bool,
) -> SweepOutcome {
    let collector = SampleCollector::new(runs, timeout).with_cancel(cancel.clone());

    let pb = if show_progress {
        let pb = ProgressBar::new((targets.len() * inputs.len()) as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template(
                    "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}",
                )
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("#>-"),
        );
        pb
    } else {
        ProgressBar::hidden()
    };

    let mut records = Vec::with_capacity(inputs.len());
    let mut skipped = Vec::new();

    'inputs: for input in inputs {
        let Some(bytes) = input.byte_size() else {
            tracing::warn!(
                label = %input.label,
                path = %input.path.display(),
                "skipping input: file missing or empty"
            );
            skipped.push(input.label.clone());
            pb.inc(targets.len() as u64);
            continue;
        };

        tracing::info!(label = %input.label, bytes, "benchmarking input");

        let mut summaries = Vec::with_capacity(targets.len());
        for target in targets {
            if cancel.is_cancelled() {
                break 'inputs;
            }
            pb.set_message(format!("{} / {}", input.label, target.name));

            let samples = collector.collect(target, &input.path);
            if let Some(metrics) = representative_metrics(&samples) {
                // Progress-reporting sugar only; never feeds the statistics.
                tracing::info!(target_name = %target.name, ?metrics, "reported metrics");
            }

            let stats = aggregate(&samples);
            if stats.is_none() {
                tracing::warn!(
                    target_name = %target.name,
                    label = %input.label,
                    attempted = samples.len(),
                    "no successful runs"
                );
            }
            summaries.push((target.name.clone(), stats));
            pb.inc(1);
        }

        records.push(compare(input.label.clone(), bytes, summaries));
    }

    pb.finish_and_clear();

    SweepOutcome {
        result: compare_all(records),
        skipped,
    }
}
