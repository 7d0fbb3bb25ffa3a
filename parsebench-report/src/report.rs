//! Report Data Structures

use chrono::{DateTime, Utc};
use parsebench_stats::{SummaryStatistic, SweepResult};
use serde::{Deserialize, Serialize};

/// Complete sweep report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    /// Run metadata.
    pub meta: ReportMeta,
    /// Per-input comparison rows in worklist order.
    pub records: Vec<RecordReport>,
    /// Mean speedup per ordered target pair.
    pub aggregates: Vec<AggregateReport>,
    /// Sweep-level summary.
    pub summary: SweepSummary,
}

/// Report metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMeta {
    /// Report schema version.
    pub schema_version: u32,
    /// Harness version.
    pub version: String,
    /// When the sweep finished.
    pub timestamp: DateTime<Utc>,
    /// Runs per (target, input) pair.
    pub runs: u32,
    /// Per-run timeout in milliseconds.
    pub timeout_ms: u64,
    /// Configured target names, in order.
    pub targets: Vec<String>,
}

/// One input's cross-target row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordReport {
    /// Input display label.
    pub label: String,
    /// Input size in bytes.
    pub bytes: u64,
    /// Per-target summaries in configured order.
    pub targets: Vec<TargetSummary>,
    /// Pairwise speedups computed for this input.
    pub speedups: Vec<SpeedupReport>,
}

/// One target's summary within a record; `stats` is absent when every run
/// failed for that (target, input) pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TargetSummary {
    /// Target name.
    pub name: String,
    /// Timing statistics, if any run succeeded.
    pub stats: Option<StatsReport>,
}

/// Serialized timing statistics, f64 nanoseconds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatsReport {
    /// Arithmetic mean.
    pub mean_ns: f64,
    /// Median.
    pub median_ns: f64,
    /// Sample standard deviation.
    pub std_dev_ns: f64,
    /// Fastest successful run.
    pub min_ns: f64,
    /// Slowest successful run.
    pub max_ns: f64,
    /// Successful sample count.
    pub samples: usize,
    /// Attempted run count.
    pub attempted: usize,
}

impl From<&SummaryStatistic> for StatsReport {
    fn from(stats: &SummaryStatistic) -> Self {
        Self {
            mean_ns: stats.mean_ns,
            median_ns: stats.median_ns,
            std_dev_ns: stats.std_dev_ns,
            min_ns: stats.min_ns,
            max_ns: stats.max_ns,
            samples: stats.samples,
            attempted: stats.attempted,
        }
    }
}

/// Pairwise speedup for one input.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpeedupReport {
    /// Target whose median is the numerator.
    pub reference: String,
    /// Target whose median is the denominator.
    pub candidate: String,
    /// `median(reference) / median(candidate)`; > 1 means candidate faster.
    pub ratio: f64,
}

/// Mean speedup per ordered pair across computable inputs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AggregateReport {
    /// Target whose median is the numerator.
    pub reference: String,
    /// Target whose median is the denominator.
    pub candidate: String,
    /// Arithmetic mean of per-input ratios.
    pub mean_ratio: f64,
    /// Inputs contributing to the mean.
    pub inputs: usize,
}

/// Sweep-level summary.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SweepSummary {
    /// Inputs benchmarked.
    pub inputs: usize,
    /// Labels of inputs skipped because the file was missing or empty.
    pub skipped: Vec<String>,
    /// Total wall time of the sweep in milliseconds.
    pub total_duration_ms: f64,
}

/// Current report schema version.
pub const SCHEMA_VERSION: u32 = 1;

/// Assemble a serializable report from a sweep result.
pub fn build_report(
    result: &SweepResult,
    runs: u32,
    timeout_ms: u64,
    targets: Vec<String>,
    skipped: Vec<String>,
    total_duration_ms: f64,
) -> Report {
    let records = result
        .records
        .iter()
        .map(|record| RecordReport {
            label: record.label.clone(),
            bytes: record.bytes,
            targets: record
                .summaries
                .iter()
                .map(|(name, stats)| TargetSummary {
                    name: name.clone(),
                    stats: stats.as_ref().map(StatsReport::from),
                })
                .collect(),
            speedups: record
                .speedups
                .iter()
                .map(|s| SpeedupReport {
                    reference: s.reference.clone(),
                    candidate: s.candidate.clone(),
                    ratio: s.ratio,
                })
                .collect(),
        })
        .collect();

    let aggregates = result
        .aggregates
        .iter()
        .map(|a| AggregateReport {
            reference: a.reference.clone(),
            candidate: a.candidate.clone(),
            mean_ratio: a.mean_ratio,
            inputs: a.inputs,
        })
        .collect();

    Report {
        meta: ReportMeta {
            schema_version: SCHEMA_VERSION,
            version: env!("CARGO_PKG_VERSION").to_string(),
            timestamp: Utc::now(),
            runs,
            timeout_ms,
            targets,
        },
        records,
        aggregates,
        summary: SweepSummary {
            inputs: result.records.len(),
            skipped,
            total_duration_ms,
        },
    }
}
