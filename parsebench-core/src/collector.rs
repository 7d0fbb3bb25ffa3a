//! Sample Collection
//!
//! Repeats [`invoke`](crate::invoke) for one (target, input) pair and returns
//! every sample, successful or failed, in invocation order. Runs are strictly
//! sequential: one external process at a time, so concurrent runs never
//! contend for cache, memory bandwidth, or scheduler time.

use crate::{CancelToken, Sample, Target, invoke};
use std::collections::BTreeMap;
use std::path::Path;
use std::time::Duration;

/// Collects timing samples for (target, input) pairs.
#[derive(Debug, Clone)]
pub struct SampleCollector {
    runs: u32,
    timeout: Duration,
    cancel: CancelToken,
}

impl SampleCollector {
    /// Create a collector that performs `runs` invocations per pair.
    pub fn new(runs: u32, timeout: Duration) -> Self {
        Self {
            runs,
            timeout,
            cancel: CancelToken::new(),
        }
    }

    /// Attach a cancellation token, checked between runs.
    pub fn with_cancel(mut self, cancel: CancelToken) -> Self {
        self.cancel = cancel;
        self
    }

    /// Number of runs per (target, input) pair.
    pub fn runs(&self) -> u32 {
        self.runs
    }

    /// Per-run timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Invoke the target `runs` times against `input`.
    ///
    /// A failed run never aborts the remaining runs; filtering is the
    /// aggregator's job. Cancellation stops before the next run starts, so
    /// the returned sequence may be shorter than `runs`.
    pub fn collect(&self, target: &Target, input: &Path) -> Vec<Sample> {
        let mut samples = Vec::with_capacity(self.runs as usize);
        for run in 1..=self.runs {
            if self.cancel.is_cancelled() {
                tracing::info!(
                    target_name = %target.name,
                    completed = samples.len(),
                    "cancelled between runs"
                );
                break;
            }

            let sample = invoke(target, input, self.timeout);
            tracing::debug!(
                target_name = %target.name,
                run,
                total = self.runs,
                elapsed_ms = sample.elapsed.as_secs_f64() * 1000.0,
                success = sample.success,
                "run complete"
            );
            samples.push(sample);
        }
        samples
    }
}

/// Metrics of the first successful sample, for progress display.
///
/// Informational only: the aggregated statistics are always computed over
/// the full sample sequence, never from this representative.
pub fn representative_metrics(samples: &[Sample]) -> Option<&BTreeMap<String, u64>> {
    samples
        .iter()
        .find(|s| s.success && !s.metrics.is_empty())
        .map(|s| &s.metrics)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ok_sample(metrics: &[(&str, u64)]) -> Sample {
        Sample::ok(
            Duration::from_millis(10),
            metrics
                .iter()
                .map(|(k, v)| (k.to_string(), *v))
                .collect(),
        )
    }

    #[test]
    fn representative_is_first_success_with_metrics() {
        let samples = vec![
            Sample::failed(Duration::from_millis(1), "boom"),
            ok_sample(&[]),
            ok_sample(&[("Facts", 1234)]),
            ok_sample(&[("Facts", 9999)]),
        ];

        let metrics = representative_metrics(&samples).unwrap();
        assert_eq!(metrics.get("Facts"), Some(&1234));
    }

    #[test]
    fn representative_absent_when_all_failed() {
        let samples = vec![
            Sample::failed(Duration::from_millis(1), "boom"),
            Sample::failed(Duration::from_millis(2), "boom"),
        ];
        assert!(representative_metrics(&samples).is_none());
    }
}
