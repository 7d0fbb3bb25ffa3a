//! Summary Statistics
//!
//! Reduces a sample sequence for one (target, input) pair into mean, median,
//! standard deviation, min, and max over the successful runs. A pair with
//! zero successes yields `None`, never a statistic over an empty set.

use parsebench_core::Sample;

/// Timing distribution over the successful samples of one (target, input)
/// pair. All times are f64 nanoseconds.
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryStatistic {
    /// Arithmetic mean.
    pub mean_ns: f64,
    /// Median (midpoint of the two central values for even counts).
    pub median_ns: f64,
    /// Sample (n-1) standard deviation; 0.0 when fewer than 2 successes.
    pub std_dev_ns: f64,
    /// Fastest successful run.
    pub min_ns: f64,
    /// Slowest successful run.
    pub max_ns: f64,
    /// Count of successful samples.
    pub samples: usize,
    /// Count of attempted runs, successful or not.
    pub attempted: usize,
}

/// Aggregate a sample sequence into a summary statistic.
///
/// Filters to successful samples; returns `None` when none succeeded, which
/// is a normal outcome for an unavailable or consistently failing target.
pub fn aggregate(samples: &[Sample]) -> Option<SummaryStatistic> {
    let mut durations: Vec<f64> = samples
        .iter()
        .filter(|s| s.success)
        .map(|s| s.elapsed.as_nanos() as f64)
        .collect();

    if durations.is_empty() {
        return None;
    }
    durations.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    let n = durations.len();
    let mean_ns = durations.iter().sum::<f64>() / n as f64;
    let std_dev_ns = if n < 2 {
        0.0
    } else {
        let variance = durations
            .iter()
            .map(|x| (x - mean_ns).powi(2))
            .sum::<f64>()
            / (n - 1) as f64;
        variance.sqrt()
    };

    Some(SummaryStatistic {
        mean_ns,
        median_ns: median_of_sorted(&durations),
        std_dev_ns,
        min_ns: durations[0],
        max_ns: durations[n - 1],
        samples: n,
        attempted: samples.len(),
    })
}

fn median_of_sorted(sorted: &[f64]) -> f64 {
    let n = sorted.len();
    if n % 2 == 0 {
        (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0
    } else {
        sorted[n / 2]
    }
}
