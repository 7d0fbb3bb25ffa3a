//! Cross-Target Comparison
//!
//! Assembles per-input comparison records from per-target summaries and
//! derives pairwise speedup ratios, plus a mean speedup per ordered pair
//! across the whole sweep. Records are immutable once constructed; input
//! ordering is preserved exactly as configured, never re-sorted.

use crate::SummaryStatistic;

/// Speedup of `candidate` relative to `reference` on one input:
/// `median(reference) / median(candidate)`. A ratio > 1 means the candidate
/// is faster.
#[derive(Debug, Clone, PartialEq)]
pub struct Speedup {
    /// Target whose median is the numerator.
    pub reference: String,
    /// Target whose median is the denominator.
    pub candidate: String,
    /// Ratio of medians.
    pub ratio: f64,
}

/// One row of the final result: a single input's cross-target summaries and
/// the speedups derivable from them.
#[derive(Debug, Clone)]
pub struct ComparisonRecord {
    /// Input display label.
    pub label: String,
    /// Input size in bytes.
    pub bytes: u64,
    /// Per-target summary in configured target order; `None` where every
    /// run failed for that target.
    pub summaries: Vec<(String, Option<SummaryStatistic>)>,
    /// One entry per ordered target pair where both summaries are present.
    pub speedups: Vec<Speedup>,
}

impl ComparisonRecord {
    /// Summary for a target by name, if present.
    pub fn summary_for(&self, name: &str) -> Option<&SummaryStatistic> {
        self.summaries
            .iter()
            .find(|(n, _)| n == name)
            .and_then(|(_, s)| s.as_ref())
    }

    /// Speedup ratio for an ordered pair, if computed for this input.
    pub fn speedup_of(&self, reference: &str, candidate: &str) -> Option<f64> {
        self.speedups
            .iter()
            .find(|s| s.reference == reference && s.candidate == candidate)
            .map(|s| s.ratio)
    }
}

/// Mean speedup for one ordered target pair across the inputs where the
/// pairwise ratio was computable.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregateSpeedup {
    /// Target whose median is the numerator.
    pub reference: String,
    /// Target whose median is the denominator.
    pub candidate: String,
    /// Arithmetic mean of the per-input ratios.
    pub mean_ratio: f64,
    /// Number of inputs contributing to the mean.
    pub inputs: usize,
}

/// The full sweep output handed to the reporting layer.
#[derive(Debug, Clone)]
pub struct SweepResult {
    /// Per-input records in worklist order.
    pub records: Vec<ComparisonRecord>,
    /// Mean speedup per ordered target pair, over computable inputs only.
    pub aggregates: Vec<AggregateSpeedup>,
}

/// Build the comparison record for one input.
///
/// `summaries` is the per-target result in configured order. Pairs with an
/// absent summary produce no speedup entry; the record itself is still
/// assembled so the caller sees the coverage gap explicitly.
pub fn compare(
    label: impl Into<String>,
    bytes: u64,
    summaries: Vec<(String, Option<SummaryStatistic>)>,
) -> ComparisonRecord {
    let mut speedups = Vec::new();
    for (ref_name, ref_stats) in &summaries {
        for (cand_name, cand_stats) in &summaries {
            if ref_name == cand_name {
                continue;
            }
            let (Some(reference), Some(candidate)) = (ref_stats, cand_stats) else {
                continue;
            };
            if candidate.median_ns <= 0.0 {
                continue;
            }
            speedups.push(Speedup {
                reference: ref_name.clone(),
                candidate: cand_name.clone(),
                ratio: reference.median_ns / candidate.median_ns,
            });
        }
    }

    ComparisonRecord {
        label: label.into(),
        bytes,
        summaries,
        speedups,
    }
}

/// Assemble the full sweep result from per-input records.
///
/// The aggregate for each ordered pair is the mean ratio over exactly the
/// inputs where that pair was computable; an input missing one target's data
/// is excluded, never treated as zero.
pub fn compare_all(records: Vec<ComparisonRecord>) -> SweepResult {
    // Pair order follows first appearance across records.
    let mut pairs: Vec<(String, String, Vec<f64>)> = Vec::new();
    for record in &records {
        for speedup in &record.speedups {
            match pairs
                .iter_mut()
                .find(|(r, c, _)| r == &speedup.reference && c == &speedup.candidate)
            {
                Some((_, _, ratios)) => ratios.push(speedup.ratio),
                None => pairs.push((
                    speedup.reference.clone(),
                    speedup.candidate.clone(),
                    vec![speedup.ratio],
                )),
            }
        }
    }

    let aggregates = pairs
        .into_iter()
        .map(|(reference, candidate, ratios)| AggregateSpeedup {
            reference,
            candidate,
            mean_ratio: ratios.iter().sum::<f64>() / ratios.len() as f64,
            inputs: ratios.len(),
        })
        .collect();

    SweepResult {
        records,
        aggregates,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate;
    use parsebench_core::Sample;
    use std::time::Duration;

    fn stats_with_median(median_ms: f64) -> SummaryStatistic {
        let ns = median_ms * 1_000_000.0;
        SummaryStatistic {
            mean_ns: ns,
            median_ns: ns,
            std_dev_ns: 0.0,
            min_ns: ns,
            max_ns: ns,
            samples: 3,
            attempted: 3,
        }
    }

    #[test]
    fn end_to_end_constant_samples() {
        // Target A: 10ms x3, target B: 50ms x3 -> B over A = 5.0.
        let a: Vec<Sample> = (0..3)
            .map(|_| Sample::ok(Duration::from_millis(10), Default::default()))
            .collect();
        let b: Vec<Sample> = (0..3)
            .map(|_| Sample::ok(Duration::from_millis(50), Default::default()))
            .collect();

        let a_stats = aggregate(&a).unwrap();
        let b_stats = aggregate(&b).unwrap();
        assert!((a_stats.median_ns - 10.0 * 1_000_000.0).abs() < 1.0);
        assert!((b_stats.median_ns - 50.0 * 1_000_000.0).abs() < 1.0);

        let record = compare(
            "one input",
            1024,
            vec![("a".into(), Some(a_stats)), ("b".into(), Some(b_stats))],
        );

        // speedup(B over A): reference = b, candidate = a.
        assert!((record.speedup_of("b", "a").unwrap() - 5.0).abs() < 1e-9);
    }

    #[test]
    fn speedup_is_multiplicatively_consistent() {
        let record = compare(
            "in",
            1,
            vec![
                ("fast".into(), Some(stats_with_median(12.0))),
                ("slow".into(), Some(stats_with_median(84.0))),
            ],
        );

        let ab = record.speedup_of("slow", "fast").unwrap();
        let ba = record.speedup_of("fast", "slow").unwrap();
        assert!((ab * ba - 1.0).abs() < 1e-9);
        assert!(ab > 1.0, "the fast candidate should show > 1");
    }

    #[test]
    fn absent_summary_produces_no_pair() {
        let record = compare(
            "in",
            1,
            vec![
                ("a".into(), Some(stats_with_median(10.0))),
                ("b".into(), None),
            ],
        );

        assert!(record.speedups.is_empty());
        assert!(record.summary_for("a").is_some());
        assert!(record.summary_for("b").is_none());
        // The row itself still exists with both targets listed.
        assert_eq!(record.summaries.len(), 2);
    }

    #[test]
    fn three_targets_produce_all_ordered_pairs() {
        let record = compare(
            "in",
            1,
            vec![
                ("a".into(), Some(stats_with_median(10.0))),
                ("b".into(), Some(stats_with_median(20.0))),
                ("c".into(), Some(stats_with_median(40.0))),
            ],
        );
        assert_eq!(record.speedups.len(), 6);
        assert!((record.speedup_of("c", "a").unwrap() - 4.0).abs() < 1e-9);
    }

    #[test]
    fn aggregate_means_per_input_ratios() {
        let r1 = compare(
            "small",
            1,
            vec![
                ("a".into(), Some(stats_with_median(10.0))),
                ("b".into(), Some(stats_with_median(40.0))),
            ],
        );
        let r2 = compare(
            "large",
            2,
            vec![
                ("a".into(), Some(stats_with_median(10.0))),
                ("b".into(), Some(stats_with_median(80.0))),
            ],
        );

        let result = compare_all(vec![r1, r2]);
        let agg = result
            .aggregates
            .iter()
            .find(|a| a.reference == "b" && a.candidate == "a")
            .unwrap();

        // (4 + 8) / 2 = 6.
        assert!((agg.mean_ratio - 6.0).abs() < 1e-9);
        assert_eq!(agg.inputs, 2);
    }

    #[test]
    fn incomputable_inputs_are_excluded_from_aggregate() {
        let complete = compare(
            "small",
            1,
            vec![
                ("a".into(), Some(stats_with_median(10.0))),
                ("b".into(), Some(stats_with_median(30.0))),
            ],
        );
        let gappy = compare(
            "large",
            2,
            vec![
                ("a".into(), Some(stats_with_median(10.0))),
                ("b".into(), None),
            ],
        );

        let result = compare_all(vec![complete, gappy]);
        let agg = result
            .aggregates
            .iter()
            .find(|a| a.reference == "b" && a.candidate == "a")
            .unwrap();

        // Only the complete input contributes; 30/10 = 3, not averaged with 0.
        assert!((agg.mean_ratio - 3.0).abs() < 1e-9);
        assert_eq!(agg.inputs, 1);
        assert_eq!(result.records.len(), 2, "the gappy row is still present");
    }

    #[test]
    fn no_computable_pair_means_no_aggregate() {
        let record = compare(
            "in",
            1,
            vec![
                ("a".into(), Some(stats_with_median(10.0))),
                ("b".into(), None),
            ],
        );
        let result = compare_all(vec![record]);
        assert!(result.aggregates.is_empty());
    }

    #[test]
    fn record_order_is_preserved() {
        let records: Vec<ComparisonRecord> = ["huge", "tiny", "medium"]
            .iter()
            .map(|label| {
                compare(
                    *label,
                    1,
                    vec![("a".into(), Some(stats_with_median(10.0)))],
                )
            })
            .collect();

        let result = compare_all(records);
        let labels: Vec<&str> = result.records.iter().map(|r| r.label.as_str()).collect();
        assert_eq!(labels, vec!["huge", "tiny", "medium"]);
    }
}
