//! Human-Readable Output
//!
//! Terminal table in worklist order: one row per input, one column per
//! target (median time), speedup lines under each row, then the aggregate
//! speedups. A target with no successful run renders as "no data" rather
//! than dropping the row, so coverage gaps are explicit.

use crate::report::Report;

/// Format a nanosecond duration with an appropriate unit.
pub fn format_duration(ns: f64) -> String {
    if ns < 1_000.0 {
        format!("{:.0} ns", ns)
    } else if ns < 1_000_000.0 {
        format!("{:.1} µs", ns / 1e3)
    } else if ns < 1_000_000_000.0 {
        format!("{:.1} ms", ns / 1e6)
    } else {
        format!("{:.2} s", ns / 1e9)
    }
}

fn format_bytes(bytes: u64) -> String {
    const KB: f64 = 1024.0;
    const MB: f64 = KB * 1024.0;
    let bytes = bytes as f64;
    if bytes < KB {
        format!("{:.0} B", bytes)
    } else if bytes < MB {
        format!("{:.1} KB", bytes / KB)
    } else {
        format!("{:.2} MB", bytes / MB)
    }
}

/// Format a report for terminal display.
pub fn format_human_output(report: &Report) -> String {
    let mut output = String::new();

    output.push('\n');
    output.push_str("Parsebench Results\n");
    output.push_str(&"=".repeat(64));
    output.push_str("\n\n");

    output.push_str(&format!(
        "{} run(s) per pair, {} timeout, {} input(s)\n\n",
        report.meta.runs,
        format_duration(report.meta.timeout_ms as f64 * 1e6),
        report.summary.inputs,
    ));

    // Column widths: label column sized to the longest label, one column
    // per target sized to its name or widest value.
    let label_width = report
        .records
        .iter()
        .map(|r| r.label.len())
        .chain(std::iter::once("Input".len()))
        .max()
        .unwrap_or(5)
        + 2;
    let col_width = report
        .meta
        .targets
        .iter()
        .map(|t| t.len())
        .chain(std::iter::once(9))
        .max()
        .unwrap_or(9)
        + 2;

    output.push_str(&format!("{:<label_width$}{:<10}", "Input", "Size"));
    for target in &report.meta.targets {
        output.push_str(&format!("{:<col_width$}", target));
    }
    output.push('\n');
    output.push_str(&"-".repeat(label_width + 10 + col_width * report.meta.targets.len()));
    output.push('\n');

    for record in &report.records {
        output.push_str(&format!(
            "{:<label_width$}{:<10}",
            record.label,
            format_bytes(record.bytes)
        ));
        for target in &record.targets {
            let cell = match &target.stats {
                Some(stats) => format_duration(stats.median_ns),
                None => "no data".to_string(),
            };
            output.push_str(&format!("{:<col_width$}", cell));
        }
        output.push('\n');

        for speedup in &record.speedups {
            // Only show each unordered pair once, from the faster side.
            if speedup.ratio >= 1.0 {
                output.push_str(&format!(
                    "    {} is {:.1}x faster than {}\n",
                    speedup.candidate, speedup.ratio, speedup.reference
                ));
            }
        }
    }

    if !report.aggregates.is_empty() {
        output.push('\n');
        output.push_str("Aggregate speedup\n");
        output.push_str(&"-".repeat(64));
        output.push('\n');
        for agg in &report.aggregates {
            if agg.mean_ratio >= 1.0 {
                output.push_str(&format!(
                    "  {} over {}: {:.1}x mean speedup across {} input(s)\n",
                    agg.candidate, agg.reference, agg.mean_ratio, agg.inputs
                ));
            }
        }
    }

    if !report.summary.skipped.is_empty() {
        output.push('\n');
        for label in &report.summary.skipped {
            output.push_str(&format!("Skipped {}: file missing or empty\n", label));
        }
    }

    output.push_str(&format!(
        "\nSweep completed in {}\n",
        format_duration(report.summary.total_duration_ms * 1e6)
    ));

    output
}
