//! CSV Output
//!
//! One row per (input, target) cell with timing statistics in milliseconds.
//! Absent statistics render as empty fields so coverage gaps stay visible
//! in the spreadsheet.

use crate::report::Report;

/// Generate a CSV report.
pub fn generate_csv_report(report: &Report) -> String {
    let mut out = String::new();
    out.push_str(
        "input,bytes,target,samples,attempted,mean_ms,median_ms,std_dev_ms,min_ms,max_ms\n",
    );

    for record in &report.records {
        for target in &record.targets {
            match &target.stats {
                Some(stats) => {
                    out.push_str(&format!(
                        "{},{},{},{},{},{:.3},{:.3},{:.3},{:.3},{:.3}\n",
                        escape(&record.label),
                        record.bytes,
                        escape(&target.name),
                        stats.samples,
                        stats.attempted,
                        stats.mean_ns / 1e6,
                        stats.median_ns / 1e6,
                        stats.std_dev_ns / 1e6,
                        stats.min_ns / 1e6,
                        stats.max_ns / 1e6,
                    ));
                }
                None => {
                    out.push_str(&format!(
                        "{},{},{},0,0,,,,,\n",
                        escape(&record.label),
                        record.bytes,
                        escape(&target.name),
                    ));
                }
            }
        }
    }

    out
}

fn escape(field: &str) -> String {
    if field.contains([',', '"', '\n']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}
