#![warn(missing_docs)]
//! Parsebench Report - Result Handoff and Rendering
//!
//! The sweep's externally visible output: plain serializable value types
//! with no behavior, so any downstream renderer can consume them, plus
//! built-in renderers:
//! - JSON (machine-readable)
//! - CSV (spreadsheet-compatible)
//! - Human (terminal tables)

mod csv;
mod human;
mod json;
mod report;

pub use csv::generate_csv_report;
pub use human::{format_duration, format_human_output};
pub use json::generate_json_report;
pub use report::{
    AggregateReport, RecordReport, Report, ReportMeta, SpeedupReport, StatsReport, SweepSummary,
    TargetSummary, build_report,
};

/// Output format selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// JSON with the full record set
    Json,
    /// CSV for spreadsheets
    Csv,
    /// Human-readable terminal output
    Human,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "csv" => Ok(OutputFormat::Csv),
            "human" | "text" => Ok(OutputFormat::Human),
            other => Err(format!("Unknown output format: {}", other)),
        }
    }
}
