#![warn(missing_docs)]
//! Parsebench Statistical Engine
//!
//! Reduces raw timing samples into summary statistics and derives
//! cross-target comparisons:
//! - [`aggregate`]: successful samples -> [`SummaryStatistic`] (or absent)
//! - [`compare`] / [`compare_all`]: per-target summaries -> ordered
//!   [`ComparisonRecord`]s plus aggregate speedups
//!
//! All computations are deterministic: the same sample sequence always
//! produces the same result.

mod comparison;
mod summary;

pub use comparison::{
    AggregateSpeedup, ComparisonRecord, Speedup, SweepResult, compare, compare_all,
};
pub use summary::{SummaryStatistic, aggregate};
