//! End-to-end sweep tests with real child processes.
#![cfg(unix)]

use parsebench_cli::run_sweep;
use parsebench_core::{CancelToken, InputCase, Target};
use std::io::Write;
use std::time::Duration;

fn shell_target(name: &str, script: &str) -> Target {
    Target::new(
        name,
        "/bin/sh",
        vec!["-c".into(), script.into(), "sh".into(), "{input}".into()],
    )
    .unwrap()
}

fn scratch_input(label: &str) -> (InputCase, tempfile::NamedTempFile) {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "<xbrl>{}</xbrl>", label).unwrap();
    let case = InputCase::new(label, file.path());
    (case, file)
}

#[test]
fn two_targets_one_input_produces_full_record() {
    let fast = shell_target("fast", r#"cat "$1" > /dev/null; echo "Facts: 10""#);
    let slow = shell_target("slow", r#"cat "$1" > /dev/null; sleep 0.05"#);
    let (input, _guard) = scratch_input("Tiny (10 facts)");

    let outcome = run_sweep(
        &[fast, slow],
        &[input],
        3,
        Duration::from_secs(10),
        &CancelToken::new(),
        false,
    );

    assert!(outcome.skipped.is_empty());
    assert_eq!(outcome.result.records.len(), 1);

    let record = &outcome.result.records[0];
    assert_eq!(record.label, "Tiny (10 facts)");
    assert!(record.bytes > 0);
    assert!(record.summary_for("fast").is_some());
    assert!(record.summary_for("slow").is_some());

    // Both orderings present, reciprocal, and positive.
    let fast_over_slow = record.speedup_of("slow", "fast").unwrap();
    let slow_over_fast = record.speedup_of("fast", "slow").unwrap();
    assert!(fast_over_slow > 0.0);
    assert!((fast_over_slow * slow_over_fast - 1.0).abs() < 1e-6);

    assert!(!outcome.result.aggregates.is_empty());
}

#[test]
fn missing_input_is_skipped_not_fatal() {
    let target = shell_target("echoer", r#"cat "$1" > /dev/null"#);
    let (present, _guard) = scratch_input("Present");
    let missing = InputCase::new("Missing", "/nonexistent/input.xbrl");

    let outcome = run_sweep(
        &[target],
        &[missing, present],
        1,
        Duration::from_secs(10),
        &CancelToken::new(),
        false,
    );

    assert_eq!(outcome.skipped, vec!["Missing".to_string()]);
    assert_eq!(outcome.result.records.len(), 1);
    assert_eq!(outcome.result.records[0].label, "Present");
}

#[test]
fn consistently_failing_target_yields_absent_summary() {
    let good = shell_target("good", r#"cat "$1" > /dev/null"#);
    let bad = shell_target("bad", r#"echo "parse error" >&2; exit 1"#);
    let (input, _guard) = scratch_input("Medium (1K facts)");

    let outcome = run_sweep(
        &[good, bad],
        &[input],
        3,
        Duration::from_secs(10),
        &CancelToken::new(),
        false,
    );

    let record = &outcome.result.records[0];
    assert!(record.summary_for("good").is_some());
    assert!(record.summary_for("bad").is_none());
    // The row exists, but no pair was computable and nothing feeds the
    // aggregate.
    assert!(record.speedups.is_empty());
    assert!(outcome.result.aggregates.is_empty());
}

#[test]
fn sample_counts_match_configured_runs() {
    let target = shell_target("counter", r#"cat "$1" > /dev/null; echo "Facts: 3""#);
    let (input, _guard) = scratch_input("Small (100 facts)");

    let outcome = run_sweep(
        &[target],
        &[input],
        4,
        Duration::from_secs(10),
        &CancelToken::new(),
        false,
    );

    let stats = outcome.result.records[0].summary_for("counter").unwrap();
    assert_eq!(stats.samples, 4);
    assert_eq!(stats.attempted, 4);
}

#[test]
fn cancelled_sweep_returns_partial_results() {
    let target = shell_target("echoer", r#"cat "$1" > /dev/null"#);
    let (input, _guard) = scratch_input("Only");

    let cancel = CancelToken::new();
    cancel.cancel();

    let outcome = run_sweep(
        &[target],
        &[input],
        3,
        Duration::from_secs(10),
        &cancel,
        false,
    );

    // Cancellation before the first run: the sweep ends without records.
    assert!(outcome.result.records.is_empty());
}
