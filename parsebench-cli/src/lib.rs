#![warn(missing_docs)]
//! Parsebench CLI
//!
//! Command-line front end for the comparative benchmark harness: loads
//! `parsebench.toml`, runs the sweep, and renders the result in the
//! requested format.

mod config;
mod sweep;

pub use config::{BenchConfig, InputConfig, RunnerConfig, TargetConfig, parse_duration};
pub use sweep::{SweepOutcome, run_sweep};

use clap::{Parser, Subcommand};
use parsebench_core::CancelToken;
use parsebench_report::{
    OutputFormat, format_human_output, generate_csv_report, generate_json_report,
};
use std::io::Write;
use std::path::PathBuf;
use std::time::Instant;

/// Parsebench CLI arguments.
#[derive(Parser, Debug)]
#[command(name = "parsebench")]
#[command(author, version, about = "Comparative benchmark harness for external parsers")]
pub struct Cli {
    /// Optional subcommand; defaults to Run.
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Configuration file (discovered by walking up if not given).
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Override runs per (target, input) pair.
    #[arg(long)]
    pub runs: Option<u32>,

    /// Override per-run timeout (e.g., "30s", "500ms").
    #[arg(long)]
    pub timeout: Option<String>,

    /// Output format: human, json, csv.
    #[arg(long, default_value = "human")]
    pub format: String,

    /// Output file (stdout if not specified).
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Verbose output.
    #[arg(short, long)]
    pub verbose: bool,
}

/// CLI subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List configured targets and inputs without executing.
    List,
    /// Run the sweep (default).
    Run,
    /// Write a starter parsebench.toml to the current directory.
    Init,
}

/// Run the Parsebench CLI. Main entry point for the binary.
pub fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    run_with_cli(cli)
}

/// Run the CLI with pre-parsed arguments.
pub fn run_with_cli(cli: Cli) -> anyhow::Result<()> {
    let filter = if cli.verbose {
        "parsebench_core=debug,parsebench_cli=debug"
    } else {
        "parsebench_core=info,parsebench_cli=info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    if matches!(cli.command, Some(Commands::Init)) {
        return init_config();
    }

    let config = match &cli.config {
        Some(path) => BenchConfig::load(path)?,
        None => BenchConfig::discover().ok_or_else(|| {
            anyhow::anyhow!("no parsebench.toml found; run 'parsebench init' or pass --config")
        })?,
    };

    match cli.command {
        Some(Commands::List) => list_plan(&config),
        Some(Commands::Run) | None => run_benchmarks(&cli, &config),
        Some(Commands::Init) => unreachable!("handled above"),
    }
}

fn init_config() -> anyhow::Result<()> {
    let path = PathBuf::from("parsebench.toml");
    if path.exists() {
        anyhow::bail!("parsebench.toml already exists");
    }
    std::fs::write(&path, BenchConfig::default_toml())?;
    println!("Wrote {}", path.display());
    Ok(())
}

fn list_plan(config: &BenchConfig) -> anyhow::Result<()> {
    let targets = config.build_targets()?;
    let inputs = config.build_inputs()?;
    let (runs, timeout) = config.build_runner()?;

    println!("Parsebench plan: {} run(s) per pair, {:?} timeout", runs, timeout);
    println!("Targets:");
    for target in &targets {
        println!(
            "  {} ({} {})",
            target.name,
            target.program.display(),
            target.args.join(" ")
        );
    }
    println!("Inputs:");
    for input in &inputs {
        match input.byte_size() {
            Some(bytes) => println!("  {} ({} bytes)", input.label, bytes),
            None => println!("  {} (missing or empty - will be skipped)", input.label),
        }
    }
    Ok(())
}

fn run_benchmarks(cli: &Cli, config: &BenchConfig) -> anyhow::Result<()> {
    let targets = config.build_targets()?;
    let inputs = config.build_inputs()?;
    let (mut runs, mut timeout) = config.build_runner()?;

    // CLI flags override config file values.
    if let Some(n) = cli.runs {
        if n == 0 {
            anyhow::bail!("--runs must be at least 1");
        }
        runs = n;
    }
    if let Some(t) = &cli.timeout {
        timeout = parse_duration(t)?;
        if timeout.is_zero() {
            anyhow::bail!("--timeout must be greater than zero");
        }
    }

    let format: OutputFormat = cli
        .format
        .parse()
        .map_err(|e: String| anyhow::anyhow!(e))?;

    eprintln!(
        "Benchmarking {} target(s) against {} input(s), {} run(s) each...",
        targets.len(),
        inputs.len(),
        runs
    );

    let start = Instant::now();
    let cancel = CancelToken::new();
    let show_progress = matches!(format, OutputFormat::Human) && cli.output.is_none();
    let outcome = run_sweep(&targets, &inputs, runs, timeout, &cancel, show_progress);
    let total_duration_ms = start.elapsed().as_secs_f64() * 1000.0;

    if outcome.result.records.is_empty() && !outcome.skipped.is_empty() {
        eprintln!("Warning: every configured input was skipped; nothing was benchmarked.");
    }

    let report = parsebench_report::build_report(
        &outcome.result,
        runs,
        timeout.as_millis() as u64,
        targets.iter().map(|t| t.name.clone()).collect(),
        outcome.skipped,
        total_duration_ms,
    );

    let rendered = match format {
        OutputFormat::Json => generate_json_report(&report)?,
        OutputFormat::Csv => generate_csv_report(&report),
        OutputFormat::Human => format_human_output(&report),
    };

    if let Some(path) = &cli.output {
        let mut file = std::fs::File::create(path)?;
        file.write_all(rendered.as_bytes())?;
        println!("Report written to: {}", path.display());
    } else {
        print!("{}", rendered);
    }

    Ok(())
}
