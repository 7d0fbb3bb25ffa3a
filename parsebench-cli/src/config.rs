//! Configuration loading from parsebench.toml
//!
//! The sweep configuration lives in a `parsebench.toml` file, discovered by
//! walking up from the current directory. Targets and inputs are ordered
//! lists; the report preserves their order.

use parsebench_core::{InputCase, MetricRule, Target};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Sweep configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct BenchConfig {
    /// Runner configuration.
    #[serde(default)]
    pub runner: RunnerConfig,
    /// Ordered benchmarked targets.
    #[serde(default)]
    pub target: Vec<TargetConfig>,
    /// Ordered input worklist.
    #[serde(default)]
    pub input: Vec<InputConfig>,
}

/// Runner configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunnerConfig {
    /// Runs per (target, input) pair. An odd count keeps the median
    /// well-defined.
    #[serde(default = "default_runs")]
    pub runs: u32,
    /// Per-run timeout (e.g., "30s", "500ms").
    #[serde(default = "default_timeout")]
    pub timeout: String,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            runs: default_runs(),
            timeout: default_timeout(),
        }
    }
}

fn default_runs() -> u32 {
    5
}
fn default_timeout() -> String {
    "30s".to_string()
}

/// One benchmarked program.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TargetConfig {
    /// Unique display name.
    pub name: String,
    /// Path to the executable.
    pub program: String,
    /// Argument template; one argument contains `{input}`.
    pub args: Vec<String>,
    /// Optional custom metric pattern (two capture groups: label, count).
    #[serde(default)]
    pub metric_pattern: Option<String>,
}

/// One benchmark input.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputConfig {
    /// Display label, e.g. "Medium (1K facts)".
    pub label: String,
    /// Path to the input file.
    pub path: String,
}

impl BenchConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("cannot read {}: {}", path.display(), e))?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    /// Discover and load configuration by walking up from the current
    /// directory.
    pub fn discover() -> Option<Self> {
        let mut dir = std::env::current_dir().ok()?;
        loop {
            let config_path = dir.join("parsebench.toml");
            if config_path.exists() {
                return Self::load(&config_path).ok();
            }
            if !dir.pop() {
                break;
            }
        }
        None
    }

    /// Validate and build the target list.
    ///
    /// Startup-fatal: empty list, duplicate names, invalid templates or
    /// metric patterns. Everything downstream of here is fault-isolated
    /// per (target, input) cell.
    pub fn build_targets(&self) -> anyhow::Result<Vec<Target>> {
        if self.target.is_empty() {
            anyhow::bail!("no targets configured; at least one [[target]] is required");
        }

        let mut targets = Vec::with_capacity(self.target.len());
        for tc in &self.target {
            if targets.iter().any(|t: &Target| t.name == tc.name) {
                anyhow::bail!("duplicate target name: {}", tc.name);
            }
            let mut target = Target::new(&tc.name, &tc.program, tc.args.clone())?;
            if let Some(pattern) = &tc.metric_pattern {
                target = target.with_metric_rule(MetricRule::new(pattern)?);
            }
            targets.push(target);
        }
        Ok(targets)
    }

    /// Validate and build the ordered input worklist.
    ///
    /// Only an empty list is fatal here; whether each file exists is checked
    /// at sweep time, where a missing file skips the case.
    pub fn build_inputs(&self) -> anyhow::Result<Vec<InputCase>> {
        if self.input.is_empty() {
            anyhow::bail!("no inputs configured; at least one [[input]] is required");
        }
        Ok(self
            .input
            .iter()
            .map(|ic| InputCase::new(&ic.label, &ic.path))
            .collect())
    }

    /// Validate the runner section and return (runs, timeout).
    pub fn build_runner(&self) -> anyhow::Result<(u32, Duration)> {
        if self.runner.runs == 0 {
            anyhow::bail!("runner.runs must be at least 1");
        }
        let timeout = parse_duration(&self.runner.timeout)?;
        if timeout.is_zero() {
            anyhow::bail!("runner.timeout must be greater than zero");
        }
        Ok((self.runner.runs, timeout))
    }

    /// Starter configuration written by `parsebench init`.
    pub fn default_toml() -> String {
        r#"# Parsebench configuration

[runner]
# Runs per (target, input) pair; odd keeps the median well-defined
runs = 5
# Per-run timeout
timeout = "30s"

[[target]]
name = "crabrl"
program = "target/release/crabrl"
args = ["parse", "{input}"]
# Optional custom metric pattern (two capture groups: label, count)
# metric_pattern = '(?m)^(\w+):\s*(\d+)$'

[[target]]
name = "arelle"
program = "python3"
args = ["-m", "arelle.CntlrCmdLine", "--file", "{input}", "--skipDTS", "--logLevel", "ERROR"]

[[input]]
label = "Tiny (10 facts)"
path = "test_data/test_tiny.xbrl"

[[input]]
label = "Medium (1K facts)"
path = "test_data/test_medium.xbrl"
"#
        .to_string()
    }
}

/// Parse a duration string (e.g., "30s", "500ms", "2m").
pub fn parse_duration(s: &str) -> anyhow::Result<Duration> {
    let s = s.trim();
    if s.is_empty() {
        anyhow::bail!("empty duration string");
    }

    let (num_part, unit_part) = s
        .char_indices()
        .find(|(_, c)| c.is_alphabetic())
        .map(|(i, _)| s.split_at(i))
        .unwrap_or((s, "s"));

    let value: f64 = num_part
        .parse()
        .map_err(|_| anyhow::anyhow!("invalid duration number: {}", num_part))?;
    if value < 0.0 {
        anyhow::bail!("duration must not be negative: {}", s);
    }

    let nanos: f64 = match unit_part.to_lowercase().as_str() {
        "ns" => 1.0,
        "us" | "µs" => 1e3,
        "ms" => 1e6,
        "s" | "" => 1e9,
        "m" | "min" => 60.0 * 1e9,
        other => anyhow::bail!("unknown duration unit: {}", other),
    };

    Ok(Duration::from_nanos((value * nanos) as u64))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_values() {
        let config = BenchConfig::default();
        assert_eq!(config.runner.runs, 5);
        assert_eq!(config.runner.timeout, "30s");
        assert!(config.target.is_empty());
    }

    #[test]
    fn parse_duration_units() {
        assert_eq!(parse_duration("30s").unwrap(), Duration::from_secs(30));
        assert_eq!(parse_duration("500ms").unwrap(), Duration::from_millis(500));
        assert_eq!(parse_duration("100us").unwrap(), Duration::from_micros(100));
        assert_eq!(parse_duration("2m").unwrap(), Duration::from_secs(120));
        assert_eq!(parse_duration("1.5s").unwrap(), Duration::from_millis(1500));
        assert!(parse_duration("").is_err());
        assert!(parse_duration("5 parsecs").is_err());
    }

    #[test]
    fn parse_full_toml() {
        let toml_str = r#"
            [runner]
            runs = 3
            timeout = "10s"

            [[target]]
            name = "crabrl"
            program = "target/release/crabrl"
            args = ["parse", "{input}"]

            [[target]]
            name = "arelle"
            program = "python3"
            args = ["-m", "arelle.CntlrCmdLine", "--file", "{input}"]

            [[input]]
            label = "Medium (1K facts)"
            path = "test_data/test_medium.xbrl"
        "#;

        let config: BenchConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.runner.runs, 3);

        let targets = config.build_targets().unwrap();
        assert_eq!(targets.len(), 2);
        assert_eq!(targets[0].name, "crabrl");

        let inputs = config.build_inputs().unwrap();
        assert_eq!(inputs[0].label, "Medium (1K facts)");

        let (runs, timeout) = config.build_runner().unwrap();
        assert_eq!(runs, 3);
        assert_eq!(timeout, Duration::from_secs(10));
    }

    #[test]
    fn runner_defaults_apply_when_section_missing() {
        let config: BenchConfig = toml::from_str(
            r#"
            [[target]]
            name = "t"
            program = "/bin/true"
            args = ["{input}"]

            [[input]]
            label = "x"
            path = "x.xml"
        "#,
        )
        .unwrap();

        let (runs, timeout) = config.build_runner().unwrap();
        assert_eq!(runs, 5);
        assert_eq!(timeout, Duration::from_secs(30));
    }

    #[test]
    fn empty_targets_are_fatal() {
        let config = BenchConfig::default();
        assert!(config.build_targets().is_err());
        assert!(config.build_inputs().is_err());
    }

    #[test]
    fn duplicate_target_names_are_fatal() {
        let config: BenchConfig = toml::from_str(
            r#"
            [[target]]
            name = "same"
            program = "/bin/a"
            args = ["{input}"]

            [[target]]
            name = "same"
            program = "/bin/b"
            args = ["{input}"]
        "#,
        )
        .unwrap();

        let err = config.build_targets().unwrap_err();
        assert!(err.to_string().contains("duplicate"));
    }

    #[test]
    fn zero_runs_and_zero_timeout_are_fatal() {
        let mut config = BenchConfig::default();
        config.runner.runs = 0;
        assert!(config.build_runner().is_err());

        config.runner.runs = 1;
        config.runner.timeout = "0s".to_string();
        assert!(config.build_runner().is_err());
    }

    #[test]
    fn default_toml_parses_and_validates() {
        let config: BenchConfig = toml::from_str(&BenchConfig::default_toml()).unwrap();
        assert!(config.build_targets().is_ok());
        assert!(config.build_inputs().is_ok());
        assert!(config.build_runner().is_ok());
    }
}
