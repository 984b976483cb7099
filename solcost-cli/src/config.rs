//! Configuration loading from solcost.toml
//!
//! Configuration can be specified in a `solcost.toml` file discovered by
//! walking up from the current directory. Every section is optional and
//! defaulted; CLI flags override whatever the file provides.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Solcost configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SolcostConfig {
    /// Estimator invocation configuration
    #[serde(default)]
    pub oracle: OracleConfig,
    /// Trial sampling configuration
    #[serde(default)]
    pub sampling: SamplingConfig,
    /// Contract discovery configuration
    #[serde(default)]
    pub contracts: ContractsConfig,
    /// Output configuration
    #[serde(default)]
    pub output: OutputConfig,
}

/// Estimator invocation configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OracleConfig {
    /// Program to run (e.g. "node")
    #[serde(default = "default_command")]
    pub command: String,
    /// Estimator script passed before the contract path
    #[serde(default = "default_script")]
    pub script: String,
    /// Per-trial timeout (e.g. "60s", "2m")
    #[serde(default = "default_timeout")]
    pub timeout: String,
}

impl Default for OracleConfig {
    fn default() -> Self {
        Self {
            command: default_command(),
            script: default_script(),
            timeout: default_timeout(),
        }
    }
}

fn default_command() -> String {
    "node".to_string()
}
fn default_script() -> String {
    "estimateBytesize.js".to_string()
}
fn default_timeout() -> String {
    "60s".to_string()
}

/// Trial sampling configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SamplingConfig {
    /// Trials per contract
    #[serde(default = "default_trials")]
    pub trials: usize,
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self {
            trials: default_trials(),
        }
    }
}

fn default_trials() -> usize {
    10
}

/// Contract discovery configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContractsConfig {
    /// Source file extension to discover
    #[serde(default = "default_extension")]
    pub extension: String,
}

impl Default for ContractsConfig {
    fn default() -> Self {
        Self {
            extension: default_extension(),
        }
    }
}

fn default_extension() -> String {
    "sol".to_string()
}

/// Output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Default output format: "csv", "json", "human"
    #[serde(default = "default_format")]
    pub format: String,
    /// Report file path
    #[serde(default = "default_output_path")]
    pub path: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: default_format(),
            path: default_output_path(),
        }
    }
}

fn default_format() -> String {
    "csv".to_string()
}
fn default_output_path() -> String {
    "contract_estimates.csv".to_string()
}

impl SolcostConfig {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    /// Try to discover and load configuration by walking up from the
    /// current directory
    pub fn discover() -> Option<Self> {
        let mut dir = std::env::current_dir().ok()?;
        loop {
            let config_path = dir.join("solcost.toml");
            if config_path.exists() {
                return Self::load(&config_path).ok();
            }
            if !dir.pop() {
                break;
            }
        }
        None
    }

    /// Parse a duration string (e.g. "60s", "500ms", "2m")
    pub fn parse_duration(s: &str) -> anyhow::Result<Duration> {
        let s = s.trim();
        if s.is_empty() {
            return Err(anyhow::anyhow!("Empty duration string"));
        }

        let (num_part, unit_part) = s
            .char_indices()
            .find(|(_, c)| c.is_alphabetic())
            .map(|(i, _)| s.split_at(i))
            .unwrap_or((s, "s"));

        let value: f64 = num_part
            .parse()
            .map_err(|_| anyhow::anyhow!("Invalid duration number: {}", num_part))?;

        let nanos: u64 = match unit_part.to_lowercase().as_str() {
            "ms" => 1_000_000,
            "s" | "" => 1_000_000_000,
            "m" | "min" => 60_000_000_000,
            _ => return Err(anyhow::anyhow!("Unknown duration unit: {}", unit_part)),
        };

        Ok(Duration::from_nanos((value * nanos as f64) as u64))
    }

    /// Generate a default configuration as TOML string
    pub fn default_toml() -> String {
        r#"# Solcost Configuration

[oracle]
# Program that runs the estimator
command = "node"
# Estimator script; receives the contract path as its sole argument
script = "estimateBytesize.js"
# Per-trial timeout
timeout = "60s"

[sampling]
# Trials per contract
trials = 10

[contracts]
# Source file extension to discover
extension = "sol"

[output]
# Default output format: csv, json, human
format = "csv"
# Report file path
path = "contract_estimates.csv"
"#
        .to_string()
    }
}
