use crate::decide::Thresholds;
use crate::error::CheckError;
use clap::Parser;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_PATH: &str = "/etc/oxmon/check.toml";

/// Command-line flags. Each one overrides the matching config-file key.
#[derive(Debug, Default, Parser)]
#[command(name = "oxmon-check")]
#[command(about = "Evaluate a check expression over Graphite metrics and report a Nagios status")]
pub struct CliArgs {
    /// Graphite render endpoint, e.g. https://graphite.example.com/render
    #[arg(short, long)]
    pub endpoint: Option<String>,

    /// Graphite username
    #[arg(short, long)]
    pub username: Option<String>,

    /// Graphite password
    #[arg(short, long)]
    pub password: Option<String>,

    /// Default metric lookback interval, e.g. 5minutes
    #[arg(short, long)]
    pub interval: Option<String>,

    /// Location of the config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Level for warning
    #[arg(short = 'W', long, allow_negative_numbers = true)]
    pub warning: Option<f64>,

    /// Level for critical
    #[arg(short = 'C', long, allow_negative_numbers = true)]
    pub critical: Option<f64>,

    /// Check expression to evaluate
    #[arg(short, long)]
    pub method: Option<String>,

    /// Render API request timeout in seconds
    #[arg(short, long)]
    pub timeout: Option<u64>,

    /// Log debug output to stderr
    #[arg(short, long)]
    pub verbose: bool,
}

/// Extra scalar exposed to check expressions as `*key*`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum OptionValue {
    Bool(bool),
    Number(f64),
    Text(String),
}

#[derive(Debug, Clone, Deserialize)]
pub struct CheckConfig {
    pub endpoint: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    #[serde(default = "default_interval")]
    pub interval: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    pub warning: Option<f64>,
    pub critical: Option<f64>,
    pub method: Option<String>,
    #[serde(default)]
    pub options: BTreeMap<String, OptionValue>,
}

fn default_interval() -> String {
    "30seconds".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for CheckConfig {
    fn default() -> Self {
        Self {
            endpoint: None,
            username: None,
            password: None,
            interval: default_interval(),
            timeout_secs: default_timeout_secs(),
            warning: None,
            critical: None,
            method: None,
            options: BTreeMap::new(),
        }
    }
}

/// What a single check run needs: the expression and its thresholds.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckRequest {
    pub method: String,
    pub thresholds: Thresholds,
}

impl CheckConfig {
    pub fn load(path: &Path) -> Result<Self, CheckError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| CheckError::Config(format!("failed to read '{}': {e}", path.display())))?;
        toml::from_str(&content)
            .map_err(|e| CheckError::Config(format!("failed to parse '{}': {e}", path.display())))
    }

    /// Load the file named by `--config` (or the default location, which may
    /// be absent) and apply the remaining flags on top.
    pub fn resolve(cli: &CliArgs) -> Result<Self, CheckError> {
        let mut config = match &cli.config {
            Some(path) => Self::load(path)?,
            None => {
                let path = Path::new(DEFAULT_CONFIG_PATH);
                if path.exists() {
                    Self::load(path)?
                } else {
                    Self::default()
                }
            }
        };
        config.apply_overrides(cli);
        Ok(config)
    }

    pub fn apply_overrides(&mut self, cli: &CliArgs) {
        let strings = [
            (&mut self.endpoint, &cli.endpoint),
            (&mut self.username, &cli.username),
            (&mut self.password, &cli.password),
            (&mut self.method, &cli.method),
        ];
        for (slot, flag) in strings {
            if let Some(value) = flag {
                *slot = Some(value.clone());
            }
        }
        if let Some(interval) = &cli.interval {
            self.interval = interval.clone();
        }
        if let Some(timeout) = cli.timeout {
            self.timeout_secs = timeout;
        }
        if cli.warning.is_some() {
            self.warning = cli.warning;
        }
        if cli.critical.is_some() {
            self.critical = cli.critical;
        }
    }

    /// Method and thresholds, or a usage error naming what is missing.
    pub fn check_request(&self) -> Result<CheckRequest, CheckError> {
        match (&self.method, self.warning, self.critical) {
            (Some(method), Some(warning), Some(critical)) => Ok(CheckRequest {
                method: method.clone(),
                thresholds: Thresholds { warning, critical },
            }),
            (method, warning, critical) => {
                let missing: Vec<&str> = [
                    ("warning", warning.is_none()),
                    ("critical", critical.is_none()),
                    ("method", method.is_none()),
                ]
                .into_iter()
                .filter_map(|(name, absent)| absent.then_some(name))
                .collect();
                Err(CheckError::Usage(format!(
                    "must specify warning, critical, and method (missing: {})",
                    missing.join(", ")
                )))
            }
        }
    }
}
