//! Configuration management module
//!
//! Holds the defaults the CLI falls back to when a flag is not given.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::env;
use std::str::FromStr;
use tracing::{info, warn};

/// Compile target for condition documents
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum CompileTarget {
    /// XPath 1.0 union of clauses
    #[default]
    Xpath,

    /// CSS selector; single clause without text predicates only
    Css,

    /// CSS when representable, XPath otherwise
    Auto,
}

impl FromStr for CompileTarget {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        <Self as ValueEnum>::from_str(s, true)
    }
}

/// Output format for command results
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Human,
    Json,
    Yaml,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        <Self as ValueEnum>::from_str(s, true)
    }
}

/// CLI configuration loaded from `config.yaml`
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Target used by `compile` when `--target` is omitted
    pub default_target: CompileTarget,

    /// Output format used when `--output` is omitted
    pub output: OutputFormat,
}

impl Config {
    /// Parse configuration from YAML text
    pub fn from_yaml_str(content: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(content)
    }

    /// Apply `AUTOWEB_TARGET` / `AUTOWEB_OUTPUT` environment overrides
    pub fn apply_env_overrides(&mut self) {
        if let Ok(raw) = env::var("AUTOWEB_TARGET") {
            match raw.parse::<CompileTarget>() {
                Ok(target) => {
                    self.default_target = target;
                    info!(compile_target = ?target, "Using compile target from AUTOWEB_TARGET");
                }
                Err(err) => warn!(value = %raw, %err, "ignoring invalid AUTOWEB_TARGET"),
            }
        }

        if let Ok(raw) = env::var("AUTOWEB_OUTPUT") {
            match raw.parse::<OutputFormat>() {
                Ok(output) => self.output = output,
                Err(err) => warn!(value = %raw, %err, "ignoring invalid AUTOWEB_OUTPUT"),
            }
        }
    }
}
