use std::env;
use std::fs as stdfs;
use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use autoweb_cli::Config;
use tokio::fs;
use tracing::{debug, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const LOCAL_ENV_PATH: &str = "config/local.env";

/// What `config/local.env` contributed to the process environment
///
/// The file is read before argument parsing so it can feed `RUST_LOG`, which
/// means nothing can be logged yet; call [`LocalEnvReport::log`] once the
/// subscriber is installed.
#[derive(Debug, Default)]
pub struct LocalEnvReport {
    path: PathBuf,
    found: bool,
    applied: Vec<String>,
    malformed: Vec<usize>,
    read_error: Option<String>,
}

impl LocalEnvReport {
    pub fn log(&self) {
        let path = self.path.display();
        if let Some(err) = &self.read_error {
            warn!(path = %path, error = %err, "Failed to read local env overrides");
            return;
        }
        if !self.found {
            return;
        }
        for line in &self.malformed {
            warn!(path = %path, line, "Skipping malformed local env entry");
        }
        info!(path = %path, applied = ?self.applied, "Loaded local env overrides");
    }
}

/// Export `KEY=VALUE` entries from `config/local.env`; variables already set
/// in the environment keep their value
pub fn load_local_env_overrides() -> LocalEnvReport {
    let mut report = LocalEnvReport {
        path: PathBuf::from(LOCAL_ENV_PATH),
        ..LocalEnvReport::default()
    };
    let contents = match stdfs::read_to_string(&report.path) {
        Ok(contents) => contents,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return report,
        Err(err) => {
            report.read_error = Some(err.to_string());
            return report;
        }
    };

    report.found = true;
    for (line, entry) in parse_env_entries(&contents) {
        match entry {
            Some((key, value)) => {
                if env::var_os(&key).is_none() {
                    env::set_var(&key, value);
                    report.applied.push(key);
                }
            }
            None => report.malformed.push(line),
        }
    }
    report
}

/// Entries keyed by 1-based line number; `None` marks a line with no key
fn parse_env_entries(contents: &str) -> Vec<(usize, Option<(String, String)>)> {
    contents
        .lines()
        .enumerate()
        .filter_map(|(idx, raw)| {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                return None;
            }
            let line = line.strip_prefix("export ").unwrap_or(line);
            let entry = line
                .split_once('=')
                .map(|(key, value)| (key.trim(), value.trim()))
                .filter(|(key, _)| !key.is_empty())
                .map(|(key, value)| (key.to_string(), unquote(value)));
            Some((idx + 1, entry))
        })
        .collect()
}

// Single quotes are literal; double quotes understand \n, \t, \r and \<char>.
fn unquote(value: &str) -> String {
    if let Some(inner) = value.strip_prefix('\'').and_then(|v| v.strip_suffix('\'')) {
        return inner.to_string();
    }
    let Some(inner) = value.strip_prefix('"').and_then(|v| v.strip_suffix('"')) else {
        return value.to_string();
    };

    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('r') => out.push('\r'),
            Some(other) => out.push(other),
            None => out.push('\\'),
        }
    }
    out
}

/// Install the global subscriber; logs go to stderr so stdout stays parseable
pub fn init_logging(level: &str, debug: bool) -> Result<()> {
    let level = if debug {
        tracing::Level::DEBUG
    } else {
        level.parse().context("Invalid log level")?
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level.to_string())),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    Ok(())
}

pub struct LoadedConfig {
    pub config: Config,
    pub path: PathBuf,
}

pub async fn load_config(config_path: Option<&PathBuf>) -> Result<LoadedConfig> {
    let explicit = config_path.is_some();
    let config_path = match config_path {
        Some(path) => path.clone(),
        None => default_config_path(),
    };

    if config_path.exists() {
        let content = fs::read_to_string(&config_path)
            .await
            .with_context(|| format!("Failed to read config file {}", config_path.display()))?;

        let config = Config::from_yaml_str(&content)
            .with_context(|| format!("Failed to parse config file {}", config_path.display()))?;

        info!("Loaded configuration from: {}", config_path.display());
        Ok(LoadedConfig {
            config,
            path: config_path,
        })
    } else {
        if explicit {
            warn!(
                "Config file not found, using defaults: {}",
                config_path.display()
            );
        } else {
            debug!("No config file at {}, using defaults", config_path.display());
        }
        Ok(LoadedConfig {
            config: Config::default(),
            path: config_path,
        })
    }
}

// Priority: ./config/config.yaml > ~/.config/autoweb/config.yaml
fn default_config_path() -> PathBuf {
    let local_config = PathBuf::from("config/config.yaml");
    if local_config.exists() {
        return local_config;
    }
    match dirs::config_dir() {
        Some(mut path) => {
            path.push("autoweb");
            path.push("config.yaml");
            path
        }
        None => local_config,
    }
}
