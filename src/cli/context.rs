use std::path::{Path, PathBuf};

use autoweb_cli::{CompileTarget, Config, OutputFormat};

pub struct CliContext {
    config: Config,
    config_path: PathBuf,
    output_override: Option<OutputFormat>,
}

impl CliContext {
    pub fn new(config: Config, config_path: PathBuf, output_override: Option<OutputFormat>) -> Self {
        Self {
            config,
            config_path,
            output_override,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// `--output` if given, else the configured format
    pub fn output(&self) -> OutputFormat {
        self.output_override.unwrap_or(self.config.output)
    }

    /// `--target` if given, else the configured target
    pub fn target(&self, requested: Option<CompileTarget>) -> CompileTarget {
        requested.unwrap_or(self.config.default_target)
    }
}
