use anyhow::{Context, Result};
use autoweb_cli::OutputFormat;
use serde::Serialize;

/// Print `human` or the serialized `payload`, depending on the format
pub fn emit<T: Serialize>(format: OutputFormat, human: &str, payload: &T) -> Result<()> {
    match format {
        OutputFormat::Human => println!("{}", human),
        OutputFormat::Json => {
            let text = serde_json::to_string_pretty(payload).context("Failed to encode JSON")?;
            println!("{}", text);
        }
        OutputFormat::Yaml => {
            let text = serde_yaml::to_string(payload).context("Failed to encode YAML")?;
            print!("{}", text);
        }
    }
    Ok(())
}
