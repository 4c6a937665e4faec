use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use autoweb_cli::{compile_document, compile_merged_document, CompileTarget};
use clap::Args;
use tokio::fs;
use tokio::io::AsyncReadExt;

use super::context::CliContext;
use super::output::emit;

#[derive(Args, Clone, Debug)]
pub struct CompileArgs {
    /// Condition document (YAML or JSON); `-` reads stdin
    #[arg(long, short, value_name = "FILE")]
    pub input: PathBuf,

    /// Compile target (defaults to the configured target)
    #[arg(long, short, value_enum)]
    pub target: Option<CompileTarget>,

    /// Print the WebDriver request body instead of the bare query
    #[arg(long)]
    pub locator: bool,

    /// Merge every condition into one clause; later tag and text win
    #[arg(long)]
    pub merged: bool,
}

pub async fn cmd_compile(args: CompileArgs, ctx: &CliContext) -> Result<()> {
    let text = read_input(&args.input).await?;
    let target = ctx.target(args.target);
    let compiled = if args.merged {
        compile_merged_document(&text, target)
    } else {
        compile_document(&text, target)
    };
    let compiled = compiled
        .with_context(|| format!("Failed to compile {}", args.input.display()))?;

    if args.locator {
        let human = serde_json::to_string(&compiled.webdriver)?;
        return emit(ctx.output(), &human, &compiled.webdriver);
    }
    emit(ctx.output(), &compiled.query, &compiled)
}

async fn read_input(path: &Path) -> Result<String> {
    if path.as_os_str() == "-" {
        let mut text = String::new();
        tokio::io::stdin()
            .read_to_string(&mut text)
            .await
            .context("Failed to read condition document from stdin")?;
        return Ok(text);
    }
    fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read condition document {}", path.display()))
}
