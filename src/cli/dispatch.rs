use super::compile::cmd_compile;
use super::escape::cmd_escape;
use super::info::cmd_info;
use super::locator::cmd_locator;
use crate::cli::commands::Commands;
use crate::cli::context::CliContext;
use crate::cli::env::CliArgs;
use anyhow::Result;

pub async fn dispatch(cli: &CliArgs, ctx: &CliContext) -> Result<()> {
    match cli.command.clone() {
        Commands::Compile(args) => cmd_compile(args, ctx).await,
        Commands::Escape(args) => cmd_escape(args, ctx),
        Commands::Locator(args) => cmd_locator(args, ctx),
        Commands::Info => cmd_info(ctx),
    }
}
