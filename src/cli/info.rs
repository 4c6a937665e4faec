use anyhow::Result;
use serde_json::json;

use super::context::CliContext;
use super::output::emit;

pub fn cmd_info(ctx: &CliContext) -> Result<()> {
    let config = ctx.config();
    let payload = json!({
        "version": env!("CARGO_PKG_VERSION"),
        "build_date": env!("BUILD_DATE"),
        "git_commit": env!("GIT_HASH"),
        "config_path": ctx.config_path().display().to_string(),
        "default_target": config.default_target,
        "output": config.output,
    });

    let human = format!(
        "autoweb v{}\nBuild Date: {}\nGit Commit: {}\nConfig: {}\nDefault Target: {:?}",
        env!("CARGO_PKG_VERSION"),
        env!("BUILD_DATE"),
        env!("GIT_HASH"),
        ctx.config_path().display(),
        config.default_target,
    );
    emit(ctx.output(), &human, &payload)
}
