use anyhow::Result;
use clap::Args;
use selector_cond::Locator;

use super::context::CliContext;
use super::output::emit;

#[derive(Args, Clone, Debug)]
pub struct LocatorArgs {
    /// Locator kind: id, name, tag, xpath, css, link, plink, class
    pub kind: String,

    /// Query for the locator
    pub query: String,
}

pub fn cmd_locator(args: LocatorArgs, ctx: &CliContext) -> Result<()> {
    let locator = Locator::parse(&args.kind, args.query)?;
    let payload = locator.webdriver_payload();
    emit(ctx.output(), &serde_json::to_string(&payload)?, &payload)
}
