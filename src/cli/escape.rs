use anyhow::Result;
use clap::Args;
use selector_cond::literal::css_string;
use selector_cond::xpath_literal;
use serde_json::json;

use super::context::CliContext;
use super::output::emit;

#[derive(Args, Clone, Debug)]
pub struct EscapeArgs {
    /// Value to quote
    pub value: String,

    /// Quote for CSS instead of XPath
    #[arg(long)]
    pub css: bool,
}

pub fn cmd_escape(args: EscapeArgs, ctx: &CliContext) -> Result<()> {
    let literal = if args.css {
        css_string(&args.value)
    } else {
        xpath_literal(&args.value)
    };
    let payload = json!({
        "value": args.value,
        "literal": literal,
        "grammar": if args.css { "css" } else { "xpath" },
    });
    emit(ctx.output(), &literal, &payload)
}
