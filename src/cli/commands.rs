use clap::Subcommand;

use super::compile::CompileArgs;
use super::escape::EscapeArgs;
use super::locator::LocatorArgs;

#[derive(Subcommand, Clone)]
pub enum Commands {
    /// Compile a condition document into an XPath or CSS query
    Compile(CompileArgs),

    /// Quote a value as an XPath or CSS string literal
    Escape(EscapeArgs),

    /// Build a WebDriver request body for a plain locator
    Locator(LocatorArgs),

    /// Show build information and effective configuration
    Info,
}
