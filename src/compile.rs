//! Condition document compilation
//!
//! Decodes a YAML or JSON condition document, builds the normal-form
//! expression (or the merged single-clause selector) and compiles it for the
//! requested target.

use selector_cond::{parse_cond, parse_selector, CondError, CondExpr, Locator, LocatorKind, Selector};
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

use crate::config::CompileTarget;

/// Compile error enumeration
#[derive(Debug, Error)]
pub enum CompileError {
    /// Input is neither valid YAML nor JSON
    #[error("Failed to decode condition document: {0}")]
    Decode(#[from] serde_yaml::Error),

    /// Document decoded but the conditions are invalid or unrepresentable
    #[error(transparent)]
    Cond(#[from] CondError),
}

/// Result of compiling one condition document
#[derive(Debug, Clone, Serialize)]
pub struct CompiledQuery {
    /// Grammar the query is written in (`xpath` or `css`)
    pub kind: LocatorKind,

    /// Compiled query text
    pub query: String,

    /// Number of alternated clauses in the expression
    pub clauses: usize,

    /// False when every clause was dropped by tag conflicts
    pub satisfiable: bool,

    /// WebDriver `Find Element` request body
    pub webdriver: Value,
}

impl CompiledQuery {
    fn new(locator: &Locator, clauses: usize) -> Self {
        Self {
            kind: locator.kind(),
            query: locator.query().to_string(),
            clauses,
            satisfiable: clauses > 0,
            webdriver: locator.webdriver_payload(),
        }
    }
}

/// Decode YAML or JSON text (YAML is a JSON superset)
pub fn decode_document(text: &str) -> Result<Value, CompileError> {
    Ok(serde_yaml::from_str(text)?)
}

/// Compile an expression for `target`
pub fn compile_expr(expr: &CondExpr, target: CompileTarget) -> Result<CompiledQuery, CondError> {
    if expr.is_empty() {
        warn!("Condition is unsatisfiable; the compiled query matches nothing");
    }

    let locator = match target {
        CompileTarget::Xpath => expr.to_locator(),
        CompileTarget::Css => Selector::try_from(expr)?.to_locator()?,
        CompileTarget::Auto => match Selector::try_from(expr).and_then(|s| s.to_locator()) {
            Ok(locator) => locator,
            Err(err) if err.is_unrepresentable() || err == CondError::Unsatisfiable => {
                debug!(reason = %err, "CSS cannot express condition; falling back to XPath");
                expr.to_locator()
            }
            Err(err) => return Err(err),
        },
    };

    Ok(CompiledQuery::new(&locator, expr.len()))
}

/// Compile a merged selector for `target`
pub fn compile_selector(selector: &Selector, target: CompileTarget) -> Result<CompiledQuery, CondError> {
    let xpath = || Locator::new(LocatorKind::XPath, selector.to_xpath());
    let locator = match target {
        CompileTarget::Xpath => xpath()?,
        CompileTarget::Css => selector.to_locator()?,
        CompileTarget::Auto => match selector.to_locator() {
            Ok(locator) => locator,
            Err(err) if err.is_unrepresentable() => {
                debug!(reason = %err, "CSS cannot express merged selector; falling back to XPath");
                xpath()?
            }
            Err(err) => return Err(err),
        },
    };

    Ok(CompiledQuery::new(&locator, 1))
}

/// Decode, build and compile a condition document
pub fn compile_document(text: &str, target: CompileTarget) -> Result<CompiledQuery, CompileError> {
    let document = decode_document(text)?;
    let expr = parse_cond(&document)?;
    debug!(clauses = expr.len(), "Built condition expression");
    Ok(compile_expr(&expr, target)?)
}

/// Decode a document and compile it as one merged clause
///
/// Later tag and text predicates replace earlier ones instead of making the
/// document unsatisfiable; `or` nodes are rejected.
pub fn compile_merged_document(text: &str, target: CompileTarget) -> Result<CompiledQuery, CompileError> {
    let document = decode_document(text)?;
    let selector = parse_selector(&document)?;
    debug!(attrs = selector.attrs().len(), "Built merged selector");
    Ok(compile_selector(&selector, target)?)
}
