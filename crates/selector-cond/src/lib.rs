//! Condition algebra for element lookup
//!
//! This crate builds boolean combinations of element predicates and compiles
//! them into query strings for a lookup engine:
//! - Atoms: tag, attribute and text predicates
//! - AND/OR combination kept in disjunctive normal form
//! - XPath 1.0 output (primary) with safe literal quoting
//! - CSS output for a merged single clause (secondary)
//!
//! Nothing here executes queries; the output is a [`Locator`] or plain
//! query string for the driver.
//!
//! ```
//! use selector_cond::{AttrCond, TagCond, TextCond};
//!
//! let link = TagCond::new("a")? & TextCond::contains("Go")?;
//! let expr = link | TagCond::new("button")?;
//! assert_eq!(
//!     expr.to_xpath(),
//!     ".//a[contains(normalize-space(), 'Go')] | .//button"
//! );
//!
//! let input = TagCond::new("input")? & AttrCond::equals("type", "text")?;
//! assert_eq!(input.to_xpath(), ".//input[@type = 'text']");
//! assert_eq!(input.to_css()?, "input[type='text']");
//! # Ok::<(), selector_cond::CondError>(())
//! ```

pub mod clause;
pub mod document;
pub mod errors;
pub mod expr;
pub mod literal;
pub mod locator;
pub mod selector;
pub mod types;
pub mod xpath;

pub use clause::AndClause;
pub use document::{parse_atom, parse_cond, parse_selector};
pub use errors::{CondError, CondResult};
pub use expr::CondExpr;
pub use literal::xpath_literal;
pub use locator::{Locator, LocatorKind};
pub use selector::{compile_structural_selector, Selector};
pub use types::{AttrCond, AttrMatch, Cond, TagCond, TextCond, TextMatch};
pub use xpath::{compile_path_query, NO_MATCH_XPATH};
