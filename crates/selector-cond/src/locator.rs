//! Locators handed to the element lookup collaborator
//!
//! A `Locator` pairs a query string with the kind of query it is. Compiled
//! expressions produce `xpath` or `css` locators; the remaining kinds cover
//! plain lookups by id, name, tag, link text or class.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::fmt;
use std::str::FromStr;

use crate::errors::{CondError, CondResult};
use crate::literal::{css_ident, css_string};

/// Locator kind enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LocatorKind {
    Id,
    Name,
    Tag,
    XPath,
    Css,
    Link,
    #[serde(rename = "plink")]
    PartialLink,
    Class,
}

impl LocatorKind {
    /// Get kind short name as string
    pub fn name(&self) -> &'static str {
        match self {
            LocatorKind::Id => "id",
            LocatorKind::Name => "name",
            LocatorKind::Tag => "tag",
            LocatorKind::XPath => "xpath",
            LocatorKind::Css => "css",
            LocatorKind::Link => "link",
            LocatorKind::PartialLink => "plink",
            LocatorKind::Class => "class",
        }
    }

    /// Get all kinds
    pub fn all() -> Vec<LocatorKind> {
        vec![
            LocatorKind::Id,
            LocatorKind::Name,
            LocatorKind::Tag,
            LocatorKind::XPath,
            LocatorKind::Css,
            LocatorKind::Link,
            LocatorKind::PartialLink,
            LocatorKind::Class,
        ]
    }

    /// W3C WebDriver location strategy
    ///
    /// WebDriver has no id/name/class strategies; those are sent as CSS.
    pub fn webdriver_using(&self) -> &'static str {
        match self {
            LocatorKind::Id | LocatorKind::Name | LocatorKind::Class | LocatorKind::Css => {
                "css selector"
            }
            LocatorKind::Tag => "tag name",
            LocatorKind::XPath => "xpath",
            LocatorKind::Link => "link text",
            LocatorKind::PartialLink => "partial link text",
        }
    }
}

impl FromStr for LocatorKind {
    type Err = CondError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        LocatorKind::all()
            .into_iter()
            .find(|kind| kind.name() == normalized)
            .ok_or_else(|| {
                CondError::InvalidLocator(format!(
                    "unknown locator kind '{}' (expected one of id, name, tag, xpath, css, link, plink, class)",
                    s
                ))
            })
    }
}

impl fmt::Display for LocatorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Query string plus the kind of query it is
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Locator {
    kind: LocatorKind,
    query: String,
}

impl Locator {
    /// Create a locator; the query must not be blank
    pub fn new(kind: LocatorKind, query: impl Into<String>) -> CondResult<Self> {
        let query = query.into();
        if query.trim().is_empty() {
            return Err(CondError::InvalidLocator(format!(
                "{} locator query cannot be empty",
                kind
            )));
        }
        Ok(Self { kind, query })
    }

    /// Create a locator from a kind short name (`"id"`, `"plink"`, ...)
    pub fn parse(kind: &str, query: impl Into<String>) -> CondResult<Self> {
        Self::new(kind.parse()?, query)
    }

    pub(crate) fn xpath(query: String) -> Self {
        Self {
            kind: LocatorKind::XPath,
            query,
        }
    }

    pub(crate) fn css(query: String) -> Self {
        Self {
            kind: LocatorKind::Css,
            query,
        }
    }

    pub fn kind(&self) -> LocatorKind {
        self.kind
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    /// Query value in the form the WebDriver strategy expects
    pub fn webdriver_value(&self) -> String {
        match self.kind {
            LocatorKind::Id => format!("#{}", css_ident(&self.query)),
            LocatorKind::Name => format!("[name={}]", css_string(&self.query)),
            LocatorKind::Class => format!(".{}", css_ident(&self.query)),
            _ => self.query.clone(),
        }
    }

    /// Body of a WebDriver `Find Element(s)` request
    pub fn webdriver_payload(&self) -> Value {
        json!({
            "using": self.kind.webdriver_using(),
            "value": self.webdriver_value(),
        })
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.kind, self.query)
    }
}
