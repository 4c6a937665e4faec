//! Atomic predicates
//!
//! Three predicate kinds make up every condition:
//! - Tag: the element's tag name
//! - Attr: a named attribute compared against a value
//! - Text: the element's whitespace-normalized text content
//!
//! Atoms are immutable once built. Names are validated up front so the
//! compilers can splice them into query text without quoting. Namespace
//! prefixes (`svg:path`, `xlink:href`) are rejected: a prefixed XPath name
//! only resolves with a namespace resolver the lookup engine does not have.
//!
//! Deserializing an atom runs the same validation as its constructor.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::{CondError, CondResult};

/// Attribute match mode
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttrMatch {
    /// Exact value
    #[default]
    Equals,

    /// Substring anywhere in the value
    Contains,

    /// Value prefix
    StartsWith,

    /// Value suffix
    EndsWith,
}

impl AttrMatch {
    /// Get mode name as string
    pub fn name(&self) -> &'static str {
        match self {
            AttrMatch::Equals => "equals",
            AttrMatch::Contains => "contains",
            AttrMatch::StartsWith => "startswith",
            AttrMatch::EndsWith => "endswith",
        }
    }

    /// Native attribute operator of the structural selector grammar
    pub fn css_operator(&self) -> &'static str {
        match self {
            AttrMatch::Equals => "=",
            AttrMatch::Contains => "*=",
            AttrMatch::StartsWith => "^=",
            AttrMatch::EndsWith => "$=",
        }
    }
}

impl FromStr for AttrMatch {
    type Err = CondError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_mode(s).as_str() {
            "equals" | "eq" => Ok(AttrMatch::Equals),
            "contains" => Ok(AttrMatch::Contains),
            "startswith" => Ok(AttrMatch::StartsWith),
            "endswith" => Ok(AttrMatch::EndsWith),
            _ => Err(CondError::InvalidPredicate(format!(
                "unknown attribute match mode '{}' (expected equals, contains, startswith or endswith)",
                s
            ))),
        }
    }
}

impl fmt::Display for AttrMatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Text content match mode
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextMatch {
    /// Whole normalized text
    #[default]
    Equals,

    /// Substring of the normalized text
    Contains,
}

impl TextMatch {
    /// Get mode name as string
    pub fn name(&self) -> &'static str {
        match self {
            TextMatch::Equals => "equals",
            TextMatch::Contains => "contains",
        }
    }
}

impl FromStr for TextMatch {
    type Err = CondError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_mode(s).as_str() {
            "equals" | "eq" => Ok(TextMatch::Equals),
            "contains" => Ok(TextMatch::Contains),
            _ => Err(CondError::InvalidPredicate(format!(
                "unknown text match mode '{}' (expected equals or contains)",
                s
            ))),
        }
    }
}

impl fmt::Display for TextMatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// "starts_with", "Starts-With" and "startswith" all mean the same mode.
fn normalize_mode(raw: &str) -> String {
    raw.trim()
        .chars()
        .filter(|c| *c != '_' && *c != '-')
        .flat_map(char::to_lowercase)
        .collect()
}

/// Check that a tag or attribute name can be spliced into query text as-is
fn validate_name(kind: &str, name: &str) -> CondResult<()> {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return Err(CondError::InvalidPredicate(format!(
            "{} name cannot be empty",
            kind
        )));
    };
    let first_ok = first.is_alphabetic() || first == '_';
    let rest_ok = chars.all(|c| c.is_alphanumeric() || matches!(c, '-' | '_' | '.'));
    if first_ok && rest_ok {
        Ok(())
    } else {
        Err(CondError::InvalidPredicate(format!(
            "{} name '{}' is not a valid element or attribute name",
            kind, name
        )))
    }
}

/// Tag predicate
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawTagCond")]
pub struct TagCond {
    name: String,
}

impl TagCond {
    /// Create a tag predicate (`"span"`, `"input"`, ...)
    pub fn new(name: impl Into<String>) -> CondResult<Self> {
        let name = name.into();
        validate_name("tag", &name)?;
        Ok(Self { name })
    }

    /// Parse a tag name from free text; surrounding whitespace is ignored
    pub fn parse(raw: &str) -> CondResult<Self> {
        Self::new(raw.trim())
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Attribute predicate
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawAttrCond")]
pub struct AttrCond {
    name: String,
    value: String,
    #[serde(rename = "match")]
    op: AttrMatch,
}

impl AttrCond {
    /// Create an attribute predicate
    pub fn new(name: impl Into<String>, value: impl Into<String>, op: AttrMatch) -> CondResult<Self> {
        let name = name.into();
        validate_name("attribute", &name)?;
        Ok(Self {
            name,
            value: value.into(),
            op,
        })
    }

    /// Create an attribute predicate from a textual match mode
    pub fn parse(name: impl Into<String>, value: impl Into<String>, op: &str) -> CondResult<Self> {
        Self::new(name, value, op.parse()?)
    }

    pub fn equals(name: impl Into<String>, value: impl Into<String>) -> CondResult<Self> {
        Self::new(name, value, AttrMatch::Equals)
    }

    pub fn contains(name: impl Into<String>, value: impl Into<String>) -> CondResult<Self> {
        Self::new(name, value, AttrMatch::Contains)
    }

    pub fn starts_with(name: impl Into<String>, value: impl Into<String>) -> CondResult<Self> {
        Self::new(name, value, AttrMatch::StartsWith)
    }

    pub fn ends_with(name: impl Into<String>, value: impl Into<String>) -> CondResult<Self> {
        Self::new(name, value, AttrMatch::EndsWith)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn op(&self) -> AttrMatch {
        self.op
    }
}

/// Text content predicate
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawTextCond")]
pub struct TextCond {
    value: String,
    #[serde(rename = "match")]
    mode: TextMatch,
}

impl TextCond {
    /// Create a text predicate; any value, including an empty one, is accepted
    pub fn new(value: impl Into<String>, mode: TextMatch) -> CondResult<Self> {
        Ok(Self {
            value: value.into(),
            mode,
        })
    }

    /// Create a text predicate from a textual match mode
    pub fn parse(value: impl Into<String>, mode: &str) -> CondResult<Self> {
        Self::new(value, mode.parse()?)
    }

    pub fn equals(value: impl Into<String>) -> CondResult<Self> {
        Self::new(value, TextMatch::Equals)
    }

    pub fn contains(value: impl Into<String>) -> CondResult<Self> {
        Self::new(value, TextMatch::Contains)
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn mode(&self) -> TextMatch {
        self.mode
    }
}

/// Closed set of atomic predicates
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Cond {
    Tag(TagCond),
    Attr(AttrCond),
    Text(TextCond),
}

impl Cond {
    /// Get predicate kind as string
    pub fn kind(&self) -> &'static str {
        match self {
            Cond::Tag(_) => "tag",
            Cond::Attr(_) => "attr",
            Cond::Text(_) => "text",
        }
    }
}

// Wire shapes checked by the constructors before an atom exists.

#[derive(Deserialize)]
struct RawTagCond {
    name: String,
}

impl TryFrom<RawTagCond> for TagCond {
    type Error = CondError;

    fn try_from(raw: RawTagCond) -> CondResult<Self> {
        Self::new(raw.name)
    }
}

#[derive(Deserialize)]
struct RawAttrCond {
    name: String,
    value: String,
    #[serde(rename = "match", alias = "op", default)]
    op: AttrMatch,
}

impl TryFrom<RawAttrCond> for AttrCond {
    type Error = CondError;

    fn try_from(raw: RawAttrCond) -> CondResult<Self> {
        Self::new(raw.name, raw.value, raw.op)
    }
}

#[derive(Deserialize)]
struct RawTextCond {
    value: String,
    #[serde(rename = "match", default)]
    mode: TextMatch,
}

impl TryFrom<RawTextCond> for TextCond {
    type Error = CondError;

    fn try_from(raw: RawTextCond) -> CondResult<Self> {
        Self::new(raw.value, raw.mode)
    }
}

impl From<TagCond> for Cond {
    fn from(tag: TagCond) -> Self {
        Cond::Tag(tag)
    }
}

impl From<AttrCond> for Cond {
    fn from(attr: AttrCond) -> Self {
        Cond::Attr(attr)
    }
}

impl From<TextCond> for Cond {
    fn from(text: TextCond) -> Self {
        Cond::Text(text)
    }
}
