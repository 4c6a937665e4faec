//! Merged single-clause selector and its CSS compiler
//!
//! `Selector` is the reduced representation for the structural selector
//! grammar: no alternation, one optional tag and one optional text
//! predicate. Merging is lenient where the DNF algebra is strict:
//! - tag and text: the later operand wins
//! - attributes: order-preserving set union
//!
//! Text predicates survive merging (so `to_xpath` can use them) but cannot
//! be compiled to CSS.

use serde::Serialize;
use std::ops::BitAnd;

use crate::clause::AndClause;
use crate::errors::{CondError, CondResult};
use crate::expr::CondExpr;
use crate::literal::{css_ident, css_string};
use crate::locator::Locator;
use crate::types::{AttrCond, AttrMatch, Cond, TagCond, TextCond};
use crate::xpath::compile_clause;

/// Single merged clause
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Selector {
    tag: Option<TagCond>,
    attrs: Vec<AttrCond>,
    text: Option<TextCond>,
}

impl Selector {
    /// Create an empty selector (universal)
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge `other` into a new selector
    pub fn and(&self, other: impl Into<Selector>) -> Selector {
        let other = other.into();
        let mut attrs = self.attrs.clone();
        for attr in other.attrs {
            if !attrs.contains(&attr) {
                attrs.push(attr);
            }
        }
        Selector {
            tag: other.tag.or_else(|| self.tag.clone()),
            attrs,
            text: other.text.or_else(|| self.text.clone()),
        }
    }

    pub fn tag(&self) -> Option<&TagCond> {
        self.tag.as_ref()
    }

    pub fn attrs(&self) -> &[AttrCond] {
        &self.attrs
    }

    pub fn text(&self) -> Option<&TextCond> {
        self.text.as_ref()
    }

    /// Compile to a CSS selector
    pub fn to_css(&self) -> CondResult<String> {
        compile_structural_selector(self)
    }

    /// Compile the merged clause to a path query
    pub fn to_xpath(&self) -> String {
        compile_clause(&self.to_clause())
    }

    /// CSS locator for the lookup collaborator
    pub fn to_locator(&self) -> CondResult<Locator> {
        Ok(Locator::css(self.to_css()?))
    }

    fn to_clause(&self) -> AndClause {
        AndClause::from_parts(
            self.tag.clone(),
            self.attrs.clone(),
            self.text.iter().cloned().collect(),
        )
    }
}

/// Compile a merged selector into CSS
///
/// An equality match on `class` is split into one `.class` fragment per
/// whitespace-separated token; every other attribute uses the native
/// operators (`=`, `*=`, `^=`, `$=`).
pub fn compile_structural_selector(selector: &Selector) -> CondResult<String> {
    if let Some(text) = &selector.text {
        return Err(CondError::UnsupportedPredicate(format!(
            "text {} '{}' cannot be expressed as a CSS selector; compile to XPath instead",
            text.mode(),
            text.value()
        )));
    }

    let mut out = selector
        .tag
        .as_ref()
        .map(|tag| css_ident(tag.name()))
        .unwrap_or_default();
    let mut attr_parts = Vec::new();

    for attr in &selector.attrs {
        if attr.name() == "class" && attr.op() == AttrMatch::Equals && !attr.value().trim().is_empty() {
            // "p-input p-component" -> ".p-input.p-component"
            for class in attr.value().split_whitespace() {
                out.push('.');
                out.push_str(&css_ident(class));
            }
        } else {
            attr_parts.push(format!(
                "[{}{}{}]",
                css_ident(attr.name()),
                attr.op().css_operator(),
                css_string(attr.value())
            ));
        }
    }

    out.extend(attr_parts);
    if out.is_empty() {
        out.push('*');
    }
    Ok(out)
}

impl From<Cond> for Selector {
    fn from(cond: Cond) -> Self {
        let mut selector = Selector::new();
        match cond {
            Cond::Tag(tag) => selector.tag = Some(tag),
            Cond::Attr(attr) => selector.attrs.push(attr),
            Cond::Text(text) => selector.text = Some(text),
        }
        selector
    }
}

impl From<TagCond> for Selector {
    fn from(tag: TagCond) -> Self {
        Cond::Tag(tag).into()
    }
}

impl From<AttrCond> for Selector {
    fn from(attr: AttrCond) -> Self {
        Cond::Attr(attr).into()
    }
}

impl From<TextCond> for Selector {
    fn from(text: TextCond) -> Self {
        Cond::Text(text).into()
    }
}

impl From<&Selector> for Selector {
    fn from(selector: &Selector) -> Self {
        selector.clone()
    }
}

impl<R: Into<Selector>> BitAnd<R> for Selector {
    type Output = Selector;

    fn bitand(self, rhs: R) -> Selector {
        Selector::and(&self, rhs)
    }
}

impl TryFrom<&AndClause> for Selector {
    type Error = CondError;

    fn try_from(clause: &AndClause) -> Result<Self, Self::Error> {
        if clause.texts().len() > 1 {
            return Err(CondError::UnsupportedPredicate(format!(
                "a merged selector holds one text predicate, clause has {}",
                clause.texts().len()
            )));
        }
        Ok(Selector {
            tag: clause.tag().cloned(),
            attrs: clause.attrs().to_vec(),
            text: clause.texts().first().cloned(),
        })
    }
}

impl TryFrom<&CondExpr> for Selector {
    type Error = CondError;

    fn try_from(expr: &CondExpr) -> Result<Self, Self::Error> {
        match expr.clauses() {
            [] => Err(CondError::Unsatisfiable),
            [clause] => Selector::try_from(clause),
            clauses => Err(CondError::UnsupportedDisjunction(clauses.len())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tag(name: &str) -> TagCond {
        TagCond::new(name).unwrap()
    }

    #[test]
    fn class_equality_splits_into_dot_fragments() {
        let selector = Selector::from(AttrCond::equals("class", "a b").unwrap());
        assert_eq!(selector.to_css().unwrap(), ".a.b");
    }

    #[test]
    fn native_operators_per_mode() {
        let selector = Selector::from(tag("input"))
            & AttrCond::equals("type", "text").unwrap()
            & AttrCond::contains("name", "mail").unwrap()
            & AttrCond::starts_with("id", "f-").unwrap()
            & AttrCond::ends_with("class", "-lg").unwrap();
        assert_eq!(
            selector.to_css().unwrap(),
            "input[type='text'][name*='mail'][id^='f-'][class$='-lg']"
        );
    }

    #[test]
    fn class_fragments_follow_tag_before_attributes() {
        let selector = Selector::from(AttrCond::equals("name", "q").unwrap())
            & tag("input")
            & AttrCond::equals("class", "p-input  p-component").unwrap();
        assert_eq!(
            selector.to_css().unwrap(),
            "input.p-input.p-component[name='q']"
        );
    }

    #[test]
    fn class_tokens_are_valid_identifiers() {
        let selector = Selector::from(AttrCond::equals("class", "-1col - 2x").unwrap());
        assert_eq!(selector.to_css().unwrap(), ".-\\31 col.\\-.\\32 x");
    }

    #[test]
    fn empty_class_value_stays_an_attribute_test() {
        let selector = Selector::from(AttrCond::equals("class", "").unwrap());
        assert_eq!(selector.to_css().unwrap(), "[class='']");
    }

    #[test]
    fn empty_selector_is_universal() {
        assert_eq!(Selector::new().to_css().unwrap(), "*");
    }

    #[test]
    fn text_is_unsupported() {
        let selector = Selector::from(tag("a")) & TextCond::contains("Go").unwrap();
        let err = selector.to_css().unwrap_err();
        assert!(matches!(err, CondError::UnsupportedPredicate(_)));
        assert_eq!(
            selector.to_xpath(),
            ".//a[contains(normalize-space(), 'Go')]"
        );
    }

    #[test]
    fn later_tag_and_text_win() {
        let selector = Selector::from(tag("div"))
            & TextCond::equals("old").unwrap()
            & tag("span")
            & TextCond::equals("new").unwrap();
        assert_eq!(selector.tag().map(TagCond::name), Some("span"));
        assert_eq!(selector.text().map(TextCond::value), Some("new"));
    }

    #[test]
    fn attributes_are_deduplicated() {
        let attr = AttrCond::equals("role", "button").unwrap();
        let selector = Selector::from(attr.clone()) & attr.clone() & tag("div");
        assert_eq!(selector.attrs(), &[attr]);
    }

    #[test]
    fn values_are_css_escaped() {
        let selector = Selector::from(AttrCond::equals("title", "it's").unwrap());
        assert_eq!(selector.to_css().unwrap(), "[title='it\\'s']");
    }

    #[test]
    fn only_single_clause_expressions_convert() {
        let single = TagCond::new("input").unwrap() & AttrCond::equals("type", "text").unwrap();
        assert_eq!(single.to_css().unwrap(), "input[type='text']");

        let alternated = tag("a") | tag("button");
        assert_eq!(
            alternated.to_css().unwrap_err(),
            CondError::UnsupportedDisjunction(2)
        );

        let empty = tag("a") & tag("button");
        assert_eq!(empty.to_css().unwrap_err(), CondError::Unsatisfiable);
    }

    #[test]
    fn locator_uses_css_kind() {
        let locator = Selector::from(AttrCond::equals("id", "main").unwrap())
            .to_locator()
            .unwrap();
        assert_eq!(locator.query(), "[id='main']");
        assert_eq!(locator.kind(), crate::locator::LocatorKind::Css);
    }
}
