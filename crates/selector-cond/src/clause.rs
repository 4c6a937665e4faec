//! Conjunctive clause
//!
//! An `AndClause` is one AND-combination of predicates: at most one tag,
//! then attribute and text predicates in insertion order. Clauses are values;
//! `append` and `merge` hand back a fresh clause and leave `self` untouched.

use serde::Serialize;

use crate::errors::{CondError, CondResult};
use crate::types::{AttrCond, Cond, TagCond, TextCond};

/// Single conjunction of predicates
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
pub struct AndClause {
    tag: Option<TagCond>,
    attrs: Vec<AttrCond>,
    texts: Vec<TextCond>,
}

impl AndClause {
    /// Create an empty clause (matches any element)
    pub fn new() -> Self {
        Self::default()
    }

    /// Clause holding one predicate; a single atom can never conflict
    pub fn from_cond(cond: impl Into<Cond>) -> Self {
        let mut clause = Self::new();
        match cond.into() {
            Cond::Tag(tag) => clause.tag = Some(tag),
            Cond::Attr(attr) => clause.attrs.push(attr),
            Cond::Text(text) => clause.texts.push(text),
        }
        clause
    }

    /// Assemble a clause from parts that cannot conflict
    pub(crate) fn from_parts(tag: Option<TagCond>, attrs: Vec<AttrCond>, texts: Vec<TextCond>) -> Self {
        Self { tag, attrs, texts }
    }

    /// Return a new clause with `cond` folded in
    ///
    /// Fails with [`CondError::TagConflict`] when the clause already requires
    /// a different tag. Re-adding the same tag is a no-op; attribute and text
    /// predicates are appended without deduplication.
    pub fn append(&self, cond: impl Into<Cond>) -> CondResult<Self> {
        let mut next = self.clone();
        match cond.into() {
            Cond::Tag(tag) => next.require_tag(tag)?,
            Cond::Attr(attr) => next.attrs.push(attr),
            Cond::Text(text) => next.texts.push(text),
        }
        Ok(next)
    }

    /// Predicate union of two clauses, `self`'s predicates first
    pub fn merge(&self, other: &AndClause) -> CondResult<Self> {
        let mut next = self.clone();
        if let Some(tag) = &other.tag {
            next.require_tag(tag.clone())?;
        }
        next.attrs.extend(other.attrs.iter().cloned());
        next.texts.extend(other.texts.iter().cloned());
        Ok(next)
    }

    fn require_tag(&mut self, tag: TagCond) -> CondResult<()> {
        match &self.tag {
            Some(existing) if existing.name() != tag.name() => Err(CondError::TagConflict {
                existing: existing.name().to_string(),
                new: tag.name().to_string(),
            }),
            Some(_) => Ok(()),
            None => {
                self.tag = Some(tag);
                Ok(())
            }
        }
    }

    pub fn tag(&self) -> Option<&TagCond> {
        self.tag.as_ref()
    }

    pub fn attrs(&self) -> &[AttrCond] {
        &self.attrs
    }

    pub fn texts(&self) -> &[TextCond] {
        &self.texts
    }
}
