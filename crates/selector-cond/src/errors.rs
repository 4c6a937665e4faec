//! Error types for the condition algebra

use thiserror::Error;

/// Condition error enumeration
///
/// Every variant is raised synchronously while building atoms, combining
/// clauses or compiling to a target grammar.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CondError {
    /// Malformed atom constructor arguments
    #[error("Invalid predicate: {0}")]
    InvalidPredicate(String),

    /// Two different tag names combined within one clause
    #[error("Tag conflict: clause already requires <{existing}>, cannot also require <{new}>")]
    TagConflict { existing: String, new: String },

    /// Predicate kind the target grammar cannot express
    #[error("Unsupported predicate: {0}")]
    UnsupportedPredicate(String),

    /// Several alternated clauses where the target only takes one
    #[error("Expression has {0} alternative clauses; a structural selector holds exactly one")]
    UnsupportedDisjunction(usize),

    /// Expression whose clause list is empty
    #[error("Expression is unsatisfiable: every clause was dropped")]
    Unsatisfiable,

    /// Plain locator with an unknown kind or an empty query
    #[error("Invalid locator: {0}")]
    InvalidLocator(String),
}

impl CondError {
    /// Check if the expression is valid but the chosen target cannot express it
    ///
    /// Callers use this to fall back from the structural selector to the
    /// path query.
    pub fn is_unrepresentable(&self) -> bool {
        matches!(
            self,
            CondError::UnsupportedPredicate(_) | CondError::UnsupportedDisjunction(_)
        )
    }

    /// Check if this is a tag conflict
    pub fn is_tag_conflict(&self) -> bool {
        matches!(self, CondError::TagConflict { .. })
    }
}

/// Result alias used across the crate
pub type CondResult<T> = Result<T, CondError>;
