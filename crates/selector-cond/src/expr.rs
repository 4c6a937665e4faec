//! Disjunctive normal form expressions
//!
//! A `CondExpr` is an ordered OR of [`AndClause`]s. Combining two expressions
//! never mutates either operand:
//! - `or_` concatenates the clause lists
//! - `and_` distributes, producing one fresh clause per pairing of a left
//!   clause with a right clause, and drops pairings whose tags conflict
//!
//! Atoms convert into one-clause expressions, so both operators accept
//! atoms and expressions alike. `&` and `|` are sugar for `and_` / `or_`.

use serde::Serialize;
use std::fmt;
use std::ops::{BitAnd, BitOr};
use tracing::{debug, warn};

use crate::clause::AndClause;
use crate::errors::CondResult;
use crate::locator::Locator;
use crate::selector::Selector;
use crate::types::{AttrCond, Cond, TagCond, TextCond};
use crate::xpath::compile_path_query;

/// OR of conjunctive clauses
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
pub struct CondExpr {
    clauses: Vec<AndClause>,
}

impl CondExpr {
    /// Expression with no clauses; it matches nothing
    pub fn unsatisfiable() -> Self {
        Self::default()
    }

    pub fn clauses(&self) -> &[AndClause] {
        &self.clauses
    }

    pub fn len(&self) -> usize {
        self.clauses.len()
    }

    /// Check if every clause was dropped, i.e. the expression can never match
    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    /// `self OR other`
    pub fn or_(&self, other: impl Into<CondExpr>) -> CondExpr {
        let other = other.into();
        let mut clauses = Vec::with_capacity(self.clauses.len() + other.clauses.len());
        clauses.extend(self.clauses.iter().cloned());
        clauses.extend(other.clauses);
        CondExpr { clauses }
    }

    /// `self AND other`, expanded by the distributive law
    pub fn and_(&self, other: impl Into<CondExpr>) -> CondExpr {
        let other = other.into();
        let mut clauses = Vec::with_capacity(self.clauses.len() * other.clauses.len());
        let mut dropped = 0usize;

        for left in &self.clauses {
            for right in &other.clauses {
                match left.merge(right) {
                    Ok(clause) => clauses.push(clause),
                    Err(err) => {
                        dropped += 1;
                        debug!(error = %err, "Dropping clause pairing that can never match");
                    }
                }
            }
        }

        if clauses.is_empty() && dropped > 0 {
            warn!(
                dropped,
                "AND left no satisfiable clause; expression matches nothing"
            );
        }

        CondExpr { clauses }
    }

    /// Compile to a path query (XPath 1.0)
    pub fn to_xpath(&self) -> String {
        compile_path_query(self)
    }

    /// Compile to a structural selector (CSS)
    ///
    /// Only a single clause without text predicates is representable.
    pub fn to_css(&self) -> CondResult<String> {
        Selector::try_from(self)?.to_css()
    }

    /// Path query locator for the lookup collaborator
    pub fn to_locator(&self) -> Locator {
        Locator::xpath(self.to_xpath())
    }
}

impl fmt::Display for CondExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_xpath())
    }
}

impl From<AndClause> for CondExpr {
    fn from(clause: AndClause) -> Self {
        CondExpr {
            clauses: vec![clause],
        }
    }
}

impl From<&CondExpr> for CondExpr {
    fn from(expr: &CondExpr) -> Self {
        expr.clone()
    }
}

impl From<Cond> for CondExpr {
    fn from(cond: Cond) -> Self {
        AndClause::from_cond(cond).into()
    }
}

macro_rules! impl_atom_into_expr {
    ($($atom:ty),*) => {
        $(
            impl From<$atom> for CondExpr {
                fn from(atom: $atom) -> Self {
                    AndClause::from_cond(atom).into()
                }
            }

            impl From<&$atom> for CondExpr {
                fn from(atom: &$atom) -> Self {
                    AndClause::from_cond(atom.clone()).into()
                }
            }
        )*
    };
}

impl_atom_into_expr!(TagCond, AttrCond, TextCond);

macro_rules! impl_cond_ops {
    ($($lhs:ty),*) => {
        $(
            impl<R: Into<CondExpr>> BitAnd<R> for $lhs {
                type Output = CondExpr;

                fn bitand(self, rhs: R) -> CondExpr {
                    CondExpr::from(self).and_(rhs)
                }
            }

            impl<R: Into<CondExpr>> BitOr<R> for $lhs {
                type Output = CondExpr;

                fn bitor(self, rhs: R) -> CondExpr {
                    CondExpr::from(self).or_(rhs)
                }
            }
        )*
    };
}

impl_cond_ops!(CondExpr, Cond, TagCond, AttrCond, TextCond);

impl<R: Into<CondExpr>> BitAnd<R> for &CondExpr {
    type Output = CondExpr;

    fn bitand(self, rhs: R) -> CondExpr {
        self.and_(rhs)
    }
}

impl<R: Into<CondExpr>> BitOr<R> for &CondExpr {
    type Output = CondExpr;

    fn bitor(self, rhs: R) -> CondExpr {
        self.or_(rhs)
    }
}
