//! Path query compiler (XPath 1.0)
//!
//! Every clause becomes a descendant step relative to the context node,
//! `.//tag[pred and pred ...]`, and clauses are alternated with `" | "`.

use crate::clause::AndClause;
use crate::expr::CondExpr;
use crate::literal::xpath_literal;
use crate::types::{AttrCond, AttrMatch, TextCond, TextMatch};

/// Query emitted for an expression with no clauses; valid, never matches
pub const NO_MATCH_XPATH: &str = ".//*[false()]";

const ALTERNATION: &str = " | ";

/// Compile a normal-form expression into an XPath union
pub fn compile_path_query(expr: &CondExpr) -> String {
    if expr.is_empty() {
        return NO_MATCH_XPATH.to_string();
    }
    expr.clauses()
        .iter()
        .map(compile_clause)
        .collect::<Vec<_>>()
        .join(ALTERNATION)
}

/// Compile a single clause into one location step
pub fn compile_clause(clause: &AndClause) -> String {
    let tag = clause.tag().map(|tag| tag.name()).unwrap_or("*");
    let predicates: Vec<String> = clause
        .attrs()
        .iter()
        .map(attr_predicate)
        .chain(clause.texts().iter().map(text_predicate))
        .collect();

    if predicates.is_empty() {
        format!(".//{}", tag)
    } else {
        format!(".//{}[{}]", tag, predicates.join(" and "))
    }
}

fn attr_predicate(attr: &AttrCond) -> String {
    let attr_ref = format!("@{}", attr.name());
    let literal = xpath_literal(attr.value());
    match attr.op() {
        AttrMatch::Equals => format!("{} = {}", attr_ref, literal),
        AttrMatch::Contains => format!("contains({}, {})", attr_ref, literal),
        AttrMatch::StartsWith => format!("starts-with({}, {})", attr_ref, literal),
        AttrMatch::EndsWith => {
            // XPath 1.0 has no ends-with(); compare the trailing substring.
            // string-length() counts characters, so the offset does too.
            let len = attr.value().chars().count();
            if len == 0 {
                return "true()".to_string();
            }
            format!(
                "substring({attr}, string-length({attr}) - {offset}) = {literal}",
                attr = attr_ref,
                offset = len - 1,
                literal = literal
            )
        }
    }
}

fn text_predicate(text: &TextCond) -> String {
    let literal = xpath_literal(text.value());
    match text.mode() {
        TextMatch::Equals => format!("normalize-space() = {}", literal),
        TextMatch::Contains => format!("contains(normalize-space(), {})", literal),
    }
}
