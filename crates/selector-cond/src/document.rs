//! Condition documents
//!
//! Builds expressions from untyped JSON (or YAML decoded into JSON values):
//!
//! ```json
//! {"or": [
//!   {"and": [{"tag": "a"}, {"text": {"value": "Go", "match": "contains"}}]},
//!   {"tag": "button"}
//! ]}
//! ```
//!
//! Atom nodes are `{"tag": NAME}`, `{"attr": {"name", "value", "match"}}`
//! (`"locator"` and `"op"` are accepted aliases) and `{"text": VALUE}` or
//! `{"text": {"value", "match"}}`. A bare array means AND. `match` defaults
//! to `equals`. Any field of the wrong type is an invalid predicate.

use serde_json::{Map, Value};

use crate::errors::{CondError, CondResult};
use crate::expr::CondExpr;
use crate::selector::Selector;
use crate::types::{AttrCond, AttrMatch, Cond, TagCond, TextCond, TextMatch};

/// Parse a condition document into a normal-form expression
pub fn parse_cond(value: &Value) -> CondResult<CondExpr> {
    match value {
        Value::Array(items) => fold(items, "and", |acc, next| acc.and_(next)),
        Value::Object(map) => {
            let (key, body) = single_entry(map)?;
            match key {
                "and" => fold(expect_list(body, "and")?, "and", |acc, next| acc.and_(next)),
                "or" => fold(expect_list(body, "or")?, "or", |acc, next| acc.or_(next)),
                _ => Ok(parse_atom_entry(key, body)?.into()),
            }
        }
        other => Err(invalid(format!(
            "expected a condition object or list, found {}",
            type_name(other)
        ))),
    }
}

/// Parse a document into a merged selector
///
/// Only atoms, lists of atoms and `and` nodes are accepted; the merged form
/// has no alternation.
pub fn parse_selector(value: &Value) -> CondResult<Selector> {
    match value {
        Value::Array(items) => merge_selectors(items),
        Value::Object(map) => {
            let (key, body) = single_entry(map)?;
            match key {
                "and" => merge_selectors(expect_list(body, "and")?),
                "or" => Err(CondError::UnsupportedDisjunction(
                    body.as_array().map(Vec::len).unwrap_or(0),
                )),
                _ => Ok(parse_atom_entry(key, body)?.into()),
            }
        }
        other => Err(invalid(format!(
            "expected a selector object or list, found {}",
            type_name(other)
        ))),
    }
}

/// Parse a single atom node
pub fn parse_atom(value: &Value) -> CondResult<Cond> {
    let map = value
        .as_object()
        .ok_or_else(|| invalid(format!("expected an atom object, found {}", type_name(value))))?;
    let (key, body) = single_entry(map)?;
    parse_atom_entry(key, body)
}

fn fold(
    items: &[Value],
    op: &str,
    combine: impl Fn(&CondExpr, CondExpr) -> CondExpr,
) -> CondResult<CondExpr> {
    let (first, rest) = items
        .split_first()
        .ok_or_else(|| invalid(format!("'{}' needs at least one operand", op)))?;
    let mut acc = parse_cond(first)?;
    for item in rest {
        acc = combine(&acc, parse_cond(item)?);
    }
    Ok(acc)
}

fn merge_selectors(items: &[Value]) -> CondResult<Selector> {
    if items.is_empty() {
        return Err(invalid("'and' needs at least one operand".to_string()));
    }
    let mut merged = Selector::new();
    for item in items {
        merged = merged.and(parse_selector(item)?);
    }
    Ok(merged)
}

fn parse_atom_entry(key: &str, body: &Value) -> CondResult<Cond> {
    match key {
        "tag" => Ok(TagCond::parse(expect_str(body, "tag")?)?.into()),
        "attr" | "locator" => parse_attr(body).map(Cond::from),
        "text" => parse_text(body).map(Cond::from),
        other => Err(invalid(format!(
            "unknown condition '{}' (expected tag, attr, text, and, or)",
            other
        ))),
    }
}

fn parse_attr(body: &Value) -> CondResult<AttrCond> {
    let map = body
        .as_object()
        .ok_or_else(|| invalid(format!("'attr' expects an object, found {}", type_name(body))))?;
    let name = required_str(map, "name", "attr")?;
    let value = required_str(map, "value", "attr")?;
    let op = match match_field(map, "attr")? {
        Some(raw) => raw.parse()?,
        None => AttrMatch::default(),
    };
    AttrCond::new(name, value, op)
}

fn parse_text(body: &Value) -> CondResult<TextCond> {
    match body {
        Value::String(value) => TextCond::new(value.as_str(), TextMatch::default()),
        Value::Object(map) => {
            let value = required_str(map, "value", "text")?;
            let mode = match match_field(map, "text")? {
                Some(raw) => raw.parse()?,
                None => TextMatch::default(),
            };
            TextCond::new(value, mode)
        }
        other => Err(invalid(format!(
            "'text' expects a string or object, found {}",
            type_name(other)
        ))),
    }
}

fn match_field<'a>(map: &'a Map<String, Value>, atom: &str) -> CondResult<Option<&'a str>> {
    match map.get("match").or_else(|| map.get("op")) {
        None | Some(Value::Null) => Ok(None),
        Some(value) => expect_str(value, &format!("{}.match", atom)).map(Some),
    }
}

fn single_entry(map: &Map<String, Value>) -> CondResult<(&str, &Value)> {
    let mut entries = map.iter();
    match (entries.next(), entries.next()) {
        (Some((key, body)), None) => Ok((key.as_str(), body)),
        _ => Err(invalid(format!(
            "condition node must have exactly one key, found {}",
            map.len()
        ))),
    }
}

fn required_str<'a>(map: &'a Map<String, Value>, field: &str, atom: &str) -> CondResult<&'a str> {
    let value = map
        .get(field)
        .ok_or_else(|| invalid(format!("'{}' is missing required field '{}'", atom, field)))?;
    expect_str(value, &format!("{}.{}", atom, field))
}

fn expect_str<'a>(value: &'a Value, field: &str) -> CondResult<&'a str> {
    value.as_str().ok_or_else(|| {
        invalid(format!(
            "'{}' must be a string, found {}",
            field,
            type_name(value)
        ))
    })
}

fn expect_list<'a>(value: &'a Value, op: &str) -> CondResult<&'a [Value]> {
    value.as_array().map(Vec::as_slice).ok_or_else(|| {
        invalid(format!(
            "'{}' expects a list of conditions, found {}",
            op,
            type_name(value)
        ))
    })
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}

fn invalid(message: String) -> CondError {
    CondError::InvalidPredicate(message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_nested_document() {
        let doc = json!({"or": [
            {"and": [{"tag": "a"}, {"text": {"value": "Go", "match": "contains"}}]},
            {"tag": "button"}
        ]});
        let expr = parse_cond(&doc).unwrap();
        assert_eq!(
            expr.to_xpath(),
            ".//a[contains(normalize-space(), 'Go')] | .//button"
        );
    }

    #[test]
    fn list_means_and() {
        let doc = json!([
            {"tag": "input"},
            {"attr": {"name": "type", "value": "text"}}
        ]);
        assert_eq!(parse_cond(&doc).unwrap().to_xpath(), ".//input[@type = 'text']");
    }

    #[test]
    fn accepts_locator_and_op_aliases() {
        let doc = json!({"locator": {"name": "href", "value": "x", "op": "endswith"}});
        let cond = parse_atom(&doc).unwrap();
        assert_eq!(cond, Cond::Attr(AttrCond::ends_with("href", "x").unwrap()));
    }

    #[test]
    fn text_shorthand_defaults_to_equals() {
        let cond = parse_atom(&json!({"text": "Submit"})).unwrap();
        assert_eq!(cond, Cond::Text(TextCond::equals("Submit").unwrap()));
    }

    #[test]
    fn non_string_fields_are_invalid() {
        for doc in [
            json!({"tag": 3}),
            json!({"attr": {"name": "id", "value": 7}}),
            json!({"attr": {"name": null, "value": "x"}}),
            json!({"attr": {"name": "id", "value": "x", "match": true}}),
            json!({"text": ["a"]}),
            json!({"text": {"value": "a", "match": 1}}),
        ] {
            let err = parse_cond(&doc).unwrap_err();
            assert!(matches!(err, CondError::InvalidPredicate(_)), "{}", doc);
        }
    }

    #[test]
    fn unknown_modes_and_keys_are_invalid() {
        for doc in [
            json!({"attr": {"name": "id", "value": "x", "match": "regex"}}),
            json!({"text": {"value": "a", "match": "startswith"}}),
            json!({"xpath": ".//a"}),
            json!({"tag": "svg:path"}),
            json!({"tag": "a", "text": "b"}),
            json!({"and": []}),
            json!({"or": {"tag": "a"}}),
            json!("a"),
        ] {
            let err = parse_cond(&doc).unwrap_err();
            assert!(matches!(err, CondError::InvalidPredicate(_)), "{}", doc);
        }
    }

    #[test]
    fn conflicting_document_is_unsatisfiable_not_an_error() {
        let doc = json!({"and": [{"tag": "div"}, {"tag": "span"}]});
        let expr = parse_cond(&doc).unwrap();
        assert!(expr.is_empty());
    }

    #[test]
    fn selector_document_merges() {
        let doc = json!([
            {"tag": "div"},
            {"attr": {"name": "class", "value": "a b"}},
            {"tag": "span"}
        ]);
        let selector = parse_selector(&doc).unwrap();
        assert_eq!(selector.to_css().unwrap(), "span.a.b");
    }

    #[test]
    fn selector_document_rejects_or() {
        let doc = json!({"or": [{"tag": "a"}, {"tag": "b"}]});
        assert_eq!(
            parse_selector(&doc).unwrap_err(),
            CondError::UnsupportedDisjunction(2)
        );
    }

    #[test]
    fn yaml_documents_decode_to_the_same_expression() {
        let yaml = r#"
or:
  - and:
      - tag: a
      - text: { value: Go, match: contains }
  - tag: button
"#;
        let value: Value = serde_yaml::from_str(yaml).unwrap();
        let expr = parse_cond(&value).unwrap();
        assert_eq!(expr.len(), 2);
    }
}
