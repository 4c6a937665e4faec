//! String literal escaping for the compile targets

/// Quote `value` as an XPath 1.0 string literal
///
/// XPath literals have no escape sequence for their own delimiter, so a
/// value holding both quote characters is rebuilt with `concat()`: the value
/// is split on `'`, every non-empty part is single-quoted and a `"'"` term
/// sits between each pair of adjacent parts.
pub fn xpath_literal(value: &str) -> String {
    if !value.contains('\'') {
        return format!("'{}'", value);
    }
    if !value.contains('"') {
        return format!("\"{}\"", value);
    }

    let mut terms = Vec::new();
    for (idx, part) in value.split('\'').enumerate() {
        if idx > 0 {
            terms.push("\"'\"".to_string());
        }
        if !part.is_empty() {
            terms.push(format!("'{}'", part));
        }
    }
    format!("concat({})", terms.join(", "))
}

/// Quote `value` as a single-quoted CSS string
pub fn css_string(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('\'');
    for c in value.chars() {
        match c {
            '\'' | '\\' => {
                out.push('\\');
                out.push(c);
            }
            c if c.is_control() => push_hex_escape(&mut out, c),
            c => out.push(c),
        }
    }
    out.push('\'');
    out
}

/// Escape `value` for use as a CSS identifier (tag, attribute or class name)
///
/// An identifier may not start with a digit, with `-` followed by a digit,
/// or be a lone `-`.
pub fn css_ident(value: &str) -> String {
    if value == "-" {
        return "\\-".to_string();
    }
    let dash_lead = value.starts_with('-');
    let mut out = String::with_capacity(value.len());
    for (idx, c) in value.chars().enumerate() {
        let leading_digit = c.is_ascii_digit() && (idx == 0 || (idx == 1 && dash_lead));
        if c.is_control() || leading_digit {
            push_hex_escape(&mut out, c);
        } else if c.is_ascii_alphanumeric() || c == '-' || c == '_' || !c.is_ascii() {
            out.push(c);
        } else {
            out.push('\\');
            out.push(c);
        }
    }
    out
}

fn push_hex_escape(out: &mut String, c: char) {
    // trailing space terminates the escape
    out.push_str(&format!("\\{:x} ", c as u32));
}
