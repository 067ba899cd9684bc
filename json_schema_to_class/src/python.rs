//! Python literal rendering for JSON values.

use std::fmt::Write as _;

use serde_json::{Map, Number, Value};

/// Render `value` the way Python's `repr` renders the equivalent object.
pub fn literal(value: &Value) -> String {
    let mut out: String = String::new();
    write_literal(&mut out, value);
    out
}

/// Render an optional default; absent renders as `None`.
pub fn optional_literal(value: Option<&Value>) -> String {
    value.map_or_else(|| "None".to_string(), literal)
}

/// Render a JSON object as a Python dict, keys in document order.
pub fn dict_literal(map: &Map<String, Value>) -> String {
    let mut out: String = String::new();
    write_dict(&mut out, map);
    out
}

pub fn list_literal(values: &[Value]) -> String {
    let mut out: String = String::new();
    write_list(&mut out, values);
    out
}

/// Quote `s` as a Python string using `repr` rules: single quotes unless the
/// text contains a single quote and no double quote.
pub fn string_literal(s: &str) -> String {
    let quote: char = if s.contains('\'') && !s.contains('"') {
        '"'
    } else {
        '\''
    };
    quote_with(s, quote)
}

/// Quote `s` as a double-quoted Python string.
pub fn double_quoted(s: &str) -> String {
    quote_with(s, '"')
}

fn quote_with(s: &str, quote: char) -> String {
    let mut out: String = String::with_capacity(s.len() + 2);
    out.push(quote);
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c == quote => {
                out.push('\\');
                out.push(c);
            }
            c if c.is_control() => {
                let code: u32 = c.into();
                if code <= 0xff {
                    let _ = write!(out, "\\x{code:02x}");
                } else {
                    let _ = write!(out, "\\u{code:04x}");
                }
            }
            c => out.push(c),
        }
    }
    out.push(quote);
    out
}

fn write_literal(out: &mut String, value: &Value) {
    match value {
        Value::Null => out.push_str("None"),
        Value::Bool(true) => out.push_str("True"),
        Value::Bool(false) => out.push_str("False"),
        Value::Number(n) => out.push_str(&number_literal(n)),
        Value::String(s) => out.push_str(&string_literal(s)),
        Value::Array(values) => write_list(out, values),
        Value::Object(map) => write_dict(out, map),
    }
}

fn write_list(out: &mut String, values: &[Value]) {
    out.push('[');
    for (index, value) in values.iter().enumerate() {
        if index > 0 {
            out.push_str(", ");
        }
        write_literal(out, value);
    }
    out.push(']');
}

fn write_dict(out: &mut String, map: &Map<String, Value>) {
    out.push('{');
    for (index, (key, value)) in map.iter().enumerate() {
        if index > 0 {
            out.push_str(", ");
        }
        out.push_str(&string_literal(key));
        out.push_str(": ");
        write_literal(out, value);
    }
    out.push('}');
}

/// Integers render as-is; floats always keep a fraction or exponent so they
/// stay floats in Python (`0.0`, `1e-7`).
fn number_literal(n: &Number) -> String {
    if let Some(i) = n.as_i64() {
        i.to_string()
    } else if let Some(u) = n.as_u64() {
        u.to_string()
    } else if let Some(f) = n.as_f64() {
        format!("{f:?}")
    } else {
        n.to_string()
    }
}
