//! Literal values carried by literal type nodes and enum members.

use serde::Serialize;
use std::fmt;

/// A literal value captured from a literal type.
///
/// Literal nodes carry both the rendered `text` and this parsed `value`;
/// [`LiteralValue::render`] reproduces `text` from `value` (the round-trip
/// contract the serializer relies on). Non-literal primitives carry `text`
/// only and never construct one of these.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum LiteralValue {
    String(String),
    Number(f64),
    Boolean(bool),
    Null,
}

impl LiteralValue {
    /// Render the value in its own literal source format.
    ///
    /// Strings are double-quoted and escaped; numbers print the way the
    /// host checker displays numeric literals (`1`, not `1.0`).
    pub fn render(&self) -> String {
        match self {
            Self::String(s) => render_string_literal(s),
            Self::Number(n) => format!("{n}"),
            Self::Boolean(b) => b.to_string(),
            Self::Null => "null".to_string(),
        }
    }

    /// The value as a `serde_json::Value`, for structured output.
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Self::String(s) => serde_json::Value::String(s.clone()),
            Self::Number(n) => number_to_json(*n),
            Self::Boolean(b) => serde_json::Value::Bool(*b),
            Self::Null => serde_json::Value::Null,
        }
    }
}

impl fmt::Display for LiteralValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

/// Integral numbers become JSON integers so that `1` does not round-trip
/// through serialization as `1.0`.
pub fn number_to_json(n: f64) -> serde_json::Value {
    if n.fract() == 0.0 && n.is_finite() && n >= i64::MIN as f64 && n <= i64::MAX as f64 {
        serde_json::Value::from(n as i64)
    } else {
        serde_json::Number::from_f64(n)
            .map(serde_json::Value::Number)
            .unwrap_or(serde_json::Value::Null)
    }
}

fn render_string_literal(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            _ => out.push(c),
        }
    }
    out.push('"');
    out
}

#[cfg(test)]
#[path = "../tests/literal_tests.rs"]
mod tests;
