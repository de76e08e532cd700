//! Ordered field lookups over loosely-shaped stored problems.
//!
//! Records were written by several importers, so one logical field can live
//! under different keys and at different depths. Each logical field is described
//! by a `&[Field]` chain; the first location holding a usable value wins.

use serde_json::Value;

use crate::domain::StoredProblem;

/// One place a value may live.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Field {
    /// Top-level column on the row itself.
    Row(&'static str),
    /// `content.<key>`
    Content(&'static str),
    /// `content.raw.<key>`, or `content.<key>` when there is no `raw` object.
    Raw(&'static str),
}

impl Field {
    pub fn get<'a>(&self, record: &'a StoredProblem) -> Option<&'a Value> {
        let v = match *self {
            Field::Row(key) => record.extra.get(key),
            Field::Content(key) => record.content.get(key),
            Field::Raw(key) => raw_of(&record.content).get(key),
        };
        v.filter(|v| !v.is_null())
    }
}

/// The nested `raw` object if present, else the content object itself.
pub fn raw_of(content: &Value) -> &Value {
    match content.get("raw") {
        Some(raw @ Value::Object(_)) => raw,
        _ => content,
    }
}

/// Scalar rendered as trimmed text. Containers and null yield `None`.
pub fn as_text(v: &Value) -> Option<String> {
    match v {
        Value::String(s) => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Numbers, numeric strings, and booleans as a finite `f64`.
pub fn as_number(v: &Value) -> Option<f64> {
    let n = match v {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        _ => None,
    }?;
    n.is_finite().then_some(n)
}

/// First non-empty text along the chain.
pub fn first_text(record: &StoredProblem, chain: &[Field]) -> Option<String> {
    chain
        .iter()
        .filter_map(|f| f.get(record))
        .filter_map(as_text)
        .find(|s| !s.is_empty())
}

/// First value along the chain that reads as a finite number.
pub fn first_number(record: &StoredProblem, chain: &[Field]) -> Option<f64> {
    chain.iter().filter_map(|f| f.get(record)).find_map(as_number)
}

/// First non-empty array along the chain, each element rendered as text
/// (non-scalar elements become empty strings).
pub fn first_list(record: &StoredProblem, chain: &[Field]) -> Option<Vec<String>> {
    chain.iter().filter_map(|f| f.get(record)).find_map(|v| match v {
        Value::Array(items) if !items.is_empty() => {
            Some(items.iter().map(|x| as_text(x).unwrap_or_default()).collect())
        }
        _ => None,
    })
}
