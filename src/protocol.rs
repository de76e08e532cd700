//! Public HTTP request/response structs (serde ready).
//! Keep this small and stable to evolve backend and frontend independently.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::{Bucket, NormalizedQuestion};
use crate::planner::Preset;

/// Caller input for one composition, before filter normalisation.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ComposeRequest {
  pub grade: String,
  pub subject: String,
  /// Requested item count as sent; non-numeric or non-positive means "default".
  pub limit: Option<f64>,
  pub categories: Vec<String>,
  /// Named fixed mix; when set it replaces `limit` and `categories`.
  pub preset: Option<String>,
}

impl ComposeRequest {
  /// Query-string form: `grade`, `subject`, `limit` (or `count`), `preset`, and
  /// `categories` given repeatedly, comma-separated, or as a JSON array string.
  pub fn from_query_pairs(pairs: &[(String, String)]) -> Self {
    let mut req = ComposeRequest::default();
    for (key, value) in pairs {
      match key.as_str() {
        "grade" => req.grade = value.trim().to_string(),
        "subject" => req.subject = value.trim().to_string(),
        "limit" | "count" => req.limit = value.trim().parse::<f64>().ok(),
        "preset" => req.preset = Some(value.trim().to_string()),
        "categories" => req.categories.extend(split_categories(value)),
        _ => {}
      }
    }
    req
  }
}

fn split_categories(raw: &str) -> Vec<String> {
  let v = raw.trim();
  if let Ok(Value::Array(items)) = serde_json::from_str::<Value>(v) {
    return items.iter().filter_map(|x| scalar_string(x)).filter(|s| !s.is_empty()).collect();
  }
  v.split(',').map(|s| s.trim().to_string()).filter(|s| !s.is_empty()).collect()
}

fn scalar_string(v: &Value) -> Option<String> {
  match v {
    Value::String(s) => Some(s.trim().to_string()),
    Value::Number(n) => Some(n.to_string()),
    _ => None,
  }
}

/// JSON-body form of the same request.
#[derive(Debug, Default, Deserialize)]
pub struct ComposeBody {
  #[serde(default)]
  pub grade: Option<Value>,
  #[serde(default)]
  pub subject: Option<Value>,
  #[serde(default)]
  pub limit: Option<Value>,
  #[serde(default)]
  pub count: Option<Value>,
  #[serde(default)]
  pub categories: Option<Value>,
  #[serde(default)]
  pub preset: Option<Value>,
}

impl From<ComposeBody> for ComposeRequest {
  fn from(body: ComposeBody) -> Self {
    let text = |v: &Option<Value>| v.as_ref().and_then(scalar_string).unwrap_or_default();
    let limit = match body.limit.as_ref().or(body.count.as_ref()) {
      Some(Value::Number(n)) => n.as_f64(),
      Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
      _ => None,
    };
    let categories = match &body.categories {
      Some(Value::Array(items)) => items.iter().filter_map(scalar_string).filter(|s| !s.is_empty()).collect(),
      Some(Value::String(s)) => split_categories(s),
      _ => Vec::new(),
    };
    ComposeRequest {
      grade: text(&body.grade),
      subject: text(&body.subject),
      limit,
      categories,
      preset: body.preset.as_ref().and_then(scalar_string),
    }
  }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComposeMeta {
  pub grade_filter: String,
  pub subject_filter: String,
  pub categories: Vec<Bucket>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub preset: Option<Preset>,
  pub limit: usize,
  pub counts_by_bucket: BTreeMap<Bucket, usize>,
  pub total_returned: usize,
}

#[derive(Debug, Serialize)]
pub struct ComposeOut {
  pub ok: bool,
  pub items: Vec<NormalizedQuestion>,
  pub meta: ComposeMeta,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorOut {
  pub ok: bool,
  pub error_message: String,
  pub error_details: Value,
}

#[derive(Debug, Serialize)]
pub struct NormalizeOut {
  pub ok: bool,
  pub bucket: Bucket,
  pub item: NormalizedQuestion,
}

#[derive(Serialize)]
pub struct HealthOut {
  pub ok: bool,
}
