//! Domain models: buckets, stored problems as fetched from the store, and the
//! normalized question shape handed to clients.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Canonical question category. Declaration order is the default category order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Bucket {
  Vocab,
  Grammar,
  Dialogue,
  Reading,
}

impl Bucket {
  pub const ALL: [Bucket; 4] = [Bucket::Vocab, Bucket::Grammar, Bucket::Dialogue, Bucket::Reading];

  pub fn as_str(self) -> &'static str {
    match self {
      Bucket::Vocab => "vocab",
      Bucket::Grammar => "grammar",
      Bucket::Dialogue => "dialogue",
      Bucket::Reading => "reading",
    }
  }

  /// Resolve a request-side category name. Accepts the English names in any case,
  /// the legacy `body` name for reading, and the Korean category labels.
  pub fn resolve(alias: &str) -> Option<Bucket> {
    let v = alias.trim().to_lowercase();
    match v.as_str() {
      "vocab" | "어휘" => Some(Bucket::Vocab),
      "grammar" | "문법" => Some(Bucket::Grammar),
      "dialogue" | "대화문" => Some(Bucket::Dialogue),
      "reading" | "body" | "본문" => Some(Bucket::Reading),
      _ => None,
    }
  }
}

impl fmt::Display for Bucket {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

/// Store ids are integers in some tables and uuid strings in others.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ProblemId {
  Int(i64),
  Text(String),
}

impl fmt::Display for ProblemId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ProblemId::Int(n) => write!(f, "{}", n),
      ProblemId::Text(s) => f.write_str(s),
    }
  }
}

/// One row from the content store. `content` has no fixed shape.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StoredProblem {
  pub id: ProblemId,
  #[serde(default)]
  pub content: Value,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub grade: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub subject: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub category: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub difficulty: Option<String>,
  /// Any other top-level column (some imports wrote `question`/`choices` on the row).
  #[serde(flatten)]
  pub extra: Map<String, Value>,
}

impl StoredProblem {
  pub fn new(id: ProblemId, content: Value) -> Self {
    Self {
      id,
      content,
      grade: None,
      subject: None,
      category: None,
      difficulty: None,
      extra: Map::new(),
    }
  }
}

/// The canonical question shape served to clients.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedQuestion {
  pub id: ProblemId,
  #[serde(rename = "type")]
  pub kind: Bucket,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub passage: Option<String>,
  pub question: String,
  pub choices: [String; 5],
  pub answer_index: usize,
  pub explanation: String,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub explanation_wrong: Option<String>,
  pub content: Value,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlanEntry {
  pub bucket: Bucket,
  pub quota: usize,
}

/// Per-bucket quotas for one composition, in caller order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CategoryPlan {
  pub entries: Vec<PlanEntry>,
}

impl CategoryPlan {
  pub fn total(&self) -> usize {
    self.entries.iter().map(|e| e.quota).sum()
  }

  pub fn quotas(&self) -> Vec<usize> {
    self.entries.iter().map(|e| e.quota).collect()
  }
}

#[derive(Clone, Debug, Default)]
pub struct SamplingResult {
  pub selected: Vec<StoredProblem>,
  /// Items actually selected per classified bucket, backfill included.
  pub counts_by_bucket: BTreeMap<Bucket, usize>,
  pub backfilled: usize,
}

#[cfg(test)]
mod tests {
  use super::*;
  use serde_json::json;

  #[test]
  fn resolves_aliases_and_legacy_names() {
    assert_eq!(Bucket::resolve("Grammar"), Some(Bucket::Grammar));
    assert_eq!(Bucket::resolve(" body "), Some(Bucket::Reading));
    assert_eq!(Bucket::resolve("대화문"), Some(Bucket::Dialogue));
    assert_eq!(Bucket::resolve("어휘"), Some(Bucket::Vocab));
    assert_eq!(Bucket::resolve("listening"), None);
  }

  #[test]
  fn stored_problem_keeps_unknown_row_columns() {
    let row: StoredProblem = serde_json::from_value(json!({
      "id": 17,
      "content": { "raw": { "qtype": "문법_빈칸" } },
      "grade": "2",
      "question": "row level question"
    }))
    .unwrap();
    assert_eq!(row.id, ProblemId::Int(17));
    assert_eq!(row.grade.as_deref(), Some("2"));
    assert_eq!(row.extra.get("question"), Some(&json!("row level question")));
  }

  #[test]
  fn normalized_question_serializes_camel_case() {
    let q = NormalizedQuestion {
      id: ProblemId::Text("a1".into()),
      kind: Bucket::Reading,
      passage: None,
      question: "Q".into(),
      choices: Default::default(),
      answer_index: 3,
      explanation: "E".into(),
      explanation_wrong: None,
      content: json!({}),
    };
    let v = serde_json::to_value(&q).unwrap();
    assert_eq!(v["type"], "reading");
    assert_eq!(v["answerIndex"], 3);
    assert_eq!(v["choices"].as_array().map(|a| a.len()), Some(5));
    assert!(v.get("passage").is_none());
    assert!(v.get("explanationWrong").is_none());
  }
}
