//! Content store collaborator: a remote PostgREST-style table or an in-memory bank.
//!
//! The remote client only issues one filtered GET per composition. We never log
//! the key, and error bodies are passed through untouched.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{ACCEPT, AUTHORIZATION, USER_AGENT};
use serde_json::Value;
use tracing::{info, instrument};

use crate::domain::StoredProblem;
use crate::error::StoreError;

#[async_trait]
pub trait ProblemStore: Send + Sync {
  /// Up to `cap` rows matching both coarse filters, in no particular order.
  async fn fetch_candidates(&self, grade: &str, subject: &str, cap: usize) -> Result<Vec<StoredProblem>, StoreError>;

  /// Short label for logs.
  fn describe(&self) -> String;
}

#[derive(Clone)]
pub struct RestStore {
  pub client: reqwest::Client,
  pub base_url: String,
  pub api_key: String,
  pub table: String,
}

impl RestStore {
  /// Construct from PROBLEM_STORE_URL / PROBLEM_STORE_KEY; None when either is missing.
  pub fn from_env() -> Option<Self> {
    let base_url = std::env::var("PROBLEM_STORE_URL").ok()?;
    let api_key = std::env::var("PROBLEM_STORE_KEY").ok()?;
    let table = std::env::var("PROBLEM_STORE_TABLE").unwrap_or_else(|_| "problems".into());

    let client = reqwest::Client::builder()
      .timeout(Duration::from_secs(20))
      .build()
      .ok()?;

    Some(Self { client, base_url: base_url.trim_end_matches('/').to_string(), api_key, table })
  }
}

#[async_trait]
impl ProblemStore for RestStore {
  #[instrument(level = "info", skip(self), fields(table = %self.table))]
  async fn fetch_candidates(&self, grade: &str, subject: &str, cap: usize) -> Result<Vec<StoredProblem>, StoreError> {
    let url = format!("{}/rest/v1/{}", self.base_url, self.table);
    let res = self.client.get(&url)
      .header(USER_AGENT, "quizmix-backend/0.1")
      .header(ACCEPT, "application/json")
      .header("apikey", &self.api_key)
      .header(AUTHORIZATION, format!("Bearer {}", self.api_key))
      .query(&[
        ("select", "id,content,grade,subject,category,difficulty".to_string()),
        ("grade", format!("eq.{}", grade)),
        ("subject", format!("eq.{}", subject)),
        ("limit", cap.to_string()),
      ])
      .send().await?;

    let status = res.status();
    if !status.is_success() {
      let body = res.text().await.unwrap_or_default();
      let payload: Value = serde_json::from_str(&body).unwrap_or(Value::String(body.clone()));
      let message = extract_store_error(&payload).unwrap_or_else(|| format!("store HTTP {}", status));
      return Err(StoreError::Rejected { status: status.as_u16(), message, payload });
    }

    let body = res.text().await?;
    let rows: Vec<StoredProblem> = serde_json::from_str(&body)?;
    info!(rows = rows.len(), bytes = body.len(), "Fetched candidate rows");
    Ok(rows)
  }

  fn describe(&self) -> String {
    format!("rest({}/{})", self.base_url, self.table)
  }
}

/// PostgREST errors look like `{ "code", "message", "details", "hint" }`.
fn extract_store_error(payload: &Value) -> Option<String> {
  payload
    .get("message")
    .and_then(|m| m.as_str())
    .map(|s| s.to_string())
    .filter(|s| !s.is_empty())
}

/// Rows held in memory; filters are exact matches on the row columns.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
  rows: Vec<StoredProblem>,
}

impl MemoryStore {
  pub fn new(rows: Vec<StoredProblem>) -> Self {
    Self { rows }
  }

  pub fn len(&self) -> usize {
    self.rows.len()
  }
}

#[async_trait]
impl ProblemStore for MemoryStore {
  async fn fetch_candidates(&self, grade: &str, subject: &str, cap: usize) -> Result<Vec<StoredProblem>, StoreError> {
    Ok(self.rows
      .iter()
      .filter(|r| r.grade.as_deref() == Some(grade) && r.subject.as_deref() == Some(subject))
      .take(cap)
      .cloned()
      .collect())
  }

  fn describe(&self) -> String {
    format!("memory({} rows)", self.rows.len())
  }
}
