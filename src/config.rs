//! Loading service configuration (composition settings + optional local problem bank) from TOML.
//!
//! See `ServiceConfig` and `ComposeSettings` for expected schema.

use serde::Deserialize;
use serde_json::Value;
use tracing::{error, info};
use uuid::Uuid;

use crate::domain::{ProblemId, StoredProblem};
use crate::error::ConfigError;

#[derive(Clone, Debug, Deserialize, Default)]
pub struct ServiceConfig {
  #[serde(default)]
  pub compose: ComposeSettings,
  #[serde(default)]
  pub problems: Vec<ProblemCfg>,
}

/// Limits applied to every composition request.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ComposeSettings {
  /// Item count when the caller sends none (or garbage).
  pub default_total: usize,
  /// Requests below this are raised to it.
  pub min_total: usize,
  /// Requests above this are lowered to it.
  pub max_total: usize,
  /// Hard cap on rows pulled from the store per request.
  pub candidate_cap: usize,
}

impl Default for ComposeSettings {
  fn default() -> Self {
    Self { default_total: 20, min_total: 20, max_total: 200, candidate_cap: 5000 }
  }
}

/// Problem entry accepted in the TOML bank. `content` is free-form, exactly as
/// the importers would have written it to the store.
#[derive(Clone, Debug, Deserialize)]
pub struct ProblemCfg {
  #[serde(default)] pub id: Option<ProblemId>,
  pub grade: String,
  pub subject: String,
  #[serde(default)] pub category: Option<String>,
  #[serde(default)] pub content: Value,
}

impl ProblemCfg {
  pub fn into_stored(self) -> StoredProblem {
    let id = self.id.unwrap_or_else(|| ProblemId::Text(Uuid::new_v4().to_string()));
    let mut row = StoredProblem::new(id, self.content);
    row.grade = Some(self.grade);
    row.subject = Some(self.subject);
    row.category = self.category;
    row
  }
}

pub fn parse_config(path: &str, text: &str) -> Result<ServiceConfig, ConfigError> {
  toml::from_str::<ServiceConfig>(text).map_err(|source| ConfigError::Parse { path: path.to_string(), source })
}

pub fn load_config_file(path: &str) -> Result<ServiceConfig, ConfigError> {
  let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read { path: path.to_string(), source })?;
  parse_config(path, &text)
}

/// Attempt to load `ServiceConfig` from QUIZMIX_CONFIG_PATH. On any parsing/IO error, returns None.
pub fn load_service_config_from_env() -> Option<ServiceConfig> {
  let path = std::env::var("QUIZMIX_CONFIG_PATH").ok()?;
  match load_config_file(&path) {
    Ok(cfg) => {
      info!(target: "quizmix_backend", %path, bank = cfg.problems.len(), "Loaded service config (TOML)");
      Some(cfg)
    }
    Err(e) => {
      error!(target: "quizmix_backend", %path, error = %e, "Failed to load TOML config");
      None
    }
  }
}
