//! Application state: the problem store and composition settings.
//!
//! Store selection: a remote table when PROBLEM_STORE_URL/PROBLEM_STORE_KEY are set,
//! otherwise an in-memory bank built from the TOML config plus the built-in seeds.

use std::sync::Arc;

use tracing::{info, instrument, warn};

use crate::config::{load_service_config_from_env, ComposeSettings, ProblemCfg};
use crate::seeds::seed_problems;
use crate::store::{MemoryStore, ProblemStore, RestStore};

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn ProblemStore>,
    pub settings: ComposeSettings,
}

impl AppState {
    /// Build state from env: load config, pick the store.
    #[instrument(level = "info", skip_all)]
    pub fn new() -> Self {
        let cfg = load_service_config_from_env().unwrap_or_default();
        let settings = cfg.compose.clone();
        info!(
            target: "quizmix_backend",
            default_total = settings.default_total,
            min_total = settings.min_total,
            max_total = settings.max_total,
            candidate_cap = settings.candidate_cap,
            "Composition settings"
        );

        let store: Arc<dyn ProblemStore> = match RestStore::from_env() {
            Some(rest) => {
                info!(target: "quizmix_backend", base_url = %rest.base_url, table = %rest.table, "Remote problem store enabled.");
                if !cfg.problems.is_empty() {
                    warn!(target: "quizmix_backend", bank = cfg.problems.len(), "Config bank ignored while a remote store is configured");
                }
                Arc::new(rest)
            }
            None => {
                let mut rows: Vec<_> = cfg.problems.into_iter().map(ProblemCfg::into_stored).collect();
                rows.extend(seed_problems());
                let memory = MemoryStore::new(rows);
                info!(target: "quizmix_backend", rows = memory.len(), "No PROBLEM_STORE_URL/KEY; serving the in-memory bank.");
                Arc::new(memory)
            }
        };

        Self::with_store(store, settings)
    }

    pub fn with_store(store: Arc<dyn ProblemStore>, settings: ComposeSettings) -> Self {
        Self { store, settings }
    }
}
