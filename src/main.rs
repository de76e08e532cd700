//! Quizmix · Quiz Composition Backend
//!
//! - Axum HTTP API composing balanced quizzes from a heterogeneous problem store
//! - Remote PostgREST-style store, or an in-memory bank when none is configured
//!
//! Important env variables:
//!   PORT                 : u16 (default 3000)
//!   PROBLEM_STORE_URL    : base URL of the remote store (enables it together with the key)
//!   PROBLEM_STORE_KEY    : API key sent as `apikey` and bearer token
//!   PROBLEM_STORE_TABLE  : default "problems"
//!   QUIZMIX_CONFIG_PATH  : path to TOML config (compose settings + optional problem bank)
//!   LOG_LEVEL            : tracing filter, e.g. "debug" or full directives
//!   LOG_FORMAT           : "pretty" (default) or "json"

mod telemetry;
mod util;
mod domain;
mod error;
mod config;
mod seeds;
mod lookup;
mod classify;
mod normalize;
mod planner;
mod sampler;
mod store;
mod composer;
mod state;
mod protocol;
mod routes;

use std::{net::SocketAddr, sync::Arc};
use tokio::net::TcpListener;
use tracing::info;

use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
  telemetry::init_tracing();

  let state = Arc::new(AppState::new());
  let app = build_router(state);

  let addr: SocketAddr = std::env::var("PORT")
    .ok()
    .and_then(|p| p.parse::<u16>().ok())
    .map(|port| SocketAddr::from(([0, 0, 0, 0], port)))
    .unwrap_or_else(|| SocketAddr::from(([0, 0, 0, 0], 3000)));

  let listener = TcpListener::bind(addr).await?;
  info!(target: "quizmix_backend", %addr, "HTTP server listening");
  axum::serve(listener, app)
    .with_graceful_shutdown(shutdown_signal())
    .await?;
  Ok(())
}

async fn shutdown_signal() {
  if let Err(e) = tokio::signal::ctrl_c().await {
    tracing::error!(target: "quizmix_backend", error = %e, "Failed to listen for shutdown signal");
  }
  info!(target: "quizmix_backend", "Shutdown signal received");
}
