//! HTTP boundary for hooklog.
//!
//! Exposes an axum [`Router`] with the webhook receiver and the event
//! history API, backed by any [`EventStore`]. The framework layer stays
//! thin: handlers hand the pipeline raw bytes plus header values and
//! translate its outcome into a status code.

pub mod error;
pub mod history;
pub mod ingest;

pub use error::Error;

use std::{path::PathBuf, sync::Arc};

use axum::{
  Router,
  routing::{get, post},
};
use serde::Deserialize;
use tower_http::trace::TraceLayer;

use hooklog_core::store::EventStore;

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml` with
/// `HOOKLOG_*` environment overrides.
#[derive(Deserialize, Clone)]
pub struct ServerConfig {
  pub host:           String,
  pub port:           u16,
  pub store_path:     PathBuf,
  /// Shared secret the upstream sender signs each delivery with.
  pub webhook_secret: String,
}

// ─── Application state ────────────────────────────────────────────────────────

/// Shared state threaded through all axum handlers.
///
/// The store is constructed once at process start and passed in here;
/// there is no process-wide store handle anywhere.
#[derive(Clone)]
pub struct AppState<S: EventStore> {
  pub store:  Arc<S>,
  pub config: Arc<ServerConfig>,
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build an axum [`Router`] for the webhook receiver and history API.
pub fn router<S>(state: AppState<S>) -> Router
where
  S: EventStore + Clone + Send + Sync + 'static,
{
  Router::new()
    .route("/webhook/receiver", post(ingest::receiver::<S>))
    .route("/github/events", get(history::events::<S>))
    .layer(TraceLayer::new_for_http())
    .with_state(state)
}

// ─── Integration tests ────────────────────────────────────────────────────────
