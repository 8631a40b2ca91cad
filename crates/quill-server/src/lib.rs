//! Server assembly for quill.
//!
//! Exposes the [`ServerConfig`] read by the binary and the [`router`]
//! builder that mounts the JSON API (with request tracing) over any
//! [`BlogStore`].

use std::path::PathBuf;

use axum::Router;
use quill_api::{ApiState, BlogConfig};
use quill_core::store::BlogStore;
use serde::Deserialize;
use tower_http::trace::TraceLayer;

// ─── Configuration ───────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml` with
/// `QUILL_`-prefixed environment overrides.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
  pub host:       String,
  pub port:       u16,
  /// SQLite database file.
  pub store_path: PathBuf,
  /// Directory of `.md` post files.
  pub posts_dir:  PathBuf,
  pub blog:       BlogConfig,
}

impl Default for ServerConfig {
  fn default() -> Self {
    Self {
      host:       "127.0.0.1".to_string(),
      port:       8080,
      store_path: PathBuf::from("quill.db"),
      posts_dir:  PathBuf::from("posts"),
      blog:       BlogConfig::default(),
    }
  }
}

// ─── Router ──────────────────────────────────────────────────────────────────

/// Build the full application router: the JSON API nested under `/api`,
/// wrapped in HTTP request tracing.
pub fn router<S>(state: ApiState<S>) -> Router
where
  S: BlogStore + Clone + Send + Sync + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  Router::new()
    .nest("/api", quill_api::api_router(state))
    .layer(TraceLayer::new_for_http())
}

// ─── Integration tests ───────────────────────────────────────────────────────
