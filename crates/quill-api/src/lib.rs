//! JSON REST API for quill.
//!
//! Exposes an axum [`Router`] backed by any [`quill_core::store::BlogStore`]
//! plus a [`quill_posts::PostCorpus`]. Transport concerns (TLS, binding,
//! request tracing) are the caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", quill_api::api_router(state))
//! ```

pub mod comments;
pub mod error;
pub mod posts;
pub mod read_count;
pub mod visitor;

use std::sync::Arc;

use axum::{
  Router,
  routing::{get, post},
};
use quill_core::{cache::ReadCountCache, store::BlogStore};
use serde::Deserialize;

pub use error::ApiError;

// ─── Configuration ───────────────────────────────────────────────────────────

/// Feature toggles for the blog surface, deserialised from the `[blog]`
/// section of the server configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BlogConfig {
  /// Serve and advance read counters.
  pub enable_read_count:  bool,
  /// Accept and serve comments. When off, reads return empty and writes
  /// are rejected.
  pub enable_comments:    bool,
  /// Hold new comments for approval instead of publishing immediately.
  pub require_moderation: bool,
  /// Maximum comment length, counted in characters.
  pub max_comment_length: usize,
  /// Count each visitor identity at most once per post (the deduplicated
  /// increment policy). When off, every view increments.
  pub dedupe_visitors:    bool,
}

impl Default for BlogConfig {
  fn default() -> Self {
    Self {
      enable_read_count:  true,
      enable_comments:    true,
      require_moderation: false,
      max_comment_length: 500,
      dedupe_visitors:    true,
    }
  }
}

// ─── State ───────────────────────────────────────────────────────────────────

/// Shared state threaded through all API handlers.
///
/// The read-count cache is constructed once, here, and shared by reference —
/// no global state.
#[derive(Clone)]
pub struct ApiState<S> {
  pub store:  Arc<S>,
  pub posts:  Arc<quill_posts::PostCorpus>,
  pub cache:  Arc<ReadCountCache>,
  pub config: Arc<BlogConfig>,
}

// ─── Router ──────────────────────────────────────────────────────────────────

/// Build a fully-materialised API router for `state`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(state: ApiState<S>) -> Router<()>
where
  S: BlogStore + Clone + Send + Sync + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  Router::new()
    // Comments
    .route(
      "/comments",
      get(comments::list::<S>).post(comments::create::<S>),
    )
    .route("/comments/{id}/like", post(comments::like::<S>))
    // Read counts
    .route(
      "/read-count",
      get(read_count::fetch::<S>).post(read_count::increment::<S>),
    )
    // Posts
    .route("/posts", get(posts::list::<S>))
    .route("/posts/{slug}", get(posts::get_one::<S>))
    .with_state(state)
}
