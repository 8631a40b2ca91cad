//! Handlers for `/read-count` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/read-count` | `?slug` required; cache-first, store-fallback |
//! | `POST` | `/read-count` | Body: `{"slug": …}`; increments per the configured policy |
//!
//! A store failure is reported to the caller as 500; it never populates the
//! cache.

use axum::{
  Json,
  extract::{Query, State},
  http::HeaderMap,
};
use quill_core::store::BlogStore;
use serde::{Deserialize, Serialize};

use crate::{
  ApiState,
  error::ApiError,
  visitor::{ClientAddr, visitor_identity_from_request},
};

#[derive(Debug, Serialize)]
pub struct CountResponse {
  pub count: u64,
}

// ─── Fetch ───────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct FetchParams {
  pub slug: Option<String>,
}

/// `GET /read-count?slug=<slug>`
pub async fn fetch<S>(
  State(state): State<ApiState<S>>,
  Query(params): Query<FetchParams>,
) -> Result<Json<CountResponse>, ApiError>
where
  S: BlogStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let slug = params
    .slug
    .ok_or_else(|| ApiError::BadRequest("missing slug".into()))?;

  if let Some(count) = state.cache.get(&slug) {
    return Ok(Json(CountResponse { count }));
  }

  let count = state
    .store
    .read_count(&slug)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?
    .map(|record| record.count)
    .unwrap_or(0);

  state.cache.put(&slug, count);
  Ok(Json(CountResponse { count }))
}

// ─── Increment ───────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct IncrementBody {
  pub slug: String,
}

/// `POST /read-count` — returns the post-increment count.
///
/// Under the deduplicated policy (the default) the visitor identity is
/// derived from request metadata and a repeat view is a no-op; under the
/// unconditional policy every call counts. With read counting disabled the
/// current count is returned untouched.
pub async fn increment<S>(
  State(state): State<ApiState<S>>,
  headers: HeaderMap,
  ClientAddr(peer): ClientAddr,
  Json(body): Json<IncrementBody>,
) -> Result<Json<CountResponse>, ApiError>
where
  S: BlogStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let slug = body.slug;
  if slug.is_empty() {
    return Err(ApiError::BadRequest("missing slug".into()));
  }

  if !state.config.enable_read_count {
    let count = state
      .store
      .read_count(&slug)
      .await
      .map_err(|e| ApiError::Store(Box::new(e)))?
      .map(|record| record.count)
      .unwrap_or(0);
    return Ok(Json(CountResponse { count }));
  }

  let count = if state.config.dedupe_visitors {
    let visitor_id = visitor_identity_from_request(&headers, peer.as_deref());
    state
      .store
      .increment_read_count_unique(&slug, &visitor_id)
      .await
      .map_err(|e| ApiError::Store(Box::new(e)))?
  } else {
    state
      .store
      .increment_read_count(&slug)
      .await
      .map_err(|e| ApiError::Store(Box::new(e)))?
  };

  state.cache.put(&slug, count);
  Ok(Json(CountResponse { count }))
}
