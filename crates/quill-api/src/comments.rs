//! Handlers for `/comments` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/comments` | `?post_id` required; returns the reply forest, roots newest first |
//! | `POST` | `/comments` | Body: [`NewComment`]; returns 201 + stored comment |
//! | `POST` | `/comments/:id/like` | Increments `likes` by one; returns the updated comment |

use axum::{
  Json,
  extract::{Path, Query, State},
  http::StatusCode,
  response::IntoResponse,
};
use quill_core::{
  comment::{Comment, NewComment},
  store::BlogStore,
  thread::{CommentNode, build_comment_tree},
};
use serde::Deserialize;
use uuid::Uuid;

use crate::{ApiState, error::ApiError};

// ─── List ────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ListParams {
  pub post_id: Option<String>,
}

/// `GET /comments?post_id=<slug>`
///
/// Approved comments for the post as a reply forest: roots newest first,
/// sibling replies newest first, replies whose parent was held back by
/// moderation promoted to roots. With comments disabled this returns an
/// empty forest rather than an error.
pub async fn list<S>(
  State(state): State<ApiState<S>>,
  Query(params): Query<ListParams>,
) -> Result<Json<Vec<CommentNode>>, ApiError>
where
  S: BlogStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let post_id = params
    .post_id
    .ok_or_else(|| ApiError::BadRequest("missing post_id".into()))?;

  if !state.config.enable_comments {
    return Ok(Json(Vec::new()));
  }

  let comments = state
    .store
    .comments_for_post(&post_id)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;

  Ok(Json(build_comment_tree(comments)))
}

// ─── Create ──────────────────────────────────────────────────────────────────

/// `POST /comments` — returns 201 + the stored [`Comment`].
///
/// The server assigns id, timestamp and approval state; a comment is
/// published immediately unless moderation is configured.
pub async fn create<S>(
  State(state): State<ApiState<S>>,
  Json(body): Json<NewComment>,
) -> Result<impl IntoResponse, ApiError>
where
  S: BlogStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  if !state.config.enable_comments {
    return Err(ApiError::Disabled("comments"));
  }

  body.validate(state.config.max_comment_length)?;

  let approved = !state.config.require_moderation;
  let comment = state
    .store
    .add_comment(body, approved)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;

  Ok((StatusCode::CREATED, Json(comment)))
}

// ─── Like ────────────────────────────────────────────────────────────────────

/// `POST /comments/:id/like` — returns the updated [`Comment`].
pub async fn like<S>(
  State(state): State<ApiState<S>>,
  Path(id): Path<Uuid>,
) -> Result<Json<Comment>, ApiError>
where
  S: BlogStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  if !state.config.enable_comments {
    return Err(ApiError::Disabled("comments"));
  }

  let comment = state
    .store
    .like_comment(id)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?
    .ok_or_else(|| ApiError::NotFound(format!("comment {id} not found")))?;

  Ok(Json(comment))
}
