//! Handlers for `/posts` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/posts` | Metadata only, newest first; optional `?tag=` / `?category=` |
//! | `GET`  | `/posts/:slug` | Full post: rendered HTML + current read count |
//!
//! The corpus reads from the filesystem, so every corpus call is pushed onto
//! the blocking pool.

use axum::{
  Json,
  extract::{Path, Query, State},
};
use chrono::NaiveDate;
use quill_core::store::BlogStore;
use quill_posts::{Post, render_html};
use serde::{Deserialize, Serialize};

use crate::{ApiState, error::ApiError};

// ─── Response types ──────────────────────────────────────────────────────────

/// A post as it appears in list responses: front matter only, no body.
#[derive(Debug, Serialize)]
pub struct PostSummary {
  pub slug:      String,
  pub title:     String,
  pub excerpt:   String,
  pub date:      NaiveDate,
  pub author:    String,
  pub category:  String,
  pub tags:      Vec<String>,
  pub image_url: String,
}

impl From<Post> for PostSummary {
  fn from(p: Post) -> Self {
    PostSummary {
      slug:      p.slug,
      title:     p.title,
      excerpt:   p.excerpt,
      date:      p.date,
      author:    p.author,
      category:  p.category,
      tags:      p.tags,
      image_url: p.image_url,
    }
  }
}

/// A single post in full: summary fields plus rendered body and counter.
#[derive(Debug, Serialize)]
pub struct PostDetail {
  #[serde(flatten)]
  pub summary:    PostSummary,
  pub html:       String,
  pub read_count: u64,
}

// ─── List ────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ListParams {
  pub tag:      Option<String>,
  pub category: Option<String>,
}

/// `GET /posts[?tag=…][&category=…]`
pub async fn list<S>(
  State(state): State<ApiState<S>>,
  Query(params): Query<ListParams>,
) -> Result<Json<Vec<PostSummary>>, ApiError>
where
  S: BlogStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let corpus = state.posts.clone();
  let posts = run_corpus(move || match (&params.tag, &params.category) {
    (Some(tag), _) => corpus.posts_by_tag(tag),
    (None, Some(category)) => corpus.posts_by_category(category),
    (None, None) => corpus.all_posts(),
  })
  .await?;

  Ok(Json(posts.into_iter().map(PostSummary::from).collect()))
}

// ─── Get one ─────────────────────────────────────────────────────────────────

/// `GET /posts/:slug`
pub async fn get_one<S>(
  State(state): State<ApiState<S>>,
  Path(slug): Path<String>,
) -> Result<Json<PostDetail>, ApiError>
where
  S: BlogStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let corpus = state.posts.clone();
  let lookup_slug = slug.clone();
  let post = run_corpus(move || corpus.post_by_slug(&lookup_slug))
    .await?
    .ok_or_else(|| ApiError::NotFound(format!("post {slug:?} not found")))?;

  // Same cache-first read as `GET /read-count`.
  let read_count = match state.cache.get(&post.slug) {
    Some(count) => count,
    None => {
      let count = state
        .store
        .read_count(&post.slug)
        .await
        .map_err(|e| ApiError::Store(Box::new(e)))?
        .map(|record| record.count)
        .unwrap_or(0);
      state.cache.put(&post.slug, count);
      count
    }
  };

  let html = render_html(&post.content);
  Ok(Json(PostDetail { summary: PostSummary::from(post), html, read_count }))
}

// ─── Helpers ─────────────────────────────────────────────────────────────────

/// Run a corpus closure on the blocking pool.
async fn run_corpus<T, F>(f: F) -> Result<T, ApiError>
where
  T: Send + 'static,
  F: FnOnce() -> quill_posts::Result<T> + Send + 'static,
{
  tokio::task::spawn_blocking(f)
    .await
    .map_err(|e| ApiError::Internal(e.to_string()))?
    .map_err(ApiError::from)
}
