//! The `BlogStore` trait.
//!
//! The trait is implemented by storage backends (e.g. `quill-store-sqlite`).
//! Higher layers (`quill-api`, `quill-server`) depend on this abstraction,
//! not on any concrete backend.

use std::future::Future;

use uuid::Uuid;

use crate::{
  comment::{Comment, NewComment},
  read_count::ReadCount,
};

/// Abstraction over a quill storage backend.
///
/// Counter mutations (`likes`, read counts) must be atomic at the storage
/// layer — increment-and-return, never read-modify-write from the caller —
/// so that concurrent views are never lost.
///
/// All methods return `Send` futures so the trait can be used in
/// multi-threaded async runtimes (e.g. tokio with `axum`).
pub trait BlogStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Comments ──────────────────────────────────────────────────────────

  /// Persist a new comment. The id and `created_at` timestamp are assigned
  /// by the store; `approved` is decided by the caller's moderation policy.
  fn add_comment(
    &self,
    input: NewComment,
    approved: bool,
  ) -> impl Future<Output = Result<Comment, Self::Error>> + Send + '_;

  /// All approved comments for a post, newest first.
  fn comments_for_post<'a>(
    &'a self,
    post_id: &'a str,
  ) -> impl Future<Output = Result<Vec<Comment>, Self::Error>> + Send + 'a;

  /// Retrieve a comment by id. Returns `None` if not found.
  fn get_comment(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<Comment>, Self::Error>> + Send + '_;

  /// Atomically increment a comment's like counter by one and return the
  /// updated comment. Returns `None` if the comment does not exist.
  fn like_comment(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<Comment>, Self::Error>> + Send + '_;

  // ── Read counts ───────────────────────────────────────────────────────

  /// The current counter record for a slug, or `None` if no view has ever
  /// been counted.
  fn read_count<'a>(
    &'a self,
    slug: &'a str,
  ) -> impl Future<Output = Result<Option<ReadCount>, Self::Error>> + Send + 'a;

  /// Unconditional increment policy: every call advances the counter by
  /// one. Creates the record on first use. Returns the new count.
  fn increment_read_count<'a>(
    &'a self,
    slug: &'a str,
  ) -> impl Future<Output = Result<u64, Self::Error>> + Send + 'a;

  /// Deduplicated increment policy: the counter advances only the first
  /// time a given visitor identity is seen for `slug`; repeat calls are
  /// no-ops. Returns the post-call count either way.
  fn increment_read_count_unique<'a>(
    &'a self,
    slug: &'a str,
    visitor_id: &'a str,
  ) -> impl Future<Output = Result<u64, Self::Error>> + Send + 'a;
}
