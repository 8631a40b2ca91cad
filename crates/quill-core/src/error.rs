//! Error types for `quill-core`.

use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum Error {
  #[error("comment not found: {0}")]
  CommentNotFound(Uuid),

  #[error("author must not be empty")]
  EmptyAuthor,

  #[error("content must not be empty")]
  EmptyContent,

  #[error("content exceeds the maximum length of {limit} characters")]
  ContentTooLong { limit: usize },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
