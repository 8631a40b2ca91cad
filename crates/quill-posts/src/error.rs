//! Error types for the quill-posts corpus.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("post is missing its `---` front-matter block")]
  MissingFrontMatter,

  #[error("front matter is missing the required `{0}` field")]
  MissingField(&'static str),

  #[error("invalid date in front matter: {0:?}")]
  InvalidDate(String),

  #[error("malformed front-matter line: {0:?}")]
  MalformedLine(String),

  #[error("io error: {0}")]
  Io(#[from] std::io::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
