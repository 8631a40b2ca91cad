//! Comment — a single entry in a post's discussion thread.
//!
//! Comments are flat records in storage; the reply structure is recovered on
//! read by [`crate::thread::build_comment_tree`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{Error, Result};

/// A persisted comment. Ids and timestamps are server-assigned; `likes` only
/// ever increments and comments are never deleted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comment {
  pub comment_id:  Uuid,
  /// Slug of the post this comment belongs to.
  pub post_id:     String,
  /// Id of the comment this one replies to. `None` means top-level.
  pub parent_id:   Option<Uuid>,
  pub author:      String,
  pub email:       Option<String>,
  pub avatar:      Option<String>,
  pub content:     String,
  pub created_at:  DateTime<Utc>,
  pub is_approved: bool,
  pub likes:       u64,
}

/// A comment as submitted by a client, before the server assigns identity,
/// timestamp and approval state.
#[derive(Debug, Clone, Deserialize)]
pub struct NewComment {
  pub post_id:   String,
  pub parent_id: Option<Uuid>,
  pub author:    String,
  pub email:     Option<String>,
  pub avatar:    Option<String>,
  pub content:   String,
}

impl NewComment {
  /// Validate client input against the configured content limit.
  ///
  /// Length is counted in characters, not bytes. A content of exactly
  /// `max_content_len` characters is accepted.
  pub fn validate(&self, max_content_len: usize) -> Result<()> {
    if self.author.trim().is_empty() {
      return Err(Error::EmptyAuthor);
    }
    if self.content.trim().is_empty() {
      return Err(Error::EmptyContent);
    }
    if self.content.chars().count() > max_content_len {
      return Err(Error::ContentTooLong { limit: max_content_len });
    }
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn new_comment(content: &str) -> NewComment {
    NewComment {
      post_id:   "hello-world".into(),
      parent_id: None,
      author:    "Alice".into(),
      email:     None,
      avatar:    None,
      content:   content.into(),
    }
  }

  #[test]
  fn content_at_limit_is_accepted() {
    let c = new_comment(&"x".repeat(500));
    assert!(c.validate(500).is_ok());
  }

  #[test]
  fn content_over_limit_is_rejected() {
    let c = new_comment(&"x".repeat(501));
    assert!(matches!(
      c.validate(500),
      Err(Error::ContentTooLong { limit: 500 })
    ));
  }

  #[test]
  fn limit_counts_characters_not_bytes() {
    // Three-byte CJK characters; 10 of them must pass a limit of 10.
    let c = new_comment(&"评".repeat(10));
    assert!(c.validate(10).is_ok());
  }

  #[test]
  fn blank_author_is_rejected() {
    let mut c = new_comment("hi");
    c.author = "   ".into();
    assert!(matches!(c.validate(500), Err(Error::EmptyAuthor)));
  }

  #[test]
  fn blank_content_is_rejected() {
    let c = new_comment("  \n ");
    assert!(matches!(c.validate(500), Err(Error::EmptyContent)));
  }
}
