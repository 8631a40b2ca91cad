//! Encoding and decoding helpers between Rust domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! All timestamps are stored as RFC 3339 strings. UUIDs are stored as
//! hyphenated lowercase strings. Counters are plain INTEGER columns.

use chrono::{DateTime, Utc};
use quill_core::{comment::Comment, read_count::ReadCount};
use uuid::Uuid;

use crate::{Error, Result};

// ─── Uuid ────────────────────────────────────────────────────────────────────

pub fn encode_uuid(id: Uuid) -> String { id.hyphenated().to_string() }

pub fn decode_uuid(s: &str) -> Result<Uuid> { Ok(Uuid::parse_str(s)?) }

// ─── DateTime<Utc> ───────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── Row types ───────────────────────────────────────────────────────────────

/// Raw strings read directly from a `comments` row.
pub struct RawComment {
  pub comment_id:  String,
  pub post_id:     String,
  pub parent_id:   Option<String>,
  pub author:      String,
  pub email:       Option<String>,
  pub avatar:      Option<String>,
  pub content:     String,
  pub created_at:  String,
  pub is_approved: bool,
  pub likes:       i64,
}

impl RawComment {
  /// Column list matching the field order expected by [`RawComment::from_row`].
  pub const COLUMNS: &'static str = "comment_id, post_id, parent_id, author, \
     email, avatar, content, created_at, is_approved, likes";

  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(RawComment {
      comment_id:  row.get(0)?,
      post_id:     row.get(1)?,
      parent_id:   row.get(2)?,
      author:      row.get(3)?,
      email:       row.get(4)?,
      avatar:      row.get(5)?,
      content:     row.get(6)?,
      created_at:  row.get(7)?,
      is_approved: row.get(8)?,
      likes:       row.get(9)?,
    })
  }

  pub fn into_comment(self) -> Result<Comment> {
    Ok(Comment {
      comment_id:  decode_uuid(&self.comment_id)?,
      post_id:     self.post_id,
      parent_id:   self.parent_id.as_deref().map(decode_uuid).transpose()?,
      author:      self.author,
      email:       self.email,
      avatar:      self.avatar,
      content:     self.content,
      created_at:  decode_dt(&self.created_at)?,
      is_approved: self.is_approved,
      likes:       self.likes as u64,
    })
  }
}

/// Raw strings read directly from a `read_counts` row.
pub struct RawReadCount {
  pub slug:       String,
  pub count:      i64,
  pub updated_at: String,
}

impl RawReadCount {
  pub fn into_read_count(self) -> Result<ReadCount> {
    Ok(ReadCount {
      slug:       self.slug,
      count:      self.count as u64,
      updated_at: decode_dt(&self.updated_at)?,
    })
  }
}
