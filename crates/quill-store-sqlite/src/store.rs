//! [`SqliteStore`] — the SQLite implementation of [`BlogStore`].

use std::path::Path;

use chrono::Utc;
use rusqlite::OptionalExtension as _;
use uuid::Uuid;

use quill_core::{
  comment::{Comment, NewComment},
  read_count::ReadCount,
  store::BlogStore,
};

use crate::{
  Error, Result,
  encode::{RawComment, RawReadCount, encode_dt, encode_uuid},
  schema::SCHEMA,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A quill blog store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

// ─── BlogStore impl ──────────────────────────────────────────────────────────

impl BlogStore for SqliteStore {
  type Error = Error;

  // ── Comments ──────────────────────────────────────────────────────────────

  async fn add_comment(
    &self,
    input: NewComment,
    approved: bool,
  ) -> Result<Comment> {
    let comment = Comment {
      comment_id:  Uuid::new_v4(),
      post_id:     input.post_id,
      parent_id:   input.parent_id,
      author:      input.author,
      email:       input.email,
      avatar:      input.avatar,
      content:     input.content,
      created_at:  Utc::now(),
      is_approved: approved,
      likes:       0,
    };

    let id_str     = encode_uuid(comment.comment_id);
    let post_id    = comment.post_id.clone();
    let parent_str = comment.parent_id.map(encode_uuid);
    let author     = comment.author.clone();
    let email      = comment.email.clone();
    let avatar     = comment.avatar.clone();
    let content    = comment.content.clone();
    let at_str     = encode_dt(comment.created_at);

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO comments (
             comment_id, post_id, parent_id, author, email, avatar,
             content, created_at, is_approved, likes
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, 0)",
          rusqlite::params![
            id_str, post_id, parent_str, author, email, avatar, content,
            at_str, approved,
          ],
        )?;
        Ok(())
      })
      .await?;

    Ok(comment)
  }

  async fn comments_for_post(&self, post_id: &str) -> Result<Vec<Comment>> {
    let post_id = post_id.to_owned();

    let raws: Vec<RawComment> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {} FROM comments
            WHERE post_id = ?1 AND is_approved = 1
            ORDER BY created_at DESC",
          RawComment::COLUMNS,
        ))?;
        let rows = stmt
          .query_map(rusqlite::params![post_id], RawComment::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawComment::into_comment).collect()
  }

  async fn get_comment(&self, id: Uuid) -> Result<Option<Comment>> {
    let id_str = encode_uuid(id);

    let raw: Option<RawComment> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!(
                "SELECT {} FROM comments WHERE comment_id = ?1",
                RawComment::COLUMNS,
              ),
              rusqlite::params![id_str],
              RawComment::from_row,
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawComment::into_comment).transpose()
  }

  async fn like_comment(&self, id: Uuid) -> Result<Option<Comment>> {
    let id_str = encode_uuid(id);

    let raw: Option<RawComment> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!(
                "UPDATE comments SET likes = likes + 1
                  WHERE comment_id = ?1
                  RETURNING {}",
                RawComment::COLUMNS,
              ),
              rusqlite::params![id_str],
              RawComment::from_row,
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawComment::into_comment).transpose()
  }

  // ── Read counts ───────────────────────────────────────────────────────────

  async fn read_count(&self, slug: &str) -> Result<Option<ReadCount>> {
    let slug = slug.to_owned();

    let raw: Option<RawReadCount> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT slug, count, updated_at FROM read_counts WHERE slug = ?1",
              rusqlite::params![slug],
              |row| {
                Ok(RawReadCount {
                  slug:       row.get(0)?,
                  count:      row.get(1)?,
                  updated_at: row.get(2)?,
                })
              },
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawReadCount::into_read_count).transpose()
  }

  async fn increment_read_count(&self, slug: &str) -> Result<u64> {
    let slug = slug.to_owned();
    let now_str = encode_dt(Utc::now());

    // A single upsert-increment; concurrent views are serialised by SQLite
    // rather than read-modify-written by the application.
    let count: i64 = self
      .conn
      .call(move |conn| {
        Ok(conn.query_row(
          "INSERT INTO read_counts (slug, count, updated_at)
            VALUES (?1, 1, ?2)
            ON CONFLICT (slug) DO UPDATE
              SET count = count + 1, updated_at = ?2
            RETURNING count",
          rusqlite::params![slug, now_str],
          |row| row.get(0),
        )?)
      })
      .await?;

    Ok(count as u64)
  }

  async fn increment_read_count_unique(
    &self,
    slug: &str,
    visitor_id: &str,
  ) -> Result<u64> {
    let slug = slug.to_owned();
    let visitor_id = visitor_id.to_owned();
    let now_str = encode_dt(Utc::now());

    let count: i64 = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;

        tx.execute(
          "INSERT OR IGNORE INTO read_counts (slug, count, updated_at)
            VALUES (?1, 0, ?2)",
          rusqlite::params![slug, now_str],
        )?;

        // The UNIQUE (slug, visitor_id) constraint decides whether this
        // view counts.
        let first_visit = tx.execute(
          "INSERT OR IGNORE INTO read_visitors (slug, visitor_id, visited_at)
            VALUES (?1, ?2, ?3)",
          rusqlite::params![slug, visitor_id, now_str],
        )?;

        let count: i64 = if first_visit == 1 {
          tx.query_row(
            "UPDATE read_counts SET count = count + 1, updated_at = ?2
              WHERE slug = ?1
              RETURNING count",
            rusqlite::params![slug, now_str],
            |row| row.get(0),
          )?
        } else {
          tx.query_row(
            "SELECT count FROM read_counts WHERE slug = ?1",
            rusqlite::params![slug],
            |row| row.get(0),
          )?
        };

        tx.commit()?;
        Ok(count)
      })
      .await?;

    Ok(count as u64)
  }
}
