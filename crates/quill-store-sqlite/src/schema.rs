//! SQL schema for the quill SQLite store.
//!
//! Executed once at connection startup via `PRAGMA user_version`. Future
//! migrations will be gated on that version number.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

-- Comments are flat rows; the reply tree is rebuilt on read from parent_id.
-- parent_id is not a foreign key: unresolvable parents are tolerated and the
-- affected replies are promoted to roots on read.
CREATE TABLE IF NOT EXISTS comments (
    comment_id  TEXT PRIMARY KEY,
    post_id     TEXT NOT NULL,
    parent_id   TEXT,
    author      TEXT NOT NULL,
    email       TEXT,
    avatar      TEXT,
    content     TEXT NOT NULL,
    created_at  TEXT NOT NULL,   -- ISO 8601 UTC; server-assigned
    is_approved INTEGER NOT NULL DEFAULT 1,
    likes       INTEGER NOT NULL DEFAULT 0
);

CREATE TABLE IF NOT EXISTS read_counts (
    slug       TEXT PRIMARY KEY,
    count      INTEGER NOT NULL DEFAULT 0,
    updated_at TEXT NOT NULL
);

-- One row per (slug, visitor) pair; the UNIQUE constraint is what turns a
-- repeat view into a no-op under the deduplicated increment policy.
CREATE TABLE IF NOT EXISTS read_visitors (
    slug       TEXT NOT NULL REFERENCES read_counts(slug),
    visitor_id TEXT NOT NULL,
    visited_at TEXT NOT NULL,
    UNIQUE (slug, visitor_id)
);

CREATE INDEX IF NOT EXISTS comments_post_idx    ON comments(post_id);
CREATE INDEX IF NOT EXISTS comments_created_idx ON comments(created_at);

PRAGMA user_version = 1;
";
