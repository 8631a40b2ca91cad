//! Integration tests for `SqliteStore` against an in-memory database.

use quill_core::{comment::NewComment, store::BlogStore};
use uuid::Uuid;

use crate::SqliteStore;

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

fn new_comment(post_id: &str, content: &str) -> NewComment {
  NewComment {
    post_id:   post_id.into(),
    parent_id: None,
    author:    "Alice".into(),
    email:     Some("alice@example.com".into()),
    avatar:    None,
    content:   content.into(),
  }
}

// ─── Comments ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn add_and_get_comment() {
  let s = store().await;

  let stored = s
    .add_comment(new_comment("hello-world", "first!"), true)
    .await
    .unwrap();
  assert!(stored.is_approved);
  assert_eq!(stored.likes, 0);

  let fetched = s.get_comment(stored.comment_id).await.unwrap().unwrap();
  assert_eq!(fetched.comment_id, stored.comment_id);
  assert_eq!(fetched.post_id, "hello-world");
  assert_eq!(fetched.author, "Alice");
  assert_eq!(fetched.email.as_deref(), Some("alice@example.com"));
  assert_eq!(fetched.content, "first!");
  assert_eq!(fetched.created_at, stored.created_at);
}

#[tokio::test]
async fn get_comment_missing_returns_none() {
  let s = store().await;
  assert!(s.get_comment(Uuid::new_v4()).await.unwrap().is_none());
}

#[tokio::test]
async fn parent_id_round_trips() {
  let s = store().await;

  let parent = s
    .add_comment(new_comment("post", "parent"), true)
    .await
    .unwrap();

  let mut reply = new_comment("post", "reply");
  reply.parent_id = Some(parent.comment_id);
  let stored = s.add_comment(reply, true).await.unwrap();

  let fetched = s.get_comment(stored.comment_id).await.unwrap().unwrap();
  assert_eq!(fetched.parent_id, Some(parent.comment_id));
}

#[tokio::test]
async fn comments_for_post_newest_first() {
  let s = store().await;

  let a = s.add_comment(new_comment("post", "a"), true).await.unwrap();
  let b = s.add_comment(new_comment("post", "b"), true).await.unwrap();
  let c = s.add_comment(new_comment("post", "c"), true).await.unwrap();

  let list = s.comments_for_post("post").await.unwrap();
  let ids: Vec<Uuid> = list.iter().map(|c| c.comment_id).collect();
  assert_eq!(ids, vec![c.comment_id, b.comment_id, a.comment_id]);
}

#[tokio::test]
async fn comments_for_post_excludes_unapproved() {
  let s = store().await;

  s.add_comment(new_comment("post", "visible"), true)
    .await
    .unwrap();
  s.add_comment(new_comment("post", "held"), false)
    .await
    .unwrap();

  let list = s.comments_for_post("post").await.unwrap();
  assert_eq!(list.len(), 1);
  assert_eq!(list[0].content, "visible");
}

#[tokio::test]
async fn comments_for_post_excludes_other_posts() {
  let s = store().await;

  s.add_comment(new_comment("mine", "here"), true).await.unwrap();
  s.add_comment(new_comment("other", "there"), true)
    .await
    .unwrap();

  let list = s.comments_for_post("mine").await.unwrap();
  assert_eq!(list.len(), 1);
  assert_eq!(list[0].post_id, "mine");
}

#[tokio::test]
async fn like_comment_increments() {
  let s = store().await;
  let stored = s.add_comment(new_comment("post", "hi"), true).await.unwrap();

  let liked = s.like_comment(stored.comment_id).await.unwrap().unwrap();
  assert_eq!(liked.likes, 1);

  let liked = s.like_comment(stored.comment_id).await.unwrap().unwrap();
  assert_eq!(liked.likes, 2);
}

#[tokio::test]
async fn like_missing_comment_returns_none() {
  let s = store().await;
  assert!(s.like_comment(Uuid::new_v4()).await.unwrap().is_none());
}

// ─── Read counts ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn read_count_missing_returns_none() {
  let s = store().await;
  assert!(s.read_count("never-read").await.unwrap().is_none());
}

#[tokio::test]
async fn unconditional_increment_advances_by_n() {
  let s = store().await;

  assert_eq!(s.increment_read_count("post").await.unwrap(), 1);
  assert_eq!(s.increment_read_count("post").await.unwrap(), 2);
  assert_eq!(s.increment_read_count("post").await.unwrap(), 3);

  let record = s.read_count("post").await.unwrap().unwrap();
  assert_eq!(record.slug, "post");
  assert_eq!(record.count, 3);
}

#[tokio::test]
async fn unique_increment_dedupes_repeat_visitors() {
  let s = store().await;

  assert_eq!(
    s.increment_read_count_unique("post", "visitor-a").await.unwrap(),
    1
  );
  // Same visitor again: count must not advance.
  assert_eq!(
    s.increment_read_count_unique("post", "visitor-a").await.unwrap(),
    1
  );
  // A different visitor does.
  assert_eq!(
    s.increment_read_count_unique("post", "visitor-b").await.unwrap(),
    2
  );

  let record = s.read_count("post").await.unwrap().unwrap();
  assert_eq!(record.count, 2);
}

#[tokio::test]
async fn visitors_are_tracked_per_slug() {
  let s = store().await;

  assert_eq!(
    s.increment_read_count_unique("one", "visitor").await.unwrap(),
    1
  );
  // The same visitor on another post is a fresh view there.
  assert_eq!(
    s.increment_read_count_unique("two", "visitor").await.unwrap(),
    1
  );
}

#[tokio::test]
async fn counters_are_independent_per_slug() {
  let s = store().await;

  s.increment_read_count("one").await.unwrap();
  s.increment_read_count("one").await.unwrap();
  s.increment_read_count("two").await.unwrap();

  assert_eq!(s.read_count("one").await.unwrap().unwrap().count, 2);
  assert_eq!(s.read_count("two").await.unwrap().unwrap().count, 1);
}
