//! Reconstruction of the reply tree from a flat comment list.
//!
//! Comments are stored flat with parent pointers; the UI wants a forest.
//! The builder is two-pass and O(n): index every comment by id, then attach
//! each comment with a resolvable parent to that parent's reply list.
//! Everything else — top-level comments, but also replies whose parent was
//! filtered out of the input (e.g. by moderation) — becomes a root.
//! Orphans are promoted, never dropped.

use std::collections::HashMap;

use serde::Serialize;
use uuid::Uuid;

use crate::comment::Comment;

/// A comment together with its direct replies.
///
/// Serializes as the comment's own fields plus a `replies` array, nested
/// recursively.
#[derive(Debug, Clone, Serialize)]
pub struct CommentNode {
  #[serde(flatten)]
  pub comment: Comment,
  pub replies: Vec<CommentNode>,
}

/// Build the reply forest for one post's comments.
///
/// The input must already be filtered to a single post and is expected in
/// display order; sibling order in every `replies` list (and among roots)
/// equals input order. A `parent_id` that does not resolve within the input
/// set — including a comment naming itself — is treated as absent.
pub fn build_comment_tree(comments: Vec<Comment>) -> Vec<CommentNode> {
  let index: HashMap<Uuid, usize> = comments
    .iter()
    .enumerate()
    .map(|(i, c)| (c.comment_id, i))
    .collect();

  let mut children: Vec<Vec<usize>> = vec![Vec::new(); comments.len()];
  let mut roots: Vec<usize> = Vec::new();

  for (i, comment) in comments.iter().enumerate() {
    let parent = comment
      .parent_id
      .and_then(|pid| index.get(&pid).copied())
      .filter(|&p| p != i);
    match parent {
      Some(p) => children[p].push(i),
      None => roots.push(i),
    }
  }

  let mut slots: Vec<Option<Comment>> = comments.into_iter().map(Some).collect();

  roots
    .into_iter()
    .filter_map(|r| assemble(r, &mut slots, &children))
    .collect()
}

/// Move comment `i` and its descendants out of `slots` into a node.
///
/// A slot can only be taken once, so malformed data with a parent cycle
/// cannot make this loop; comments trapped in a cycle are unreachable from
/// any root and end up in no node at all.
fn assemble(
  i: usize,
  slots: &mut Vec<Option<Comment>>,
  children: &[Vec<usize>],
) -> Option<CommentNode> {
  let comment = slots[i].take()?;
  let replies = children[i]
    .iter()
    .filter_map(|&c| assemble(c, slots, children))
    .collect();
  Some(CommentNode { comment, replies })
}

#[cfg(test)]
mod tests {
  use chrono::Utc;

  use super::*;

  fn comment(id: Uuid, parent: Option<Uuid>) -> Comment {
    Comment {
      comment_id:  id,
      post_id:     "post".into(),
      parent_id:   parent,
      author:      "a".into(),
      email:       None,
      avatar:      None,
      content:     "c".into(),
      created_at:  Utc::now(),
      is_approved: true,
      likes:       0,
    }
  }

  fn count_nodes(nodes: &[CommentNode]) -> usize {
    nodes.iter().map(|n| 1 + count_nodes(&n.replies)).sum()
  }

  #[test]
  fn flat_input_yields_flat_forest() {
    let tree = build_comment_tree(vec![
      comment(Uuid::new_v4(), None),
      comment(Uuid::new_v4(), None),
      comment(Uuid::new_v4(), None),
    ]);
    assert_eq!(tree.len(), 3);
    assert!(tree.iter().all(|n| n.replies.is_empty()));
  }

  #[test]
  fn replies_nest_under_their_parent() {
    let root = Uuid::new_v4();
    let reply = Uuid::new_v4();
    let nested = Uuid::new_v4();

    let tree = build_comment_tree(vec![
      comment(root, None),
      comment(reply, Some(root)),
      comment(nested, Some(reply)),
    ]);

    assert_eq!(tree.len(), 1);
    assert_eq!(tree[0].comment.comment_id, root);
    assert_eq!(tree[0].replies.len(), 1);
    assert_eq!(tree[0].replies[0].comment.comment_id, reply);
    assert_eq!(tree[0].replies[0].replies[0].comment.comment_id, nested);
  }

  #[test]
  fn every_comment_appears_exactly_once() {
    let a = Uuid::new_v4();
    let b = Uuid::new_v4();
    let c = Uuid::new_v4();
    let d = Uuid::new_v4();

    let tree = build_comment_tree(vec![
      comment(a, None),
      comment(b, Some(a)),
      comment(c, Some(a)),
      comment(d, Some(b)),
    ]);

    assert_eq!(count_nodes(&tree), 4);
    // A resolvable reply never shows up as a root.
    assert_eq!(tree.len(), 1);
  }

  #[test]
  fn sibling_order_matches_input_order() {
    let root = Uuid::new_v4();
    let first = Uuid::new_v4();
    let second = Uuid::new_v4();
    let third = Uuid::new_v4();

    let tree = build_comment_tree(vec![
      comment(root, None),
      comment(first, Some(root)),
      comment(second, Some(root)),
      comment(third, Some(root)),
    ]);

    let order: Vec<Uuid> = tree[0]
      .replies
      .iter()
      .map(|n| n.comment.comment_id)
      .collect();
    assert_eq!(order, vec![first, second, third]);
  }

  #[test]
  fn orphaned_reply_is_promoted_to_root() {
    let missing_parent = Uuid::new_v4();
    let orphan = Uuid::new_v4();
    let child = Uuid::new_v4();

    // The orphan keeps its own subtree when promoted.
    let tree = build_comment_tree(vec![
      comment(orphan, Some(missing_parent)),
      comment(child, Some(orphan)),
    ]);

    assert_eq!(tree.len(), 1);
    assert_eq!(tree[0].comment.comment_id, orphan);
    assert_eq!(tree[0].replies[0].comment.comment_id, child);
  }

  #[test]
  fn self_reference_is_promoted_not_looped() {
    let id = Uuid::new_v4();
    let tree = build_comment_tree(vec![comment(id, Some(id))]);
    assert_eq!(tree.len(), 1);
    assert!(tree[0].replies.is_empty());
  }

  #[test]
  fn empty_input_yields_empty_forest() {
    assert!(build_comment_tree(Vec::new()).is_empty());
  }
}
