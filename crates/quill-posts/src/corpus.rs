//! Directory-backed post collection and its query surface.

use std::{
  fs,
  path::{Path, PathBuf},
};

use crate::{Post, Result, parse_post};

/// All posts under one directory, loaded on demand.
///
/// Queries re-read the directory each time — the corpus of a personal blog
/// is small and edits to post files should show up without a restart.
/// A file that fails to parse is skipped with a warning, never an error:
/// one malformed post must not take the whole blog down.
#[derive(Debug, Clone)]
pub struct PostCorpus {
  dir: PathBuf,
}

impl PostCorpus {
  pub fn new(dir: impl Into<PathBuf>) -> Self {
    Self { dir: dir.into() }
  }

  pub fn dir(&self) -> &Path {
    &self.dir
  }

  /// All parseable posts, newest first.
  pub fn all_posts(&self) -> Result<Vec<Post>> {
    let mut posts = Vec::new();

    for entry in fs::read_dir(&self.dir)? {
      let path = entry?.path();
      let Some(slug) = post_slug(&path) else { continue };

      match self.load(&path, slug) {
        Ok(post) => posts.push(post),
        Err(e) => {
          tracing::warn!(path = %path.display(), error = %e, "skipping unparseable post");
        }
      }
    }

    posts.sort_by(|a, b| b.date.cmp(&a.date));
    Ok(posts)
  }

  /// Fetch one post by slug. Returns `None` when no such file exists.
  pub fn post_by_slug(&self, slug: &str) -> Result<Option<Post>> {
    let path = self.dir.join(format!("{slug}.md"));
    if !path.is_file() {
      return Ok(None);
    }
    self.load(&path, slug.to_owned()).map(Some)
  }

  /// The slugs of every `.md` file in the directory, parseable or not.
  pub fn all_slugs(&self) -> Result<Vec<String>> {
    let mut slugs = Vec::new();
    for entry in fs::read_dir(&self.dir)? {
      if let Some(slug) = post_slug(&entry?.path()) {
        slugs.push(slug);
      }
    }
    Ok(slugs)
  }

  /// Every tag in use, deduplicated, in first-seen order.
  pub fn all_tags(&self) -> Result<Vec<String>> {
    let mut tags: Vec<String> = Vec::new();
    for post in self.all_posts()? {
      for tag in post.tags {
        if !tags.contains(&tag) {
          tags.push(tag);
        }
      }
    }
    Ok(tags)
  }

  pub fn posts_by_tag(&self, tag: &str) -> Result<Vec<Post>> {
    let mut posts = self.all_posts()?;
    posts.retain(|p| p.tags.iter().any(|t| t == tag));
    Ok(posts)
  }

  /// Every category in use, deduplicated, in first-seen order.
  pub fn all_categories(&self) -> Result<Vec<String>> {
    let mut categories: Vec<String> = Vec::new();
    for post in self.all_posts()? {
      if !categories.contains(&post.category) {
        categories.push(post.category);
      }
    }
    Ok(categories)
  }

  pub fn posts_by_category(&self, category: &str) -> Result<Vec<Post>> {
    let mut posts = self.all_posts()?;
    posts.retain(|p| p.category == category);
    Ok(posts)
  }

  fn load(&self, path: &Path, slug: String) -> Result<Post> {
    let input = fs::read_to_string(path)?;
    parse_post(&slug, &input)
  }
}

/// The slug for a path, if it names a Markdown post file.
fn post_slug(path: &Path) -> Option<String> {
  if path.extension()?.to_str()? != "md" {
    return None;
  }
  Some(path.file_stem()?.to_str()?.to_owned())
}

#[cfg(test)]
mod tests {
  use std::fs;

  use super::*;

  fn corpus_with(posts: &[(&str, &str)]) -> (tempfile::TempDir, PostCorpus) {
    let dir = tempfile::TempDir::new().unwrap();
    for (name, contents) in posts {
      fs::write(dir.path().join(name), contents).unwrap();
    }
    let corpus = PostCorpus::new(dir.path());
    (dir, corpus)
  }

  fn post(title: &str, date: &str, category: &str, tags: &str) -> String {
    format!(
      "---\ntitle: \"{title}\"\ndate: \"{date}\"\ncategory: \"{category}\"\ntags: {tags}\n---\nbody\n"
    )
  }

  #[test]
  fn all_posts_sorted_newest_first() {
    let (_dir, corpus) = corpus_with(&[
      ("old.md", &post("Old", "2025-01-01", "a", "[]")),
      ("new.md", &post("New", "2026-06-01", "a", "[]")),
      ("mid.md", &post("Mid", "2025-12-31", "b", "[]")),
    ]);

    let titles: Vec<String> =
      corpus.all_posts().unwrap().into_iter().map(|p| p.title).collect();
    assert_eq!(titles, vec!["New", "Mid", "Old"]);
  }

  #[test]
  fn malformed_posts_are_skipped() {
    let (_dir, corpus) = corpus_with(&[
      ("good.md", &post("Good", "2026-01-01", "a", "[]")),
      ("bad.md", "no front matter at all\n"),
    ]);

    let posts = corpus.all_posts().unwrap();
    assert_eq!(posts.len(), 1);
    assert_eq!(posts[0].title, "Good");
  }

  #[test]
  fn non_markdown_files_are_ignored() {
    let (_dir, corpus) = corpus_with(&[
      ("post.md", &post("Post", "2026-01-01", "a", "[]")),
      ("notes.txt", "not a post"),
    ]);

    assert_eq!(corpus.all_slugs().unwrap(), vec!["post"]);
  }

  #[test]
  fn post_by_slug_finds_the_file() {
    let (_dir, corpus) =
      corpus_with(&[("hello-world.md", &post("Hello", "2026-01-01", "a", "[]"))]);

    let found = corpus.post_by_slug("hello-world").unwrap().unwrap();
    assert_eq!(found.slug, "hello-world");
    assert_eq!(found.title, "Hello");

    assert!(corpus.post_by_slug("missing").unwrap().is_none());
  }

  #[test]
  fn tags_and_categories_deduplicate() {
    let (_dir, corpus) = corpus_with(&[
      ("a.md", &post("A", "2026-01-03", "eng", "[\"rust\", \"web\"]")),
      ("b.md", &post("B", "2026-01-02", "eng", "[\"rust\"]")),
      ("c.md", &post("C", "2026-01-01", "life", "[]")),
    ]);

    assert_eq!(corpus.all_tags().unwrap(), vec!["rust", "web"]);
    assert_eq!(corpus.all_categories().unwrap(), vec!["eng", "life"]);
    assert_eq!(corpus.posts_by_tag("rust").unwrap().len(), 2);
    assert_eq!(corpus.posts_by_category("life").unwrap().len(), 1);
  }
}
