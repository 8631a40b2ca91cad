//! Markdown post corpus for quill.
//!
//! Posts live as `.md` files with a front-matter header in a single
//! directory; the slug is the file stem. This crate parses, renders and
//! queries them. Pure filesystem; no HTTP or database dependencies.
//!
//! # Quick start
//!
//! ```no_run
//! use quill_posts::PostCorpus;
//!
//! let corpus = PostCorpus::new("posts");
//! for post in corpus.all_posts().unwrap() {
//!   println!("{}  {}", post.date, post.title);
//! }
//! ```

pub mod corpus;
pub mod error;
mod parse;
mod serialize;

use chrono::NaiveDate;
use comrak::{Options, markdown_to_html};
use serde::Serialize;

pub use corpus::PostCorpus;
pub use error::{Error, Result};

// ─── Public types ────────────────────────────────────────────────────────────

/// The metadata block at the top of a post file.
#[derive(Debug, Clone)]
pub struct FrontMatter {
  pub title:     String,
  pub excerpt:   String,
  pub date:      NaiveDate,
  pub author:    String,
  pub category:  Option<String>,
  pub tags:      Vec<String>,
  pub image_url: Option<String>,
}

/// A fully-loaded post: front matter resolved against defaults, plus the
/// raw Markdown body.
#[derive(Debug, Clone, Serialize)]
pub struct Post {
  pub slug:      String,
  pub title:     String,
  pub excerpt:   String,
  pub date:      NaiveDate,
  pub author:    String,
  pub category:  String,
  pub tags:      Vec<String>,
  pub image_url: String,
  /// Raw Markdown body; render with [`render_html`].
  pub content:   String,
}

/// Category assigned to posts whose front matter does not name one.
pub const DEFAULT_CATEGORY: &str = "uncategorized";

// ─── Public API ──────────────────────────────────────────────────────────────

/// Parse one post document (front matter + body) for the given slug.
///
/// Defaults are resolved here: a missing category becomes
/// [`DEFAULT_CATEGORY`]; a missing image URL — or one that is neither
/// absolute (`http…`) nor root-relative (`/…`) — becomes
/// `/images/blog/<slug>.jpg`.
pub fn parse_post(slug: &str, input: &str) -> Result<Post> {
  let (block, body) = parse::split_front_matter(input)?;
  let fm = parse::parse_front_matter(block)?;

  let image_url = match fm.image_url {
    Some(url) if url.starts_with("http") || url.starts_with('/') => url,
    _ => format!("/images/blog/{slug}.jpg"),
  };

  Ok(Post {
    slug: slug.to_owned(),
    title: fm.title,
    excerpt: fm.excerpt,
    date: fm.date,
    author: fm.author,
    category: fm.category.unwrap_or_else(|| DEFAULT_CATEGORY.to_owned()),
    tags: fm.tags,
    image_url,
    content: body.to_owned(),
  })
}

/// Render a post body as HTML (GitHub-flavored Markdown).
pub fn render_html(markdown: &str) -> String {
  let mut options = Options::default();
  options.extension.strikethrough = true;
  options.extension.table = true;
  options.extension.autolink = true;
  options.extension.tasklist = true;
  markdown_to_html(markdown, &options)
}

/// Serialize `fm` as a front-matter block ready to prepend to a new post
/// file. Used by the post scaffolder.
pub fn front_matter_block(fm: &FrontMatter) -> String {
  serialize::front_matter_block(fm)
}

// ─── Round-trip test ─────────────────────────────────────────────────────────

#[cfg(test)]
mod roundtrip_tests {
  use super::*;

  #[test]
  fn scaffolded_front_matter_parses_back() {
    let fm = FrontMatter {
      title:     "On Read Counters".into(),
      excerpt:   "Counting views without counting twice".into(),
      date:      NaiveDate::from_ymd_opt(2026, 5, 1).unwrap(),
      author:    "Ryan".into(),
      category:  Some("engineering".into()),
      tags:      vec!["rust".into(), "caching".into()],
      image_url: None,
    };

    let document = format!("{}\n# Hello\n", front_matter_block(&fm));
    let post = parse_post("on-read-counters", &document).unwrap();

    assert_eq!(post.title, fm.title);
    assert_eq!(post.excerpt, fm.excerpt);
    assert_eq!(post.date, fm.date);
    assert_eq!(post.author, fm.author);
    assert_eq!(post.category, "engineering");
    assert_eq!(post.tags, fm.tags);
    // No image in the front matter: the slug-derived default applies.
    assert_eq!(post.image_url, "/images/blog/on-read-counters.jpg");
    assert!(post.content.contains("# Hello"));
  }

  #[test]
  fn relative_image_url_falls_back_to_default() {
    let document = "---\ntitle: \"x\"\ndate: \"2026-01-02\"\nimageUrl: \"cover.jpg\"\n---\nbody";
    let post = parse_post("x", document).unwrap();
    assert_eq!(post.image_url, "/images/blog/x.jpg");
  }

  #[test]
  fn absolute_image_url_is_kept() {
    let document =
      "---\ntitle: \"x\"\ndate: \"2026-01-02\"\nimageUrl: \"https://cdn.example.com/a.png\"\n---\nbody";
    let post = parse_post("x", document).unwrap();
    assert_eq!(post.image_url, "https://cdn.example.com/a.png");
  }

  #[test]
  fn render_html_handles_gfm_tables() {
    let html = render_html("| a | b |\n|---|---|\n| 1 | 2 |\n");
    assert!(html.contains("<table>"), "html: {html}");
  }
}
