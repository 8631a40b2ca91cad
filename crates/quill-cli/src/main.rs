//! The `quill` companion binary.
//!
//! `quill new-post` scaffolds a post file: it slugifies the title, fills in
//! the front matter, and writes `posts/<slug>.md` ready for writing.

use std::{fs, path::PathBuf};

use anyhow::{Context as _, bail};
use chrono::Local;
use clap::{Parser, Subcommand};
use quill_posts::{FrontMatter, front_matter_block};

#[derive(Parser)]
#[command(author, version, about = "quill blog tooling")]
struct Cli {
  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand)]
enum Command {
  /// Create a new post file with populated front matter.
  NewPost {
    /// Post title; the file name is derived from it.
    title: String,

    #[arg(long, default_value = "")]
    excerpt: String,

    #[arg(long, default_value = "")]
    author: String,

    #[arg(long)]
    category: Option<String>,

    /// Comma-separated list of tags.
    #[arg(long, default_value = "")]
    tags: String,

    /// Cover image URL; defaults to `/images/blog/<slug>.jpg`.
    #[arg(long)]
    image_url: Option<String>,

    /// Directory the post file is written to.
    #[arg(long, default_value = "posts")]
    posts_dir: PathBuf,
  },
}

fn main() -> anyhow::Result<()> {
  match Cli::parse().command {
    Command::NewPost {
      title,
      excerpt,
      author,
      category,
      tags,
      image_url,
      posts_dir,
    } => {
      let slug = slugify(&title);
      if slug.is_empty() {
        bail!("title {title:?} does not produce a usable file name");
      }

      let tags = tags
        .split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_owned)
        .collect();

      let fm = FrontMatter {
        title: title.clone(),
        excerpt,
        date: Local::now().date_naive(),
        author,
        category,
        tags,
        image_url: Some(
          image_url.unwrap_or_else(|| format!("/images/blog/{slug}.jpg")),
        ),
      };

      fs::create_dir_all(&posts_dir)
        .with_context(|| format!("failed to create {posts_dir:?}"))?;

      let path = posts_dir.join(format!("{slug}.md"));
      if path.exists() {
        bail!("{path:?} already exists");
      }

      let document =
        format!("{}\n# {title}\n\nStart writing here...\n", front_matter_block(&fm));
      fs::write(&path, document)
        .with_context(|| format!("failed to write {path:?}"))?;

      println!("Created {}", path.display());
      Ok(())
    }
  }
}

/// Derive a URL-safe file name from a title.
///
/// Alphanumeric runs (CJK included) are kept and lowercased; everything else
/// collapses to a single hyphen. Leading and trailing hyphens are trimmed.
fn slugify(title: &str) -> String {
  let mut slug = String::new();
  let mut pending_hyphen = false;

  for c in title.chars() {
    if c.is_alphanumeric() {
      if pending_hyphen && !slug.is_empty() {
        slug.push('-');
      }
      pending_hyphen = false;
      for lower in c.to_lowercase() {
        slug.push(lower);
      }
    } else {
      pending_hyphen = true;
    }
  }

  slug
}
