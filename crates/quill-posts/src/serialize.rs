//! Front-matter writer — the inverse of [`crate::parse`].
//!
//! Emits exactly the grammar the parser accepts: double-quoted scalars,
//! bracketed tag lists, `YYYY-MM-DD` dates.

use crate::FrontMatter;

pub(crate) fn front_matter_block(fm: &FrontMatter) -> String {
  let mut out = String::from("---\n");
  push_field(&mut out, "title", &fm.title);
  push_field(&mut out, "excerpt", &fm.excerpt);
  push_field(&mut out, "date", &fm.date.format("%Y-%m-%d").to_string());
  push_field(&mut out, "author", &fm.author);
  if let Some(category) = &fm.category {
    push_field(&mut out, "category", category);
  }
  let tags = fm
    .tags
    .iter()
    .map(|t| format!("\"{}\"", escape(t)))
    .collect::<Vec<_>>()
    .join(", ");
  out.push_str(&format!("tags: [{tags}]\n"));
  if let Some(url) = &fm.image_url {
    push_field(&mut out, "imageUrl", url);
  }
  out.push_str("---\n");
  out
}

fn push_field(out: &mut String, key: &str, value: &str) {
  out.push_str(&format!("{key}: \"{}\"\n", escape(value)));
}

/// Double quotes inside values would break the quoting; drop them.
fn escape(s: &str) -> String {
  s.replace('"', "")
}

#[cfg(test)]
mod tests {
  use chrono::NaiveDate;

  use super::*;

  #[test]
  fn block_is_fenced_and_quoted() {
    let fm = FrontMatter {
      title:     "Hello".into(),
      excerpt:   "".into(),
      date:      NaiveDate::from_ymd_opt(2026, 1, 2).unwrap(),
      author:    "Ryan".into(),
      category:  None,
      tags:      vec![],
      image_url: Some("/images/blog/hello.jpg".into()),
    };

    let block = front_matter_block(&fm);
    assert!(block.starts_with("---\n"));
    assert!(block.ends_with("---\n"));
    assert!(block.contains("title: \"Hello\"\n"));
    assert!(block.contains("date: \"2026-01-02\"\n"));
    assert!(block.contains("tags: []\n"));
  }
}
