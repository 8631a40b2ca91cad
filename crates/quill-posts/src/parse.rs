//! Front-matter parser for post files.
//!
//! Pipeline:
//!   raw &str
//!     └─ split_front_matter()   → (block, body)
//!          └─ parse_line()      → (key, raw value)
//!               └─ unquote() / parse_list() → FrontMatter fields
//!
//! The grammar is the `---`-fenced `key: value` block that the post
//! scaffolder emits: scalar values optionally double-quoted, `tags` a
//! bracketed, comma-separated list. Unknown keys are ignored so posts can
//! carry extra metadata without breaking older readers.

use chrono::NaiveDate;

use crate::{
  FrontMatter,
  error::{Error, Result},
};

/// Split `input` into its front-matter block and the Markdown body.
///
/// The opening `---` must be the first non-blank line; the block runs to the
/// next `---` line. Everything after that is the body, verbatim.
pub(crate) fn split_front_matter(input: &str) -> Result<(&str, &str)> {
  let trimmed = input.trim_start_matches(['\u{feff}']);
  let rest = trimmed.trim_start();
  let rest = rest
    .strip_prefix("---")
    .ok_or(Error::MissingFrontMatter)?
    .strip_prefix(['\r', '\n'])
    .map(|r| r.trim_start_matches('\n'))
    .ok_or(Error::MissingFrontMatter)?;

  let mut offset = 0;
  for line in rest.split_inclusive('\n') {
    if line.trim_end() == "---" {
      let block = &rest[..offset];
      let body = &rest[offset + line.len()..];
      return Ok((block, body));
    }
    offset += line.len();
  }

  Err(Error::MissingFrontMatter)
}

/// Parse a front-matter block into a [`FrontMatter`].
pub(crate) fn parse_front_matter(block: &str) -> Result<FrontMatter> {
  let mut title = None;
  let mut excerpt = None;
  let mut date = None;
  let mut author = None;
  let mut category = None;
  let mut tags = Vec::new();
  let mut image_url = None;

  for line in block.lines() {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
      continue;
    }

    let (key, value) = line
      .split_once(':')
      .ok_or_else(|| Error::MalformedLine(line.to_owned()))?;
    let key = key.trim();
    let value = value.trim();

    match key {
      "title" => title = Some(unquote(value).to_owned()),
      "excerpt" => excerpt = Some(unquote(value).to_owned()),
      "date" => date = Some(parse_date(unquote(value))?),
      "author" => author = Some(unquote(value).to_owned()),
      "category" => category = Some(unquote(value).to_owned()),
      "tags" => tags = parse_list(value)?,
      "imageUrl" => image_url = Some(unquote(value).to_owned()),
      _ => {} // unknown key — ignored
    }
  }

  Ok(FrontMatter {
    title: title.ok_or(Error::MissingField("title"))?,
    excerpt: excerpt.unwrap_or_default(),
    date: date.ok_or(Error::MissingField("date"))?,
    author: author.unwrap_or_default(),
    category,
    tags,
    image_url,
  })
}

/// Strip one pair of surrounding double quotes, if present.
fn unquote(s: &str) -> &str {
  s.strip_prefix('"')
    .and_then(|s| s.strip_suffix('"'))
    .unwrap_or(s)
}

fn parse_date(s: &str) -> Result<NaiveDate> {
  NaiveDate::parse_from_str(s, "%Y-%m-%d")
    .map_err(|_| Error::InvalidDate(s.to_owned()))
}

/// Parse a `["a", "b"]`-style bracketed list. Empty brackets and bare
/// (unquoted) items are both accepted.
fn parse_list(s: &str) -> Result<Vec<String>> {
  let inner = s
    .strip_prefix('[')
    .and_then(|s| s.strip_suffix(']'))
    .ok_or_else(|| Error::MalformedLine(s.to_owned()))?;

  Ok(
    inner
      .split(',')
      .map(|item| unquote(item.trim()).to_owned())
      .filter(|item| !item.is_empty())
      .collect(),
  )
}
