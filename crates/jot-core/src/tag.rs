//! Tag-set normalization.
//!
//! Every filter and delete-by-tag operation accepts a possibly-nested
//! collection of tags. It is flattened, blank entries are dropped, and
//! duplicates removed once here at the API boundary; nothing further in
//! re-normalizes.

use serde::{Deserialize, Serialize};

// ─── TagArg ──────────────────────────────────────────────────────────────────

/// One argument in a tag list: a single tag or a nested batch.
#[derive(Debug, Clone)]
pub enum TagArg {
  One(String),
  Many(Vec<String>),
}

impl From<&str> for TagArg {
  fn from(tag: &str) -> Self { Self::One(tag.to_owned()) }
}

impl From<String> for TagArg {
  fn from(tag: String) -> Self { Self::One(tag) }
}

impl From<Vec<String>> for TagArg {
  fn from(tags: Vec<String>) -> Self { Self::Many(tags) }
}

impl From<&[&str]> for TagArg {
  fn from(tags: &[&str]) -> Self {
    Self::Many(tags.iter().map(|t| (*t).to_owned()).collect())
  }
}

// ─── TagFilter ───────────────────────────────────────────────────────────────

/// A normalized, deduplicated set of tags. The empty filter matches every
/// tag.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagFilter(Vec<String>);

impl TagFilter {
  /// The filter that matches all tags.
  pub fn all() -> Self { Self::default() }

  /// Flatten `args`, trim each entry, drop blanks, and deduplicate.
  pub fn new<I, A>(args: I) -> Self
  where
    I: IntoIterator<Item = A>,
    A: Into<TagArg>,
  {
    let mut tags = Vec::new();
    for arg in args {
      match arg.into() {
        TagArg::One(tag) => push_normalized(&mut tags, &tag),
        TagArg::Many(batch) => {
          for tag in &batch {
            push_normalized(&mut tags, tag);
          }
        }
      }
    }
    Self(tags)
  }

  pub fn is_empty(&self) -> bool { self.0.is_empty() }

  pub fn tags(&self) -> &[String] { &self.0 }

  /// Whether a note with `tag` passes this filter.
  pub fn matches(&self, tag: &str) -> bool {
    self.is_empty() || self.0.iter().any(|t| t == tag)
  }
}

fn push_normalized(tags: &mut Vec<String>, raw: &str) {
  let trimmed = raw.trim();
  if !trimmed.is_empty() && !tags.iter().any(|t| t == trimmed) {
    tags.push(trimmed.to_owned());
  }
}

impl From<()> for TagFilter {
  fn from(_: ()) -> Self { Self::all() }
}

impl From<&str> for TagFilter {
  fn from(tag: &str) -> Self { Self::new([tag]) }
}

impl From<String> for TagFilter {
  fn from(tag: String) -> Self { Self::new([tag]) }
}

impl From<Vec<String>> for TagFilter {
  fn from(tags: Vec<String>) -> Self { Self::new(tags) }
}

impl From<&[&str]> for TagFilter {
  fn from(tags: &[&str]) -> Self { Self::new(tags.iter().copied()) }
}

impl<const N: usize> From<[&str; N]> for TagFilter {
  fn from(tags: [&str; N]) -> Self { Self::new(tags) }
}
