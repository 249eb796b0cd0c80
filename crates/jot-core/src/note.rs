//! Note types — the fundamental unit of the jot store.
//!
//! A note is a free-text annotation attached to exactly one subject. Notes
//! are created and deleted, never edited in place; there is no update
//! operation anywhere in the API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::subject::SubjectKey;

/// Monotonically assigned note identifier.
///
/// Assignment order is the authoritative creation order. Reads sort on it
/// rather than on `created_at`, which can collide at sub-millisecond
/// creation rates.
pub type NoteId = i64;

/// Identifier of the user a note is attributed to.
pub type AuthorId = i64;

/// The tag stored when a caller supplies none (or a blank one).
pub const DEFAULT_TAG: &str = "general";

/// Upper bound on tag length, matching the backing column width.
pub const MAX_TAG_LEN: usize = 50;

// ─── Note ────────────────────────────────────────────────────────────────────

/// A single stored annotation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Note {
  pub id:         NoteId,
  /// The `(subject_type, subject_id)` pair identifying the owning subject.
  pub subject:    SubjectKey,
  /// Never empty; [`DEFAULT_TAG`] when the caller supplied none.
  pub tag:        String,
  pub is_private: bool,
  /// `None` for system-generated or anonymous notes, and after the author
  /// has been detached.
  pub author_id:  Option<AuthorId>,
  /// A note may exist with no content, e.g. as a pure tag marker.
  pub body:       Option<String>,
  /// Server-assigned; never accepted from callers.
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
}

// ─── NewNote ─────────────────────────────────────────────────────────────────

/// Input to [`crate::store::NoteStore::create`].
/// `id` and the timestamps are always set by the store.
#[derive(Debug, Clone, Default)]
pub struct NewNote {
  pub body:       Option<String>,
  /// Blank or absent coerces to [`DEFAULT_TAG`] at the store boundary.
  pub tag:        Option<String>,
  pub is_private: bool,
  pub author_id:  Option<AuthorId>,
}

impl NewNote {
  /// A public, untagged, unattributed note with the given body.
  pub fn new(body: impl Into<String>) -> Self {
    Self {
      body: Some(body.into()),
      ..Self::default()
    }
  }

  /// A bodiless note; useful as a pure tag marker.
  pub fn marker() -> Self { Self::default() }

  pub fn private(mut self) -> Self {
    self.is_private = true;
    self
  }

  pub fn tagged(mut self, tag: impl Into<String>) -> Self {
    self.tag = Some(tag.into());
    self
  }

  pub fn by(mut self, author: AuthorId) -> Self {
    self.author_id = Some(author);
    self
  }

  /// The tag that will actually be stored: the trimmed input, or
  /// [`DEFAULT_TAG`] when absent or blank.
  pub fn effective_tag(&self) -> &str {
    match self.tag.as_deref().map(str::trim) {
      Some(t) if !t.is_empty() => t,
      _ => DEFAULT_TAG,
    }
  }
}
