//! Subject association — how notes find their owner.
//!
//! Notes live in one shared table; a row belongs to a subject through the
//! stored `(subject_type, subject_id)` pair. The type discriminator is an
//! explicit stable name chosen by the application, never derived from the
//! Rust type, so a subject type can be renamed without orphaning its rows.

use std::{collections::HashMap, fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ─── SubjectId ───────────────────────────────────────────────────────────────

/// A subject's own primary identifier.
///
/// Deployments use integer keys or UUIDs; the choice is stable per
/// deployment. Both encode to text in the backing column: decimal digits for
/// integers, hyphenated lowercase for UUIDs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SubjectId {
  Int(i64),
  Uuid(Uuid),
}

impl fmt::Display for SubjectId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::Int(n) => write!(f, "{n}"),
      Self::Uuid(u) => write!(f, "{}", u.hyphenated()),
    }
  }
}

impl FromStr for SubjectId {
  type Err = uuid::Error;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    if let Ok(n) = s.parse::<i64>() {
      return Ok(Self::Int(n));
    }
    Uuid::parse_str(s).map(Self::Uuid)
  }
}

impl From<i64> for SubjectId {
  fn from(n: i64) -> Self { Self::Int(n) }
}

impl From<Uuid> for SubjectId {
  fn from(u: Uuid) -> Self { Self::Uuid(u) }
}

// ─── SubjectKey ──────────────────────────────────────────────────────────────

/// The association key identifying one subject's notes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SubjectKey {
  pub subject_type: String,
  pub subject_id:   SubjectId,
}

impl SubjectKey {
  pub fn new(
    subject_type: impl Into<String>,
    subject_id: impl Into<SubjectId>,
  ) -> Self {
    Self {
      subject_type: subject_type.into(),
      subject_id:   subject_id.into(),
    }
  }

  /// Resolve a subject's key, routing its type name through `aliases`.
  pub fn for_subject(subject: &impl Subject, aliases: &TypeAliases) -> Self {
    Self {
      subject_type: aliases.resolve(subject.subject_type()).to_owned(),
      subject_id:   subject.subject_id(),
    }
  }
}

// ─── Subject ─────────────────────────────────────────────────────────────────

/// Any entity that can own notes.
///
/// `subject_type` must be an explicit stable discriminator. Do not derive it
/// from `std::any::type_name`, whose output is unspecified and changes under
/// refactors — the exact failure the stored type string exists to avoid.
pub trait Subject {
  fn subject_type(&self) -> &str;
  fn subject_id(&self) -> SubjectId;
}

// ─── TypeAliases ─────────────────────────────────────────────────────────────

/// Remaps concrete type names to the short aliases stored in rows, so a
/// concrete type can be renamed without invalidating existing notes.
/// Unmapped names pass through unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TypeAliases(HashMap<String, String>);

impl TypeAliases {
  pub fn new() -> Self { Self::default() }

  pub fn map(
    mut self,
    concrete: impl Into<String>,
    alias: impl Into<String>,
  ) -> Self {
    self.0.insert(concrete.into(), alias.into());
    self
  }

  pub fn resolve<'a>(&'a self, concrete: &'a str) -> &'a str {
    self.0.get(concrete).map_or(concrete, String::as_str)
  }
}

impl From<HashMap<String, String>> for TypeAliases {
  fn from(map: HashMap<String, String>) -> Self { Self(map) }
}
