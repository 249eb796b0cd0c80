//! Encoding and decoding between domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! Timestamps are stored as RFC 3339 strings. Subject ids are stored as
//! text in both deployment flavours: decimal digits for integer keys,
//! hyphenated lowercase for UUIDs.

use chrono::{DateTime, Utc};
use jot_core::{
  note::Note,
  subject::{SubjectId, SubjectKey},
};

use crate::{Error, Result};

// ─── DateTime<Utc> ───────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── SubjectId ───────────────────────────────────────────────────────────────

pub fn encode_subject_id(id: SubjectId) -> String { id.to_string() }

pub fn decode_subject_id(s: &str) -> Result<SubjectId> { Ok(s.parse()?) }

// ─── Row type ────────────────────────────────────────────────────────────────

/// Raw values read directly from a notes row.
pub struct RawNote {
  pub id:           i64,
  pub subject_type: String,
  pub subject_id:   String,
  pub tag:          String,
  pub author_id:    Option<i64>,
  pub is_private:   bool,
  pub body:         Option<String>,
  pub created_at:   String,
  pub updated_at:   String,
}

impl RawNote {
  pub fn into_note(self) -> Result<Note> {
    Ok(Note {
      id:         self.id,
      subject:    SubjectKey {
        subject_type: self.subject_type,
        subject_id:   decode_subject_id(&self.subject_id)?,
      },
      tag:        self.tag,
      is_private: self.is_private,
      author_id:  self.author_id,
      body:       self.body,
      created_at: decode_dt(&self.created_at)?,
      updated_at: decode_dt(&self.updated_at)?,
    })
  }
}
