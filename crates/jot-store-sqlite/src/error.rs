//! Error type for `jot-store-sqlite`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("core error: {0}")]
  Core(#[from] jot_core::Error),

  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("subject id parse error: {0}")]
  SubjectId(#[from] uuid::Error),

  #[error("date/time parse error: {0}")]
  DateParse(String),

  /// The configured table exists but does not expose the note contract.
  /// Raised at open, never at first use.
  #[error("table {table:?} is missing required column {column:?}")]
  SchemaMismatch { table: String, column: String },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
