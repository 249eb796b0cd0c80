//! SQL schema for the SQLite note store.
//!
//! The table and subject-id column names come from configuration, so the DDL
//! is rendered per store rather than being a static string.

/// Columns every conforming note table must expose, beyond the configurable
/// subject-id column.
pub const REQUIRED_COLUMNS: &[&str] = &[
  "id",
  "subject_type",
  "tag",
  "author_id",
  "is_private",
  "body",
  "created_at",
  "updated_at",
];

/// Render the DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub fn schema(table: &str, subject_id_column: &str) -> String {
  format!(
    "
PRAGMA journal_mode = WAL;

CREATE TABLE IF NOT EXISTS {table} (
    id           INTEGER PRIMARY KEY AUTOINCREMENT,
    subject_type TEXT    NOT NULL,
    {id_col}     TEXT    NOT NULL,   -- decimal or hyphenated-uuid text
    tag          TEXT    NOT NULL DEFAULT 'general',
    author_id    INTEGER,            -- cleared, not cascaded, on author deletion
    is_private   INTEGER NOT NULL DEFAULT 0,
    body         TEXT,               -- a bodiless row is a valid tag marker
    created_at   TEXT    NOT NULL,   -- ISO 8601 UTC; store-assigned
    updated_at   TEXT    NOT NULL
);

CREATE INDEX IF NOT EXISTS {table}_subject_idx
  ON {table}(subject_type, {id_col});
CREATE INDEX IF NOT EXISTS {table}_tag_privacy_recency_idx
  ON {table}(tag, is_private, created_at);
CREATE INDEX IF NOT EXISTS {table}_author_recency_idx
  ON {table}(author_id, created_at);

PRAGMA user_version = 1;
",
    id_col = subject_id_column,
  )
}
