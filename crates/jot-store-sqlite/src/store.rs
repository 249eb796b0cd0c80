//! [`SqliteNoteStore`] — the SQLite implementation of [`NoteStore`].

use std::{path::Path, sync::Arc};

use chrono::Utc;
use rusqlite::{OptionalExtension as _, types::Value};

use jot_core::{
  config::NotesConfig,
  hook::NoteHook,
  note::{AuthorId, MAX_TAG_LEN, NewNote, Note, NoteId},
  store::NoteStore,
  subject::SubjectKey,
  tag::TagFilter,
};

use crate::{
  Error, Result,
  encode::{RawNote, encode_dt, encode_subject_id},
  schema::{REQUIRED_COLUMNS, schema},
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A note store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted, and the
/// naming configuration and hook are shared.
#[derive(Clone)]
pub struct SqliteNoteStore {
  conn:   tokio_rusqlite::Connection,
  table:  Arc<str>,
  id_col: Arc<str>,
  hook:   Option<Arc<dyn NoteHook>>,
}

impl std::fmt::Debug for SqliteNoteStore {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("SqliteNoteStore")
      .field("table", &self.table)
      .field("id_col", &self.id_col)
      .finish_non_exhaustive()
  }
}

impl SqliteNoteStore {
  /// Open the connection selected by `config` (named connection, falling
  /// back to the `"default"` entry) and initialise or verify the table.
  pub async fn open(config: &NotesConfig) -> Result<Self> {
    let path = config.connection_path().map_err(Error::Core)?.to_owned();
    let conn = tokio_rusqlite::Connection::open(path).await?;
    Self::with_connection(conn, config).await
  }

  /// Open a store at an explicit path, bypassing connection selection.
  pub async fn open_at(
    path: impl AsRef<Path>,
    config: &NotesConfig,
  ) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path.as_ref()).await?;
    Self::with_connection(conn, config).await
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory(config: &NotesConfig) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    Self::with_connection(conn, config).await
  }

  async fn with_connection(
    conn: tokio_rusqlite::Connection,
    config: &NotesConfig,
  ) -> Result<Self> {
    let store = Self {
      conn,
      table: Arc::from(config.table.as_str()),
      id_col: Arc::from(config.subject_id_column.as_str()),
      hook: None,
    };
    if store.table_exists().await? {
      store.verify_schema().await?;
    } else {
      store.init_schema().await?;
    }
    Ok(store)
  }

  /// Register the hook notified once per created note. Consumer failures
  /// are logged at `warn` and never propagate to the caller of `create`.
  pub fn with_hook(mut self, hook: Arc<dyn NoteHook>) -> Self {
    self.hook = Some(hook);
    self
  }

  async fn table_exists(&self) -> Result<bool> {
    let name = self.table.to_string();
    let exists = self
      .conn
      .call(move |conn| {
        let exists: bool = conn
          .query_row(
            "SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?1",
            rusqlite::params![name],
            |_| Ok(true),
          )
          .optional()?
          .unwrap_or(false);
        Ok(exists)
      })
      .await?;
    Ok(exists)
  }

  async fn init_schema(&self) -> Result<()> {
    let ddl = schema(&self.table, &self.id_col);
    self
      .conn
      .call(move |conn| {
        conn.execute_batch(&ddl)?;
        Ok(())
      })
      .await?;
    tracing::debug!(table = %self.table, "note schema initialised");
    Ok(())
  }

  /// Structural check that the (possibly pre-existing, possibly renamed)
  /// table exposes the note contract. Runs at open so a bad configuration
  /// fails at startup, not at first use.
  async fn verify_schema(&self) -> Result<()> {
    let table = Arc::clone(&self.table);
    let columns: Vec<String> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&format!("PRAGMA table_info({table})"))?;
        let names = stmt
          .query_map([], |row| row.get::<_, String>(1))?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(names)
      })
      .await?;

    let mut required: Vec<&str> = REQUIRED_COLUMNS.to_vec();
    required.push(&self.id_col);

    for column in required {
      if !columns.iter().any(|c| c == column) {
        return Err(Error::SchemaMismatch {
          table:  self.table.to_string(),
          column: column.to_owned(),
        });
      }
    }
    Ok(())
  }

  /// Shared SELECT path for `find`, `find_latest` and `find_private`.
  async fn query_notes(
    &self,
    subject: &SubjectKey,
    tags: &TagFilter,
    private_only: bool,
    limit: Option<usize>,
  ) -> Result<Vec<Note>> {
    let table = Arc::clone(&self.table);
    let id_col = Arc::clone(&self.id_col);
    let subject_type = subject.subject_type.clone();
    let subject_id = encode_subject_id(subject.subject_id);
    let tags: Vec<String> = tags.tags().to_vec();

    let raws: Vec<RawNote> = self
      .conn
      .call(move |conn| {
        let mut sql = format!(
          "SELECT id, subject_type, {id_col}, tag, author_id, is_private,
                  body, created_at, updated_at
           FROM {table}
           WHERE subject_type = ?1 AND {id_col} = ?2"
        );
        if !tags.is_empty() {
          sql.push_str(&format!(" AND tag IN ({})", placeholders(tags.len(), 3)));
        }
        if private_only {
          sql.push_str(" AND is_private = 1");
        }
        sql.push_str(" ORDER BY id DESC");
        if let Some(n) = limit {
          sql.push_str(&format!(" LIMIT {n}"));
        }

        let mut params: Vec<Value> =
          vec![Value::Text(subject_type), Value::Text(subject_id)];
        params.extend(tags.into_iter().map(Value::Text));

        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
          .query_map(rusqlite::params_from_iter(params), |row| {
            Ok(RawNote {
              id:           row.get(0)?,
              subject_type: row.get(1)?,
              subject_id:   row.get(2)?,
              tag:          row.get(3)?,
              author_id:    row.get(4)?,
              is_private:   row.get(5)?,
              body:         row.get(6)?,
              created_at:   row.get(7)?,
              updated_at:   row.get(8)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawNote::into_note).collect()
  }
}

/// Render `?start, ?start+1, …` for a dynamic IN list.
fn placeholders(count: usize, start: usize) -> String {
  (0..count)
    .map(|i| format!("?{}", start + i))
    .collect::<Vec<_>>()
    .join(", ")
}

// ─── NoteStore impl ──────────────────────────────────────────────────────────

impl NoteStore for SqliteNoteStore {
  type Error = Error;

  async fn create(&self, subject: &SubjectKey, input: NewNote) -> Result<Note> {
    let tag = input.effective_tag().to_owned();
    if tag.chars().count() > MAX_TAG_LEN {
      return Err(Error::Core(jot_core::Error::TagTooLong {
        tag,
        max: MAX_TAG_LEN,
      }));
    }

    let now = Utc::now();
    let table = Arc::clone(&self.table);
    let id_col = Arc::clone(&self.id_col);
    let subject_type = subject.subject_type.clone();
    let subject_id = encode_subject_id(subject.subject_id);
    let now_str = encode_dt(now);
    let tag_param = tag.clone();
    let body = input.body.clone();
    let author_id = input.author_id;
    let is_private = input.is_private;

    let id: NoteId = self
      .conn
      .call(move |conn| {
        conn.execute(
          &format!(
            "INSERT INTO {table}
               (subject_type, {id_col}, tag, author_id, is_private, body,
                created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)"
          ),
          rusqlite::params![
            subject_type,
            subject_id,
            tag_param,
            author_id,
            is_private,
            body,
            now_str,
            now_str,
          ],
        )?;
        Ok(conn.last_insert_rowid())
      })
      .await?;

    let note = Note {
      id,
      subject: subject.clone(),
      tag,
      is_private: input.is_private,
      author_id: input.author_id,
      body: input.body,
      created_at: now,
      updated_at: now,
    };

    if let Some(hook) = &self.hook {
      if let Err(err) = hook.note_added(&note) {
        // Consumer failures never roll back or fail the write.
        tracing::warn!(note_id = note.id, error = %err, "note hook failed");
      }
    }

    Ok(note)
  }

  async fn find(&self, subject: &SubjectKey, tags: &TagFilter) -> Result<Vec<Note>> {
    self.query_notes(subject, tags, false, None).await
  }

  async fn find_latest(
    &self,
    subject: &SubjectKey,
    tags: &TagFilter,
  ) -> Result<Option<Note>> {
    Ok(
      self
        .query_notes(subject, tags, false, Some(1))
        .await?
        .into_iter()
        .next(),
    )
  }

  async fn find_private(
    &self,
    subject: &SubjectKey,
    tags: &TagFilter,
  ) -> Result<Vec<Note>> {
    self.query_notes(subject, tags, true, None).await
  }

  async fn delete_by_ids(
    &self,
    subject: &SubjectKey,
    ids: &[NoteId],
  ) -> Result<usize> {
    if ids.is_empty() {
      return Ok(0);
    }

    let table = Arc::clone(&self.table);
    let id_col = Arc::clone(&self.id_col);
    let subject_type = subject.subject_type.clone();
    let subject_id = encode_subject_id(subject.subject_id);
    let ids = ids.to_vec();

    let deleted = self
      .conn
      .call(move |conn| {
        let sql = format!(
          "DELETE FROM {table}
           WHERE subject_type = ?1 AND {id_col} = ?2
             AND id IN ({})",
          placeholders(ids.len(), 3),
        );

        let mut params: Vec<Value> =
          vec![Value::Text(subject_type), Value::Text(subject_id)];
        params.extend(ids.into_iter().map(Value::Integer));

        Ok(conn.execute(&sql, rusqlite::params_from_iter(params))?)
      })
      .await?;

    Ok(deleted)
  }

  async fn delete_by_tags(
    &self,
    subject: &SubjectKey,
    tags: &TagFilter,
  ) -> Result<usize> {
    if tags.is_empty() {
      return Ok(0);
    }

    let table = Arc::clone(&self.table);
    let id_col = Arc::clone(&self.id_col);
    let subject_type = subject.subject_type.clone();
    let subject_id = encode_subject_id(subject.subject_id);
    let tags: Vec<String> = tags.tags().to_vec();

    let deleted = self
      .conn
      .call(move |conn| {
        let sql = format!(
          "DELETE FROM {table}
           WHERE subject_type = ?1 AND {id_col} = ?2
             AND tag IN ({})",
          placeholders(tags.len(), 3),
        );

        let mut params: Vec<Value> =
          vec![Value::Text(subject_type), Value::Text(subject_id)];
        params.extend(tags.into_iter().map(Value::Text));

        Ok(conn.execute(&sql, rusqlite::params_from_iter(params))?)
      })
      .await?;

    Ok(deleted)
  }

  async fn delete_all(&self, subject: &SubjectKey) -> Result<usize> {
    let table = Arc::clone(&self.table);
    let id_col = Arc::clone(&self.id_col);
    let subject_type = subject.subject_type.clone();
    let subject_id = encode_subject_id(subject.subject_id);

    let deleted = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          &format!(
            "DELETE FROM {table} WHERE subject_type = ?1 AND {id_col} = ?2"
          ),
          rusqlite::params![subject_type, subject_id],
        )?)
      })
      .await?;

    Ok(deleted)
  }

  async fn detach_author(&self, author: AuthorId) -> Result<usize> {
    let table = Arc::clone(&self.table);
    let now_str = encode_dt(Utc::now());

    let cleared = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          &format!(
            "UPDATE {table} SET author_id = NULL, updated_at = ?1
             WHERE author_id = ?2"
          ),
          rusqlite::params![now_str, author],
        )?)
      })
      .await?;

    Ok(cleared)
  }
}
