//! The `Notes` capability — the operation surface any subject gains.
//!
//! A [`Notes`] handle is built from a store reference and the subject's
//! association key. It holds no state of its own beyond an optional acting
//! author and an optional loaded snapshot; everything is expressed in terms
//! of [`NoteStore`] and the association key.
//!
//! ```ignore
//! let mut notes = order.notes(&store, &config);
//! notes.add_note("packed and shipped").await?;
//! let latest = notes.last_note(()).await?;
//! ```

use crate::{
  config::NotesConfig,
  note::{AuthorId, NewNote, Note, NoteId},
  store::NoteStore,
  subject::{Subject, SubjectKey},
  tag::TagFilter,
};

// ─── Notes handle ────────────────────────────────────────────────────────────

/// A queryable handle over one subject's notes, newest first.
pub struct Notes<'a, S: NoteStore> {
  store:  &'a S,
  key:    SubjectKey,
  author: Option<AuthorId>,
  loaded: Option<Vec<Note>>,
}

impl<'a, S: NoteStore> Notes<'a, S> {
  /// Scope a handle to `subject`, resolving its type name through the
  /// config's alias table.
  pub fn for_subject(
    store: &'a S,
    config: &NotesConfig,
    subject: &impl Subject,
  ) -> Self {
    Self::scoped(store, SubjectKey::for_subject(subject, &config.type_aliases))
  }

  /// Scope a handle to an explicit association key.
  pub fn scoped(store: &'a S, key: SubjectKey) -> Self {
    Self {
      store,
      key,
      author: None,
      loaded: None,
    }
  }

  pub fn key(&self) -> &SubjectKey { &self.key }

  /// Set the acting author, applied to subsequent writes that don't name
  /// one themselves. There is no implicit current-user lookup; attribution
  /// is always explicit.
  pub fn as_author(mut self, author: AuthorId) -> Self {
    self.author = Some(author);
    self
  }

  // ── Writes ────────────────────────────────────────────────────────────────

  /// Persist `input` for this subject. Fluent — returns the handle so calls
  /// can be chained.
  pub async fn add(&mut self, mut input: NewNote) -> Result<&mut Self, S::Error> {
    if input.author_id.is_none() {
      input.author_id = self.author;
    }
    self.store.create(&self.key, input).await?;
    // The snapshot no longer reflects the table; drop it rather than guess.
    self.loaded = None;
    Ok(self)
  }

  pub async fn add_note(
    &mut self,
    body: impl Into<String>,
  ) -> Result<&mut Self, S::Error> {
    self.add(NewNote::new(body)).await
  }

  pub async fn add_private_note(
    &mut self,
    body: impl Into<String>,
  ) -> Result<&mut Self, S::Error> {
    self.add(NewNote::new(body).private()).await
  }

  // ── Reads ─────────────────────────────────────────────────────────────────

  /// Fetch and retain this subject's notes; subsequent reads consult the
  /// snapshot instead of re-querying. Best-effort freshness only — writes
  /// from other handles appear on the next `load`. Both paths return
  /// identical results for identical underlying data.
  pub async fn load(&mut self) -> Result<&mut Self, S::Error> {
    let all = self.store.find(&self.key, &TagFilter::all()).await?;
    self.loaded = Some(all);
    Ok(self)
  }

  pub fn is_loaded(&self) -> bool { self.loaded.is_some() }

  /// All of this subject's notes, newest first, optionally restricted to a
  /// tag set.
  pub async fn all_notes(
    &self,
    tags: impl Into<TagFilter>,
  ) -> Result<Vec<Note>, S::Error> {
    let tags = tags.into();
    match &self.loaded {
      Some(notes) => Ok(
        notes
          .iter()
          .filter(|n| tags.matches(&n.tag))
          .cloned()
          .collect(),
      ),
      None => self.store.find(&self.key, &tags).await,
    }
  }

  /// The most recently created matching note, if any.
  pub async fn last_note(
    &self,
    tags: impl Into<TagFilter>,
  ) -> Result<Option<Note>, S::Error> {
    let tags = tags.into();
    match &self.loaded {
      Some(notes) => Ok(notes.iter().find(|n| tags.matches(&n.tag)).cloned()),
      None => self.store.find_latest(&self.key, &tags).await,
    }
  }

  /// Private notes only, newest first.
  pub async fn private_notes(
    &self,
    tags: impl Into<TagFilter>,
  ) -> Result<Vec<Note>, S::Error> {
    let tags = tags.into();
    match &self.loaded {
      Some(notes) => Ok(
        notes
          .iter()
          .filter(|n| n.is_private && tags.matches(&n.tag))
          .cloned()
          .collect(),
      ),
      None => self.store.find_private(&self.key, &tags).await,
    }
  }

  /// Body of the most recent note, if any.
  pub async fn note(&self) -> Result<Option<String>, S::Error> {
    Ok(self.last_note(()).await?.and_then(|n| n.body))
  }

  // ── Deletes ───────────────────────────────────────────────────────────────

  /// Delete specific notes by id, scoped to this subject. An empty list is
  /// a successful no-op.
  pub async fn delete_note(
    &mut self,
    ids: impl IntoIterator<Item = NoteId>,
  ) -> Result<&mut Self, S::Error> {
    let ids: Vec<NoteId> = ids.into_iter().collect();
    if !ids.is_empty() {
      self.store.delete_by_ids(&self.key, &ids).await?;
      self.loaded = None;
    }
    Ok(self)
  }

  /// Delete this subject's notes matching a tag set. An empty set is a
  /// successful no-op.
  pub async fn delete_note_by_tag(
    &mut self,
    tags: impl Into<TagFilter>,
  ) -> Result<&mut Self, S::Error> {
    let tags = tags.into();
    if !tags.is_empty() {
      self.store.delete_by_tags(&self.key, &tags).await?;
      self.loaded = None;
    }
    Ok(self)
  }

  /// Delete every note for this subject. Idempotent.
  pub async fn delete_all_notes(&mut self) -> Result<&mut Self, S::Error> {
    self.store.delete_all(&self.key).await?;
    self.loaded = None;
    Ok(self)
  }
}

// ─── HasNotes ────────────────────────────────────────────────────────────────

/// Attaches the note capability to any [`Subject`] by composition — no
/// inheritance, no state on the subject itself.
pub trait HasNotes: Subject {
  fn notes<'a, S: NoteStore>(
    &self,
    store: &'a S,
    config: &NotesConfig,
  ) -> Notes<'a, S>
  where
    Self: Sized,
  {
    Notes::for_subject(store, config, self)
  }
}

impl<T: Subject> HasNotes for T {}
