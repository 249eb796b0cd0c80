//! The `NoteStore` trait.
//!
//! Implemented by storage backends (e.g. `jot-store-sqlite`). The capability
//! layer ([`crate::notes`]) depends on this abstraction, not on any concrete
//! backend.

use std::future::Future;

use crate::{
  note::{AuthorId, NewNote, Note, NoteId},
  subject::SubjectKey,
  tag::TagFilter,
};

/// Abstraction over a note storage backend.
///
/// Notes are created and deleted, never edited in place. All reads return
/// newest-first order: descending id, since id assignment order is the
/// authoritative creation order.
///
/// All methods return `Send` futures so the trait can be used from
/// multi-threaded async runtimes. Single-row writes rely on the backing
/// engine's native atomicity; no transaction spans multiple calls.
pub trait NoteStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Persist a new note for `subject` with defaults applied (a blank or
  /// absent tag becomes the default tag). Fires the registered notification
  /// hook once on success. A failed create leaves no row and fires no hook.
  fn create<'a>(
    &'a self,
    subject: &'a SubjectKey,
    input: NewNote,
  ) -> impl Future<Output = Result<Note, Self::Error>> + Send + 'a;

  /// All notes for `subject` whose tag is in `tags` (every tag when the
  /// filter is empty), newest first.
  fn find<'a>(
    &'a self,
    subject: &'a SubjectKey,
    tags: &'a TagFilter,
  ) -> impl Future<Output = Result<Vec<Note>, Self::Error>> + Send + 'a;

  /// The most recently created matching note, if any.
  fn find_latest<'a>(
    &'a self,
    subject: &'a SubjectKey,
    tags: &'a TagFilter,
  ) -> impl Future<Output = Result<Option<Note>, Self::Error>> + Send + 'a;

  /// Like [`find`](Self::find), additionally restricted to private notes.
  fn find_private<'a>(
    &'a self,
    subject: &'a SubjectKey,
    tags: &'a TagFilter,
  ) -> impl Future<Output = Result<Vec<Note>, Self::Error>> + Send + 'a;

  /// Delete the given notes, scoped to `subject` — an id belonging to a
  /// different subject is left alone. An empty `ids` is a successful no-op.
  /// Returns the number of rows deleted.
  fn delete_by_ids<'a>(
    &'a self,
    subject: &'a SubjectKey,
    ids: &'a [NoteId],
  ) -> impl Future<Output = Result<usize, Self::Error>> + Send + 'a;

  /// Delete every note for `subject` whose tag is in `tags`. An empty
  /// filter is a successful no-op. Returns the number of rows deleted.
  fn delete_by_tags<'a>(
    &'a self,
    subject: &'a SubjectKey,
    tags: &'a TagFilter,
  ) -> impl Future<Output = Result<usize, Self::Error>> + Send + 'a;

  /// Delete every note for `subject`. Idempotent; returns the number of
  /// rows deleted.
  fn delete_all<'a>(
    &'a self,
    subject: &'a SubjectKey,
  ) -> impl Future<Output = Result<usize, Self::Error>> + Send + 'a;

  /// Clear attribution on every note by `author`. The notes themselves
  /// survive. The host application calls this when it deletes a user, so
  /// stored references never dangle.
  fn detach_author(
    &self,
    author: AuthorId,
  ) -> impl Future<Output = Result<usize, Self::Error>> + Send + '_;
}
