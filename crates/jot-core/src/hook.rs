//! Notification hook — the event sink invoked once per created note.

use crate::note::Note;

/// Boxed error returned by hook consumers.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Receives every successfully created note.
///
/// Delivery is fire-and-forget from the store's perspective: a consumer
/// error is logged and dropped, never retried, and never rolls back the
/// write that triggered it.
pub trait NoteHook: Send + Sync {
  fn note_added(&self, note: &Note) -> Result<(), BoxError>;
}

impl<F> NoteHook for F
where
  F: Fn(&Note) -> Result<(), BoxError> + Send + Sync,
{
  fn note_added(&self, note: &Note) -> Result<(), BoxError> { self(note) }
}
