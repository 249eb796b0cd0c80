//! Core types and trait definitions for the jot note store.
//!
//! This crate is deliberately free of database dependencies. Backends
//! (e.g. `jot-store-sqlite`) implement [`store::NoteStore`]; applications
//! attach the note capability to their own types via [`notes::HasNotes`].

// We intentionally use native `async fn` in traits (stabilised in Rust 1.75).
// Suppress the advisory lint about `Send` bounds on the returned futures.
#![allow(async_fn_in_trait)]

pub mod config;
pub mod error;
pub mod hook;
pub mod note;
pub mod notes;
pub mod store;
pub mod subject;
pub mod tag;

pub use error::{Error, Result};
