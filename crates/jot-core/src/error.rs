//! Error types for `jot-core`.
//!
//! Everything here is a configuration or input error surfaced at the API
//! boundary. "No matching note" is never an error — reads return an empty
//! `Vec` or `None`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("unknown connection name: {0:?}")]
  UnknownConnection(String),

  #[error("no connection selected and no \"default\" connection configured")]
  NoDefaultConnection,

  #[error("tag {tag:?} exceeds the maximum length of {max} characters")]
  TagTooLong { tag: String, max: usize },

  #[error("configuration error: {0}")]
  Config(#[from] config::ConfigError),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
