//! Configuration for the note store.
//!
//! An explicit struct passed at construction — no global lookups anywhere.
//! Loadable from a TOML file layered under `JOT_`-prefixed environment
//! variables.

use std::{
  collections::HashMap,
  path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};

use crate::{Error, Result, subject::TypeAliases};

/// Name of the connection used when none is selected.
pub const DEFAULT_CONNECTION: &str = "default";

/// Everything a deployment can vary without code changes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NotesConfig {
  /// Named connection to use; `None` selects [`DEFAULT_CONNECTION`].
  pub connection: Option<String>,

  /// Known connections, name → database path.
  pub connections: HashMap<String, PathBuf>,

  /// Table holding the notes.
  pub table: String,

  /// Column holding the subject's identifier, renameable so deployments
  /// that chose a different foreign-key column keep working.
  pub subject_id_column: String,

  /// Stable aliases for subject type names.
  pub type_aliases: TypeAliases,
}

impl Default for NotesConfig {
  fn default() -> Self {
    Self {
      connection:        None,
      connections:       HashMap::new(),
      table:             "model_notes".to_owned(),
      subject_id_column: "model_id".to_owned(),
      type_aliases:      TypeAliases::default(),
    }
  }
}

impl NotesConfig {
  /// Load from `path` (optional TOML file) with `JOT_*` environment
  /// overrides.
  pub fn load(path: impl AsRef<Path>) -> Result<Self> {
    let settings = config::Config::builder()
      .add_source(config::File::from(path.as_ref()).required(false))
      .add_source(config::Environment::with_prefix("JOT"))
      .build()?;
    Ok(settings.try_deserialize()?)
  }

  /// Resolve the selected connection to its database path. An unset
  /// selection falls back to the `"default"` entry. Failures here are
  /// configuration errors; raise them at startup, not at first use.
  pub fn connection_path(&self) -> Result<&Path> {
    match &self.connection {
      Some(name) => self
        .connections
        .get(name)
        .map(PathBuf::as_path)
        .ok_or_else(|| Error::UnknownConnection(name.clone())),
      None => self
        .connections
        .get(DEFAULT_CONNECTION)
        .map(PathBuf::as_path)
        .ok_or(Error::NoDefaultConnection),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn unset_connection_falls_back_to_default_entry() {
    let mut config = NotesConfig::default();
    config
      .connections
      .insert(DEFAULT_CONNECTION.to_owned(), PathBuf::from("/tmp/notes.db"));

    assert_eq!(
      config.connection_path().unwrap(),
      Path::new("/tmp/notes.db")
    );
  }

  #[test]
  fn missing_default_connection_is_an_error() {
    let config = NotesConfig::default();
    assert!(matches!(
      config.connection_path(),
      Err(Error::NoDefaultConnection)
    ));
  }

  #[test]
  fn unknown_connection_name_is_an_error() {
    let config = NotesConfig {
      connection: Some("analytics".to_owned()),
      ..NotesConfig::default()
    };
    assert!(matches!(
      config.connection_path(),
      Err(Error::UnknownConnection(name)) if name == "analytics"
    ));
  }

  #[test]
  fn named_connection_resolves() {
    let mut config = NotesConfig {
      connection: Some("audit".to_owned()),
      ..NotesConfig::default()
    };
    config
      .connections
      .insert("audit".to_owned(), PathBuf::from("/tmp/audit.db"));

    assert_eq!(
      config.connection_path().unwrap(),
      Path::new("/tmp/audit.db")
    );
  }
}
