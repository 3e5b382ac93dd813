use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CheckError {
  #[error("{} is not a git working copy: {source}", path.display())]
  NotRepository { path: PathBuf, source: git2::Error },
  #[error("Git error: {0}")]
  Git(#[from] git2::Error),
  #[error("Git module {name} is not installed: {source}")]
  Submodule { name: String, source: git2::Error },
  #[error("Failed to connect to database: {0}")]
  Connection(#[source] sqlx::Error),
  #[error("Failed to query settings: {0}")]
  Query(#[source] sqlx::Error),
  #[error("Settings table is empty")]
  EmptySettings,
  #[error("Failed to decode settings column {column}: {source}")]
  Decode { column: String, source: sqlx::Error },
}
