use std::path::PathBuf;
use std::process::ExitStatus;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
  #[error("No config file {}", .0.display())]
  NotFound(PathBuf),
  #[error("Failed to read config file: {0}")]
  Io(#[from] std::io::Error),
  #[error("Missing ${name}['{key}'] in config file")]
  MissingKey { name: String, key: String },
  #[error("Invalid value {value:?} for ${name}['{key}']")]
  InvalidValue { name: String, key: String, value: String },
}

#[derive(Debug, Error)]
pub enum ProbeError {
  #[error("{name} executable not found: {reason}")]
  NotFound { name: String, reason: String },
  #[error(transparent)]
  Io(#[from] std::io::Error),
  #[error("`{command}` exited with {status}")]
  Failed { command: String, status: ExitStatus },
  #[error("`{command}` produced no output")]
  Empty { command: String },
}
