use std::ffi::OsStr;
use std::io::ErrorKind;
use std::path::Path;
use std::path::PathBuf;
use std::process::Command;

use tracing::debug;

use crate::error::ProbeError;
use crate::find_executable;

/// Output of `<binary> --version`, reduced to its first line.
#[derive(Clone, Debug)]
pub struct VersionProbe {
  binary: PathBuf,
}

impl VersionProbe {
  pub fn new(binary: impl Into<PathBuf>) -> Self {
    Self { binary: binary.into() }
  }

  /// Locates `name` on `PATH`, or at the path stored in `env_name`.
  ///
  /// # Errors
  /// - the executable can't be found
  pub fn locate(name: &str, env_name: &str) -> Result<Self, ProbeError> {
    find_executable(name, env_name).map(Self::new)
  }

  pub fn binary(&self) -> &Path {
    &self.binary
  }

  /// Runs `<binary> --version`.
  ///
  /// # Errors
  /// See [`VersionProbe::first_line`].
  pub fn run(&self) -> Result<String, ProbeError> {
    self.first_line(["--version"])
  }

  /// Runs the binary with `args` and returns the first line of standard output, with trailing
  /// whitespace removed.
  ///
  /// # Errors
  /// - the binary does not exist
  /// - the process could not be spawned
  /// - the process exited with a non-zero status
  /// - standard output was empty
  pub fn first_line<I, S>(&self, args: I) -> Result<String, ProbeError>
  where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
  {
    let mut cmd = Command::new(&self.binary);
    cmd.args(args);
    let command = format!("{cmd:?}");

    let output = cmd.output().map_err(|err| match err.kind() {
      ErrorKind::NotFound => ProbeError::NotFound {
        name: self.binary.display().to_string(),
        reason: err.to_string(),
      },
      _ => ProbeError::Io(err),
    })?;
    if !output.status.success() {
      return Err(ProbeError::Failed { command, status: output.status });
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    debug!("{command}: {stdout}");
    match stdout.lines().next().map(str::trim_end) {
      Some(line) if !line.is_empty() => Ok(line.to_string()),
      _ => Err(ProbeError::Empty { command }),
    }
  }
}
