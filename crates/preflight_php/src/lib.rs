use std::path::PathBuf;

use crate::error::ProbeError;

pub mod config;
pub mod error;
pub mod version;

/// Finds the location of an executable `name`.
///
/// A path given in the `env_name` environment variable takes precedence over `PATH`.
pub fn find_executable(name: &str, env_name: &str) -> Result<PathBuf, ProbeError> {
  if let Some(path) = std::env::var_os(env_name).map(PathBuf::from) {
    if !path.try_exists()? {
      // An explicit path that can't be found is never replaced by a PATH lookup.
      return Err(ProbeError::NotFound {
        name: name.to_string(),
        reason: format!("{env_name} points to missing {}", path.display()),
      });
    }
    return Ok(path);
  }
  which::which(name).map_err(|err| ProbeError::NotFound {
    name: name.to_string(),
    reason: format!("{err}. Ensure `{name}` is in your PATH or the `{env_name}` environment variable is set"),
  })
}

#[cfg(test)]
mod tests {
  use crate::error::ProbeError;
  use crate::find_executable;

  #[test]
  fn test_find_executable_on_path() {
    let path = find_executable("sh", "PREFLIGHT_TEST_UNSET_SH").unwrap();
    assert!(path.ends_with("sh"));
  }

  #[test]
  fn test_find_executable_missing() {
    let err = find_executable("preflight-missing-binary", "PREFLIGHT_TEST_UNSET_MISSING").unwrap_err();
    assert!(matches!(err, ProbeError::NotFound { ref name, .. } if name == "preflight-missing-binary"));
  }

  #[test]
  fn test_find_executable_env_override() {
    let dir = tempfile::tempdir().unwrap();
    let binary = dir.path().join("php");
    std::fs::write(&binary, "").unwrap();

    unsafe { std::env::set_var("PREFLIGHT_TEST_PHP_OVERRIDE", &binary) };
    assert_eq!(find_executable("php", "PREFLIGHT_TEST_PHP_OVERRIDE").unwrap(), binary);

    unsafe { std::env::set_var("PREFLIGHT_TEST_PHP_MISSING", dir.path().join("nope")) };
    assert!(matches!(
      find_executable("sh", "PREFLIGHT_TEST_PHP_MISSING"),
      Err(ProbeError::NotFound { .. })
    ));
  }
}
