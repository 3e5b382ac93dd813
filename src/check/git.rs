use std::path::Path;

use git2::Repository;
use git2::StatusOptions;

use crate::error::CheckError;

const SHORT_SHA_LEN: usize = 9;

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct GitStatus {
  branch: Option<String>,
  sha: String,
  short_sha: String,
  dirty: bool,
}

impl GitStatus {
  /// `None` when HEAD is detached.
  pub(crate) fn branch(&self) -> Option<&str> {
    self.branch.as_deref()
  }

  pub(crate) fn sha(&self) -> &str {
    &self.sha
  }

  pub(crate) fn short_sha(&self) -> &str {
    &self.short_sha
  }

  pub(crate) fn is_dirty(&self) -> bool {
    self.dirty
  }
}

pub(crate) struct GitCheck {
  repository: Repository,
}

impl GitCheck {
  /// Opens the working copy rooted exactly at `path`. Parent directories are not searched.
  pub(crate) fn open(path: &Path) -> Result<Self, CheckError> {
    Repository::open(path)
      .map(|repository| Self { repository })
      .map_err(|source| CheckError::NotRepository { path: path.to_path_buf(), source })
  }

  pub(crate) fn status(&self) -> Result<GitStatus, CheckError> {
    let head = self.repository.head()?;
    let sha = head.peel_to_commit()?.id().to_string();
    let short_sha = sha.chars().take(SHORT_SHA_LEN).collect();
    let branch = match head.is_branch() {
      true => head.shorthand().map(str::to_string),
      false => None,
    };

    Ok(GitStatus { branch, sha, short_sha, dirty: self.is_dirty()? })
  }

  /// Staged, unstaged and untracked changes all count, including changes inside sub-modules.
  fn is_dirty(&self) -> Result<bool, CheckError> {
    let mut options = StatusOptions::new();
    options.include_untracked(true).include_ignored(false).exclude_submodules(false);
    let statuses = self.repository.statuses(Some(&mut options))?;

    Ok(statuses.iter().any(|entry| !entry.status().is_ignored()))
  }

  /// Names of the configured sub-modules, failing on the first one that isn't checked out.
  pub(crate) fn submodules(&self) -> Result<Vec<String>, CheckError> {
    self
      .repository
      .submodules()?
      .iter()
      .map(|submodule| {
        let name = submodule.name().unwrap_or_default().to_string();
        match submodule.open() {
          Ok(_) => Ok(name),
          Err(source) => Err(CheckError::Submodule { name, source }),
        }
      })
      .collect()
  }
}
