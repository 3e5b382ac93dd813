//! Extraction of variable assignments from a PHP configuration file.
//!
//! The file is never executed or fully parsed. Each line is scanned for statements shaped like
//! `$name = value;` or `$name['key'] = value;` and the raw values are collected into a
//! [`ConfigTable`].

pub mod database;

use std::collections::HashMap;
use std::fs::File;
use std::io::BufRead;
use std::io::BufReader;
use std::io::ErrorKind;
use std::path::Path;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use regex::RegexBuilder;
use tracing::debug;

use crate::error::ConfigError;

pub use database::DatabaseSettings;

static ASSIGNMENT: LazyLock<Regex> = LazyLock::new(|| {
  RegexBuilder::new(r#"\$(?P<name>\w+)(?:\['(?P<key>\w+)'\])?\s*=\s*"?'?(?P<value>[^"';]+)"?'?;"#)
    .case_insensitive(true)
    .build()
    .expect("assignment pattern must compile")
});

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConfigAssignment {
  /// `$name = value;`
  Scalar { name: String, value: String },
  /// `$name['key'] = value;`
  Indexed { name: String, key: String, value: String },
}

impl ConfigAssignment {
  /// Returns every assignment found on `line`, left to right.
  pub fn scan(line: &str) -> impl Iterator<Item = Self> + '_ {
    ASSIGNMENT.captures_iter(line).map(|captures| {
      let name = captures["name"].to_string();
      let value = captures["value"].to_string();
      match captures.name("key") {
        Some(key) => Self::Indexed { name, key: key.as_str().to_string(), value },
        None => Self::Scalar { name, value },
      }
    })
  }

  pub fn name(&self) -> &str {
    match self {
      Self::Scalar { name, .. } | Self::Indexed { name, .. } => name,
    }
  }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConfigValue {
  Scalar(String),
  Table(HashMap<String, String>),
}

/// Variables assigned in a PHP configuration file, keyed by variable name.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ConfigTable {
  entries: HashMap<String, ConfigValue>,
}

impl ConfigTable {
  /// Scans the file at `path`.
  ///
  /// # Errors
  /// - [`ConfigError::NotFound`] if the file does not exist or is not readable
  /// - [`ConfigError::Io`] if reading fails part way through
  pub fn parse(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|err| match err.kind() {
      ErrorKind::NotFound | ErrorKind::PermissionDenied => ConfigError::NotFound(path.to_path_buf()),
      _ => ConfigError::Io(err),
    })?;

    Self::from_reader(BufReader::new(file))
  }

  pub fn from_reader<R: BufRead>(reader: R) -> Result<Self, ConfigError> {
    let mut table = Self::default();
    for line in reader.lines() {
      for assignment in ConfigAssignment::scan(&line?) {
        debug!(?assignment);
        table.apply(assignment);
      }
    }

    Ok(table)
  }

  /// Records `assignment`, replacing whatever was stored at the same path.
  ///
  /// A name holds the shape of its most recent assignment: a scalar assignment drops an existing
  /// table, and an indexed assignment to a scalar starts a fresh table.
  pub fn apply(&mut self, assignment: ConfigAssignment) {
    match assignment {
      ConfigAssignment::Scalar { name, value } => {
        self.entries.insert(name, ConfigValue::Scalar(value));
      }
      ConfigAssignment::Indexed { name, key, value } => {
        let mut table = match self.entries.remove(&name) {
          Some(ConfigValue::Table(table)) => table,
          _ => HashMap::new(),
        };
        table.insert(key, value);
        self.entries.insert(name, ConfigValue::Table(table));
      }
    }
  }

  pub fn get(&self, name: &str) -> Option<&ConfigValue> {
    self.entries.get(name)
  }

  pub fn scalar(&self, name: &str) -> Option<&str> {
    match self.get(name)? {
      ConfigValue::Scalar(value) => Some(value),
      ConfigValue::Table(_) => None,
    }
  }

  pub fn table(&self, name: &str) -> Option<&HashMap<String, String>> {
    match self.get(name)? {
      ConfigValue::Table(table) => Some(table),
      ConfigValue::Scalar(_) => None,
    }
  }

  pub fn indexed(&self, name: &str, key: &str) -> Option<&str> {
    self.table(name)?.get(key).map(String::as_str)
  }

  pub fn len(&self) -> usize {
    self.entries.len()
  }

  pub fn is_empty(&self) -> bool {
    self.entries.is_empty()
  }
}

impl FromStr for ConfigTable {
  type Err = ConfigError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    Self::from_reader(s.as_bytes())
  }
}
