use std::fmt::Debug;
use std::fmt::Formatter;

use crate::config::ConfigTable;
use crate::error::ConfigError;

const DB: &str = "db";
pub const DEFAULT_PORT: u16 = 3306;

/// Connection details stored in the `$db` array of the application config.
#[derive(Clone, PartialEq, Eq)]
pub struct DatabaseSettings {
  host: String,
  user: String,
  pass: String,
  name: String,
  port: u16,
  ssl: bool,
  ssl_verify: bool,
  ssl_key: Option<String>,
  ssl_cert: Option<String>,
  ssl_ca: Option<String>,
}

impl DatabaseSettings {
  /// Reads `$db['host']`, `$db['user']`, `$db['name']` and the optional `pass`, `port` and
  /// `ssl*` keys.
  ///
  /// # Errors
  /// - [`ConfigError::MissingKey`] if a required key is absent
  /// - [`ConfigError::InvalidValue`] if the port is not a number
  pub fn from_table(table: &ConfigTable) -> Result<Self, ConfigError> {
    let optional = |key: &str| table.indexed(DB, key).map(str::to_string);
    let required = |key: &str| {
      optional(key).ok_or_else(|| ConfigError::MissingKey { name: DB.to_string(), key: key.to_string() })
    };

    let port = match table.indexed(DB, "port") {
      None => DEFAULT_PORT,
      Some(raw) => raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
        name: DB.to_string(),
        key: "port".to_string(),
        value: raw.to_string(),
      })?,
    };

    Ok(Self {
      host: required("host")?,
      user: required("user")?,
      // An empty password can't be written in a form the scanner recognizes.
      pass: optional("pass").unwrap_or_default(),
      name: required("name")?,
      port,
      ssl: flag(table.indexed(DB, "ssl")),
      ssl_verify: flag(table.indexed(DB, "ssl_verify")),
      ssl_key: optional("ssl_key"),
      ssl_cert: optional("ssl_cert"),
      ssl_ca: optional("ssl_ca"),
    })
  }

  pub fn host(&self) -> &str {
    &self.host
  }

  pub fn user(&self) -> &str {
    &self.user
  }

  pub fn pass(&self) -> &str {
    &self.pass
  }

  pub fn name(&self) -> &str {
    &self.name
  }

  pub fn port(&self) -> u16 {
    self.port
  }

  pub fn ssl(&self) -> bool {
    self.ssl
  }

  pub fn ssl_verify(&self) -> bool {
    self.ssl_verify
  }

  pub fn ssl_key(&self) -> Option<&str> {
    self.ssl_key.as_deref()
  }

  pub fn ssl_cert(&self) -> Option<&str> {
    self.ssl_cert.as_deref()
  }

  pub fn ssl_ca(&self) -> Option<&str> {
    self.ssl_ca.as_deref()
  }
}

impl Debug for DatabaseSettings {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("DatabaseSettings")
      .field("host", &self.host)
      .field("user", &self.user)
      .field("pass", &"***")
      .field("name", &self.name)
      .field("port", &self.port)
      .field("ssl", &self.ssl)
      .field("ssl_verify", &self.ssl_verify)
      .finish_non_exhaustive()
  }
}

fn flag(raw: Option<&str>) -> bool {
  raw.is_some_and(|value| {
    let value = value.trim();
    value == "1" || value.eq_ignore_ascii_case("true")
  })
}

#[cfg(test)]
mod tests {
  use rstest::rstest;

  use crate::config::ConfigTable;
  use crate::config::database::DEFAULT_PORT;
  use crate::config::database::DatabaseSettings;
  use crate::config::database::flag;
  use crate::error::ConfigError;

  const COMPLETE: &str = "$db['host'] = 'localhost';
$db['user'] = 'root';
$db['pass'] = 'secret';
$db['name'] = 'phpipam';
$db['port'] = '3306';";

  #[test]
  fn test_from_table() {
    let settings = DatabaseSettings::from_table(&COMPLETE.parse().unwrap()).unwrap();
    assert_eq!(settings.host(), "localhost");
    assert_eq!(settings.user(), "root");
    assert_eq!(settings.pass(), "secret");
    assert_eq!(settings.name(), "phpipam");
    assert_eq!(settings.port(), 3306);
    assert!(!settings.ssl());
    assert_eq!(settings.ssl_ca(), None);
  }

  #[test]
  fn test_from_fixture() {
    let table = ConfigTable::parse("tests/fixtures/config.php").unwrap();
    let settings = DatabaseSettings::from_table(&table).unwrap();
    assert_eq!(settings.host(), "127.0.0.1");
    assert_eq!(settings.port(), 3306);
    assert!(!settings.ssl());
    assert!(settings.ssl_verify());
    assert_eq!(settings.ssl_key(), Some("/path/to/cert.key"));
    assert_eq!(settings.ssl_cert(), Some("/path/to/cert.crt"));
  }

  #[rstest]
  #[case("host")]
  #[case("user")]
  #[case("name")]
  fn test_missing_key(#[case] missing: &str) {
    let input = COMPLETE
      .lines()
      .filter(|line| !line.contains(&format!("['{missing}']")))
      .collect::<Vec<_>>()
      .join("\n");
    let err = DatabaseSettings::from_table(&input.parse().unwrap()).unwrap_err();
    assert!(matches!(err, ConfigError::MissingKey { ref name, ref key } if name == "db" && key == missing));
  }

  #[test]
  fn test_defaults() {
    let table: ConfigTable = "$db['host'] = 'db';\n$db['user'] = 'ipam';\n$db['name'] = 'ipam';".parse().unwrap();
    let settings = DatabaseSettings::from_table(&table).unwrap();
    assert_eq!(settings.port(), DEFAULT_PORT);
    assert_eq!(settings.pass(), "");
  }

  #[test]
  fn test_invalid_port() {
    let table: ConfigTable = format!("{COMPLETE}\n$db['port'] = 'mysql';").parse().unwrap();
    let err = DatabaseSettings::from_table(&table).unwrap_err();
    assert!(matches!(err, ConfigError::InvalidValue { ref value, .. } if value == "mysql"));
  }

  #[test]
  fn test_debug_hides_password() {
    let settings = DatabaseSettings::from_table(&COMPLETE.parse().unwrap()).unwrap();
    assert!(!format!("{settings:?}").contains("secret"));
  }

  #[rstest]
  #[case(Some("true"), true)]
  #[case(Some("TRUE"), true)]
  #[case(Some("1"), true)]
  #[case(Some("false"), false)]
  #[case(Some("0"), false)]
  #[case(None, false)]
  fn test_flag(#[case] raw: Option<&str>, #[case] expected: bool) {
    assert_eq!(flag(raw), expected);
  }
}
