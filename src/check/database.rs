use preflight_php::config::DatabaseSettings;
use sqlx::Connection;
use sqlx::Row;
use sqlx::mysql::MySqlConnectOptions;
use sqlx::mysql::MySqlConnection;
use sqlx::mysql::MySqlRow;
use sqlx::mysql::MySqlSslMode;
use tracing::debug;

use crate::error::CheckError;

pub(crate) const SCHEMA_QUERY: &str = "SELECT version, dbversion FROM settings";

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct SchemaVersion {
  version: String,
  dbversion: String,
}

impl SchemaVersion {
  pub(crate) fn version(&self) -> &str {
    &self.version
  }

  pub(crate) fn dbversion(&self) -> &str {
    &self.dbversion
  }
}

/// Connects with `settings`, reads the first row of the settings table and disconnects.
pub(crate) async fn schema_version(settings: &DatabaseSettings) -> Result<SchemaVersion, CheckError> {
  let mut connection =
    MySqlConnection::connect_with(&connect_options(settings)).await.map_err(CheckError::Connection)?;

  let row = sqlx::query(SCHEMA_QUERY).fetch_optional(&mut connection).await;
  if let Err(err) = connection.close().await {
    debug!("Failed to close database connection: {err}");
  }

  let row = row.map_err(CheckError::Query)?.ok_or(CheckError::EmptySettings)?;
  Ok(SchemaVersion { version: column_text(&row, "version")?, dbversion: column_text(&row, "dbversion")? })
}

pub(crate) fn connect_options(settings: &DatabaseSettings) -> MySqlConnectOptions {
  let mut options = MySqlConnectOptions::new()
    .host(settings.host())
    .port(settings.port())
    .username(settings.user())
    .password(settings.pass())
    .database(settings.name());

  if settings.ssl() {
    options = options.ssl_mode(match settings.ssl_verify() {
      true => MySqlSslMode::VerifyCa,
      false => MySqlSslMode::Required,
    });
    if let Some(ca) = settings.ssl_ca() {
      options = options.ssl_ca(ca);
    }
    if let Some(cert) = settings.ssl_cert() {
      options = options.ssl_client_cert(cert);
    }
    if let Some(key) = settings.ssl_key() {
      options = options.ssl_client_key(key);
    }
  }

  options
}

/// Reads `column` as text, rendering integer columns in decimal.
fn column_text(row: &MySqlRow, column: &str) -> Result<String, CheckError> {
  if let Ok(value) = row.try_get::<Option<String>, _>(column) {
    return Ok(value.unwrap_or_default());
  }
  if let Ok(value) = row.try_get::<Option<i64>, _>(column) {
    return Ok(value.map(|value| value.to_string()).unwrap_or_default());
  }
  row
    .try_get::<Option<u64>, _>(column)
    .map(|value| value.map(|value| value.to_string()).unwrap_or_default())
    .map_err(|source| CheckError::Decode { column: column.to_string(), source })
}
