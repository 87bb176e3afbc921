use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqliteConnection};
use sqlx::{ConnectOptions, Connection};
use tracing::debug;

use strata_core::config::ConnectionConfig;
use strata_core::error::{Result, StrataError};

const IN_MEMORY: &str = ":memory:";

/// Database file path: `database`, falling back to `address`.
pub fn database_path(config: &ConnectionConfig) -> Result<&str> {
    config
        .database
        .as_deref()
        .or(config.address.as_deref())
        .filter(|p| !p.is_empty())
        .ok_or_else(|| StrataError::Config("sqlite requires a database file path".into()))
}

/// Build connection options; missing database files are created.
pub fn connect_options(config: &ConnectionConfig) -> Result<SqliteConnectOptions> {
    let path = database_path(config)?;

    if path == IN_MEMORY {
        return Ok(SqliteConnectOptions::from_str("sqlite::memory:")?);
    }

    Ok(SqliteConnectOptions::new()
        .filename(path)
        .create_if_missing(true))
}

/// Open and ping a SQLite connection.
pub async fn connect(config: &ConnectionConfig) -> Result<SqliteConnection> {
    let options = connect_options(config)?;
    debug!("Opening SQLite database {}", database_path(config)?);

    let mut conn = options
        .connect()
        .await
        .map_err(|e| StrataError::Connection(format!("SQLite: {}", e)))?;

    conn.ping()
        .await
        .map_err(|e| StrataError::Connection(format!("SQLite ping failed: {}", e)))?;

    Ok(conn)
}
