use sqlx::postgres::{PgConnectOptions, PgConnection, PgSslMode};
use sqlx::{ConnectOptions, Connection};
use tracing::debug;

use strata_core::config::ConnectionConfig;
use strata_core::driver::Driver;
use strata_core::error::{Result, StrataError};

/// Key=value DSN with TLS disabled.
pub fn dsn(config: &ConnectionConfig) -> String {
    let (host, port) = config.host_port(Driver::Postgres);
    format!(
        "user={} password={} host={} port={} dbname={} sslmode=disable",
        config.user_or_default(),
        config.password_or_default(),
        host,
        port.map(|p| p.to_string()).unwrap_or_default(),
        config.database_or_default()
    )
}

/// Build connection options matching [`dsn`].
pub fn connect_options(config: &ConnectionConfig) -> PgConnectOptions {
    let mut options = PgConnectOptions::new()
        .username(config.user_or_default())
        .ssl_mode(PgSslMode::Disable);

    if config.is_unix_socket() {
        if let Some(socket) = config.address.as_deref() {
            options = options.socket(socket);
        }
    } else {
        let (host, port) = config.host_port(Driver::Postgres);
        options = options.host(&host);
        if let Some(port) = port {
            options = options.port(port);
        }
    }

    if let Some(password) = config.password.as_deref() {
        options = options.password(password);
    }
    if let Some(database) = config.database.as_deref() {
        options = options.database(database);
    }

    options
}

/// Open and ping a PostgreSQL connection.
pub async fn connect(config: &ConnectionConfig) -> Result<PgConnection> {
    debug!("Connecting to PostgreSQL with {}", dsn(&config.redacted()));

    let mut conn = connect_options(config)
        .connect()
        .await
        .map_err(|e| StrataError::Connection(format!("PostgreSQL: {}", e)))?;

    conn.ping()
        .await
        .map_err(|e| StrataError::Connection(format!("PostgreSQL ping failed: {}", e)))?;

    Ok(conn)
}
