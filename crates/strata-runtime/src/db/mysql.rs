use sqlx::mysql::{MySqlConnectOptions, MySqlConnection};
use sqlx::{ConnectOptions, Connection};
use tracing::debug;

use strata_core::config::ConnectionConfig;
use strata_core::driver::Driver;
use strata_core::error::{Result, StrataError};

/// DSN in `user:password@net(address)/database` form, used for logging.
pub fn dsn(config: &ConnectionConfig) -> String {
    let net = config.net.as_deref().unwrap_or("tcp");
    let address = if config.is_unix_socket() {
        config.address.clone().unwrap_or_default()
    } else {
        config.node_address(Driver::MySql)
    };
    format!(
        "{}:{}@{}({})/{}",
        config.user_or_default(),
        config.password_or_default(),
        net,
        address,
        config.database_or_default()
    )
}

/// Build connection options from the flat config.
pub fn connect_options(config: &ConnectionConfig) -> MySqlConnectOptions {
    let mut options = MySqlConnectOptions::new().username(config.user_or_default());

    if config.is_unix_socket() {
        if let Some(socket) = config.address.as_deref() {
            options = options.socket(socket);
        }
    } else {
        let (host, port) = config.host_port(Driver::MySql);
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

/// Open and ping a MySQL connection.
pub async fn connect(config: &ConnectionConfig) -> Result<MySqlConnection> {
    debug!("Connecting to MySQL at {}", dsn(&config.redacted()));

    let mut conn = connect_options(config)
        .connect()
        .await
        .map_err(|e| StrataError::Connection(format!("MySQL: {}", e)))?;

    conn.ping()
        .await
        .map_err(|e| StrataError::Connection(format!("MySQL ping failed: {}", e)))?;

    Ok(conn)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dsn_tcp() {
        let config = ConnectionConfig::new()
            .user("root")
            .password("pw")
            .net("tcp")
            .address("localhost:3306")
            .database("app");
        assert_eq!(dsn(&config), "root:pw@tcp(localhost:3306)/app");
    }

    #[test]
    fn test_dsn_default_port() {
        let config = ConnectionConfig::new().user("root").address("db").database("app");
        assert_eq!(dsn(&config), "root:@tcp(db:3306)/app");
    }

    #[test]
    fn test_dsn_unix_socket() {
        let config = ConnectionConfig::new()
            .user("root")
            .net("unix")
            .address("/var/run/mysqld/mysqld.sock");
        assert_eq!(dsn(&config), "root:@unix(/var/run/mysqld/mysqld.sock)/");
    }
}
