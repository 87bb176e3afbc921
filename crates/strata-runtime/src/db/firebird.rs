use rsfbclient::prelude::*;
use rsfbclient::FbError;
use tracing::debug;

use strata_core::config::ConnectionConfig;
use strata_core::driver::Driver;
use strata_core::error::{Result, StrataError};

use super::statements::split_statements;

const PING_SQL: &str = "SELECT 1 FROM RDB$DATABASE";

/// An open Firebird attachment.
///
/// Each call runs in its own implicit transaction that commits on success.
pub struct FirebirdConnection {
    run: Box<dyn FnMut(&str) -> std::result::Result<(), FbError>>,
}

impl FirebirdConnection {
    /// Execute a script one statement at a time.
    pub fn execute(&mut self, script: &str) -> Result<()> {
        for statement in split_statements(script) {
            (self.run)(&statement).map_err(|e| StrataError::Database(e.to_string()))?;
        }
        Ok(())
    }

    pub fn ping(&mut self) -> Result<()> {
        (self.run)(PING_SQL).map_err(|e| StrataError::Database(e.to_string()))
    }
}

/// DSN in `user:password@address/database` form, with the address as given.
pub fn dsn(config: &ConnectionConfig) -> String {
    let address = config
        .address
        .as_deref()
        .map(str::trim)
        .filter(|a| !a.is_empty())
        .unwrap_or("localhost");
    format!(
        "{}:{}@{}/{}",
        config.user_or_default(),
        config.password_or_default(),
        address,
        config.database_or_default()
    )
}

/// Attach to a Firebird database over the wire protocol and ping it.
pub async fn connect(config: &ConnectionConfig) -> Result<FirebirdConnection> {
    debug!("Connecting to Firebird at {}", dsn(&config.redacted()));

    let (host, port) = config.host_port(Driver::Firebird);
    let database = ConnectionConfig::require(&config.database, "database", Driver::Firebird)?;

    let mut conn = rsfbclient::builder_pure_rust()
        .host(host)
        .port(port.unwrap_or(3050))
        .db_name(database)
        .user(config.user_or_default())
        .pass(config.password_or_default())
        .connect()
        .map_err(|e| StrataError::Connection(format!("Firebird: {}", e)))?;

    let run = move |sql: &str| conn.execute(sql, ()).map(|_| ());
    let mut conn = FirebirdConnection { run: Box::new(run) };
    conn.ping()
        .map_err(|e| StrataError::Connection(format!("Firebird ping failed: {}", e)))?;

    Ok(conn)
}
