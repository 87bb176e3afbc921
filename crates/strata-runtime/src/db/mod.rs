//! Driver adapters and the connection handle they produce.

pub mod cassandra;
pub mod firebird;
pub mod mongo;
pub mod mssql;
pub mod mysql;
pub mod postgres;
pub mod sqlite;
mod statements;

pub use statements::split_statements;

use std::fmt;

use sqlx::{MySqlConnection, PgConnection, SqliteConnection};
use tracing::info;

use strata_core::config::ConnectionConfig;
use strata_core::driver::{Driver, MigrationKind};
use strata_core::error::{Result, StrataError};

use self::firebird::FirebirdConnection;
use self::mssql::SqlServerClient;

/// An open connection to one of the supported back ends.
pub enum Connection {
    MySql(MySqlConnection),
    Postgres(PgConnection),
    Sqlite(SqliteConnection),
    SqlServer(Box<SqlServerClient>),
    Firebird(FirebirdConnection),
    Cassandra(Box<scylla::Session>),
    MongoDb(::mongodb::Database),
}

impl Connection {
    /// Open a connection with the adapter for `driver`.
    pub async fn open(driver: Driver, config: &ConnectionConfig) -> Result<Self> {
        let conn = match driver {
            Driver::MySql => Connection::MySql(mysql::connect(config).await?),
            Driver::Postgres => Connection::Postgres(postgres::connect(config).await?),
            Driver::Sqlite => Connection::Sqlite(sqlite::connect(config).await?),
            Driver::SqlServer => Connection::SqlServer(Box::new(mssql::connect(config).await?)),
            Driver::Firebird => Connection::Firebird(firebird::connect(config).await?),
            Driver::Cassandra => Connection::Cassandra(Box::new(cassandra::connect(config).await?)),
            Driver::MongoDb => Connection::MongoDb(mongo::connect(config).await?),
        };

        info!("Connected to {}", driver);
        Ok(conn)
    }

    /// The back end behind this connection.
    pub fn driver(&self) -> Driver {
        match self {
            Connection::MySql(_) => Driver::MySql,
            Connection::Postgres(_) => Driver::Postgres,
            Connection::Sqlite(_) => Driver::Sqlite,
            Connection::SqlServer(_) => Driver::SqlServer,
            Connection::Firebird(_) => Driver::Firebird,
            Connection::Cassandra(_) => Driver::Cassandra,
            Connection::MongoDb(_) => Driver::MongoDb,
        }
    }

    /// Which migration files this connection runs.
    pub fn migration_kind(&self) -> MigrationKind {
        self.driver().migration_kind()
    }

    /// Execute the full contents of one migration file.
    pub async fn execute_script(&mut self, script: &str) -> Result<()> {
        match self {
            Connection::MySql(conn) => {
                sqlx::raw_sql(script).execute(conn).await?;
            }
            Connection::Postgres(conn) => {
                sqlx::raw_sql(script).execute(conn).await?;
            }
            Connection::Sqlite(conn) => {
                sqlx::raw_sql(script).execute(conn).await?;
            }
            Connection::SqlServer(client) => mssql::execute(client, script).await?,
            Connection::Firebird(conn) => conn.execute(script)?,
            Connection::Cassandra(session) => cassandra::execute(session, script).await?,
            Connection::MongoDb(database) => mongo::execute(database, script).await?,
        }
        Ok(())
    }

    /// Check that the connection is still alive.
    pub async fn ping(&mut self) -> Result<()> {
        use sqlx::Connection as _;

        match self {
            Connection::MySql(conn) => conn.ping().await?,
            Connection::Postgres(conn) => conn.ping().await?,
            Connection::Sqlite(conn) => conn.ping().await?,
            Connection::SqlServer(client) => mssql::execute(client, "SELECT 1").await?,
            Connection::Firebird(conn) => conn.ping()?,
            Connection::Cassandra(session) => {
                cassandra::execute(session, "SELECT release_version FROM system.local").await?
            }
            Connection::MongoDb(database) => {
                database
                    .run_command(::mongodb::bson::doc! { "ping": 1 })
                    .await
                    .map_err(|e| StrataError::Database(e.to_string()))?;
            }
        }
        Ok(())
    }

    /// Close the connection, flushing what the driver needs to.
    pub async fn close(self) -> Result<()> {
        use sqlx::Connection as _;

        match self {
            Connection::MySql(conn) => conn.close().await?,
            Connection::Postgres(conn) => conn.close().await?,
            Connection::Sqlite(conn) => conn.close().await?,
            Connection::SqlServer(client) => (*client)
                .close()
                .await
                .map_err(|e| StrataError::Database(e.to_string()))?,
            Connection::Firebird(_) | Connection::Cassandra(_) | Connection::MongoDb(_) => {}
        }
        Ok(())
    }
}

impl fmt::Debug for Connection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Connection").field(&self.driver()).finish()
    }
}

/// Resolve a driver name (case-insensitive) and open a connection with it.
pub async fn connect(driver_name: &str, config: &ConnectionConfig) -> Result<Connection> {
    let driver: Driver = driver_name.parse()?;
    Connection::open(driver, config).await
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sqlite_config(dir: &tempfile::TempDir) -> ConnectionConfig {
        ConnectionConfig::new().database(dir.path().join("test.db").to_string_lossy())
    }

    #[tokio::test]
    async fn test_connect_unsupported_driver() {
        let err = connect("oracle", &ConnectionConfig::new()).await.unwrap_err();
        assert!(matches!(err, StrataError::UnsupportedDriver(ref name) if name == "oracle"));
    }

    #[tokio::test]
    async fn test_connect_any_casing() {
        let dir = tempfile::TempDir::new().unwrap();
        for name in ["sqlite", "SQLite", "SQLITE"] {
            let conn = connect(name, &sqlite_config(&dir)).await.unwrap();
            assert_eq!(conn.driver(), Driver::Sqlite);
            conn.close().await.unwrap();
        }
    }

    #[tokio::test]
    async fn test_execute_and_ping() {
        let dir = tempfile::TempDir::new().unwrap();
        let mut conn = connect("sqlite", &sqlite_config(&dir)).await.unwrap();

        conn.execute_script("CREATE TABLE t (id INTEGER);\nINSERT INTO t (id) VALUES (1);")
            .await
            .unwrap();
        conn.ping().await.unwrap();
        assert_eq!(conn.migration_kind(), MigrationKind::Sql);
        conn.close().await.unwrap();
    }

    #[tokio::test]
    async fn test_execute_invalid_sql_fails() {
        let dir = tempfile::TempDir::new().unwrap();
        let mut conn = connect("sqlite", &sqlite_config(&dir)).await.unwrap();

        let result = conn.execute_script("CREATE TABLE (").await;
        assert!(matches!(result, Err(StrataError::Sql(_))));
    }
}
