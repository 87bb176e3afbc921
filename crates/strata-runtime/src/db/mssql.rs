use tiberius::{AuthMethod, Client, Config};
use tokio::net::TcpStream;
use tokio_util::compat::{Compat, TokioAsyncWriteCompatExt};
use tracing::debug;

use strata_core::config::ConnectionConfig;
use strata_core::driver::Driver;
use strata_core::error::{Result, StrataError};

/// A SQL Server client over a tokio TCP stream.
pub type SqlServerClient = Client<Compat<TcpStream>>;

/// Connection string in `server=..;user id=..;password=..;port=..;database=..` form.
pub fn dsn(config: &ConnectionConfig) -> String {
    let (host, port) = config.host_port(Driver::SqlServer);
    format!(
        "server={};user id={};password={};port={};database={}",
        host,
        config.user_or_default(),
        config.password_or_default(),
        port.map(|p| p.to_string()).unwrap_or_default(),
        config.database_or_default()
    )
}

/// Build the client configuration matching [`dsn`].
pub fn client_config(config: &ConnectionConfig) -> Config {
    let (host, port) = config.host_port(Driver::SqlServer);

    let mut client_config = Config::new();
    client_config.host(host);
    if let Some(port) = port {
        client_config.port(port);
    }
    if let Some(database) = config.database.as_deref() {
        client_config.database(database);
    }
    client_config.authentication(AuthMethod::sql_server(
        config.user_or_default(),
        config.password_or_default(),
    ));
    client_config.trust_cert();

    client_config
}

/// Open a SQL Server connection and run a liveness query.
pub async fn connect(config: &ConnectionConfig) -> Result<SqlServerClient> {
    debug!("Connecting to SQL Server with {}", dsn(&config.redacted()));

    let client_config = client_config(config);
    let tcp = TcpStream::connect(client_config.get_addr())
        .await
        .map_err(|e| StrataError::Connection(format!("SQL Server: {}", e)))?;
    tcp.set_nodelay(true)?;

    let mut client = Client::connect(client_config, tcp.compat_write())
        .await
        .map_err(|e| StrataError::Connection(format!("SQL Server: {}", e)))?;

    execute(&mut client, "SELECT 1")
        .await
        .map_err(|e| StrataError::Connection(format!("SQL Server ping failed: {}", e)))?;

    Ok(client)
}

/// Run a script as a single batch and drain its results.
pub async fn execute(client: &mut SqlServerClient, sql: &str) -> Result<()> {
    client
        .simple_query(sql)
        .await
        .map_err(|e| StrataError::Database(e.to_string()))?
        .into_results()
        .await
        .map_err(|e| StrataError::Database(e.to_string()))?;
    Ok(())
}
