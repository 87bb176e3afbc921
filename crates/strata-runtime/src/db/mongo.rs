use mongodb::bson::doc;
use mongodb::options::{ClientOptions, Credential};
use mongodb::{Client, Database};
use tracing::debug;

use strata_core::config::ConnectionConfig;
use strata_core::driver::Driver;
use strata_core::error::{Result, StrataError};

/// `mongodb://<host>:<port>` URI. Credentials are applied separately.
pub fn uri(config: &ConnectionConfig) -> String {
    format!("mongodb://{}", config.node_address(Driver::MongoDb))
}

/// Connect, ping and select the configured database.
pub async fn connect(config: &ConnectionConfig) -> Result<Database> {
    let uri = uri(config);
    debug!("Connecting to MongoDB at {}", uri);

    let mut options = ClientOptions::parse(uri.as_str())
        .await
        .map_err(|e| StrataError::Connection(format!("MongoDB: {}", e)))?;
    if let Some(user) = config.user.as_deref() {
        options.credential = Some(
            Credential::builder()
                .username(user.to_string())
                .password(config.password.clone())
                .build(),
        );
    }

    let client = Client::with_options(options)
        .map_err(|e| StrataError::Connection(format!("MongoDB: {}", e)))?;
    let database = client.database(ConnectionConfig::require(
        &config.database,
        "database",
        Driver::MongoDb,
    )?);

    database
        .run_command(doc! { "ping": 1 })
        .await
        .map_err(|e| StrataError::Connection(format!("MongoDB ping failed: {}", e)))?;

    Ok(database)
}

/// Evaluate a script server-side with the `eval` command.
pub async fn execute(database: &Database, script: &str) -> Result<()> {
    database
        .run_command(doc! { "eval": script })
        .await
        .map_err(|e| StrataError::Database(e.to_string()))?;
    Ok(())
}
