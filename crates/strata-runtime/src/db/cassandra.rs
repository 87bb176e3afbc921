use scylla::{Session, SessionBuilder};
use tracing::debug;

use strata_core::config::ConnectionConfig;
use strata_core::driver::Driver;
use strata_core::error::{Result, StrataError};

use super::statements::split_statements;

/// Open a session against one known node, switching to the configured keyspace.
pub async fn connect(config: &ConnectionConfig) -> Result<Session> {
    let node = config.node_address(Driver::Cassandra);
    debug!("Connecting to Cassandra node {}", node);

    let mut builder = SessionBuilder::new().known_node(&node);
    if let Some(keyspace) = config.keyspace.as_deref().filter(|k| !k.is_empty()) {
        builder = builder.use_keyspace(keyspace, false);
    }
    if let Some(user) = config.user.as_deref() {
        builder = builder.user(user, config.password_or_default());
    }

    builder
        .build()
        .await
        .map_err(|e| StrataError::Connection(format!("Cassandra: {}", e)))
}

/// Execute a CQL script one statement at a time.
pub async fn execute(session: &Session, script: &str) -> Result<()> {
    for statement in split_statements(script) {
        session
            .query_unpaged(statement, ())
            .await
            .map_err(|e| StrataError::Database(e.to_string()))?;
    }
    Ok(())
}
