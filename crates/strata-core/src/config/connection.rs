use serde::{Deserialize, Serialize};

use crate::driver::Driver;
use crate::error::{Result, StrataError};

/// Flat connection record shared by every driver adapter.
///
/// Nothing here is validated up front; each driver reports what it is
/// missing when it connects.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionConfig {
    /// User name.
    #[serde(default)]
    pub user: Option<String>,

    /// Password.
    #[serde(default)]
    pub password: Option<String>,

    /// Network transport, e.g. `tcp` or `unix`.
    #[serde(default)]
    pub net: Option<String>,

    /// Host, `host:port`, socket path, or file path depending on the driver.
    #[serde(default)]
    pub address: Option<String>,

    /// Port; overrides one embedded in `address`.
    #[serde(default)]
    pub port: Option<u16>,

    /// Database name (or file path for SQLite).
    #[serde(default)]
    pub database: Option<String>,

    /// Cassandra keyspace.
    #[serde(default)]
    pub keyspace: Option<String>,

    /// Service name for drivers that address a service instead of a database.
    #[serde(default)]
    pub service: Option<String>,
}

impl ConnectionConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn user(mut self, user: impl Into<String>) -> Self {
        self.user = Some(user.into());
        self
    }

    pub fn password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }

    pub fn net(mut self, net: impl Into<String>) -> Self {
        self.net = Some(net.into());
        self
    }

    pub fn address(mut self, address: impl Into<String>) -> Self {
        self.address = Some(address.into());
        self
    }

    pub fn port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    pub fn database(mut self, database: impl Into<String>) -> Self {
        self.database = Some(database.into());
        self
    }

    pub fn keyspace(mut self, keyspace: impl Into<String>) -> Self {
        self.keyspace = Some(keyspace.into());
        self
    }

    pub fn service(mut self, service: impl Into<String>) -> Self {
        self.service = Some(service.into());
        self
    }

    pub fn user_or_default(&self) -> &str {
        self.user.as_deref().unwrap_or_default()
    }

    pub fn password_or_default(&self) -> &str {
        self.password.as_deref().unwrap_or_default()
    }

    pub fn database_or_default(&self) -> &str {
        self.database.as_deref().unwrap_or_default()
    }

    /// Copy with the password masked, for logging.
    pub fn redacted(&self) -> Self {
        let mut config = self.clone();
        if config.password.is_some() {
            config.password = Some("****".to_string());
        }
        config
    }

    /// Whether the transport is a unix domain socket.
    pub fn is_unix_socket(&self) -> bool {
        self.net
            .as_deref()
            .is_some_and(|net| net.eq_ignore_ascii_case("unix"))
    }

    /// Resolve host and port for a driver.
    ///
    /// A `host:port` address supplies the port unless `port` is set; when
    /// neither names one, the driver's default port is used.
    pub fn host_port(&self, driver: Driver) -> (String, Option<u16>) {
        let address = self
            .address
            .as_deref()
            .map(str::trim)
            .filter(|a| !a.is_empty())
            .unwrap_or("localhost");

        let (host, embedded_port) = split_host_port(address);
        let port = self.port.or(embedded_port).or(driver.default_port());

        (host.to_string(), port)
    }

    /// `host:port` as a single string, for drivers that take a node address.
    pub fn node_address(&self, driver: Driver) -> String {
        match self.host_port(driver) {
            (host, Some(port)) => format!("{}:{}", host, port),
            (host, None) => host,
        }
    }

    /// Require a value, naming the field in the error.
    pub fn require<'a>(value: &'a Option<String>, field: &str, driver: Driver) -> Result<&'a str> {
        value
            .as_deref()
            .filter(|v| !v.is_empty())
            .ok_or_else(|| StrataError::Config(format!("{} requires `{}`", driver, field)))
    }
}

fn split_host_port(address: &str) -> (&str, Option<u16>) {
    if let Some((host, port)) = address.rsplit_once(':') {
        if !host.contains(':') {
            if let Ok(port) = port.parse::<u16>() {
                return (host, Some(port));
            }
        }
    }
    (address, None)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_host_port_defaults() {
        let config = ConnectionConfig::new();
        assert_eq!(
            config.host_port(Driver::Postgres),
            ("localhost".to_string(), Some(5432))
        );
        assert_eq!(config.host_port(Driver::Sqlite), ("localhost".to_string(), None));
    }

    #[test]
    fn test_host_port_from_address() {
        let config = ConnectionConfig::new().address("db.internal:3307");
        assert_eq!(
            config.host_port(Driver::MySql),
            ("db.internal".to_string(), Some(3307))
        );
    }

    #[test]
    fn test_explicit_port_wins() {
        let config = ConnectionConfig::new().address("db.internal:3307").port(3310);
        assert_eq!(
            config.host_port(Driver::MySql),
            ("db.internal".to_string(), Some(3310))
        );
    }

    #[test]
    fn test_node_address() {
        let config = ConnectionConfig::new().address("cassandra-1");
        assert_eq!(config.node_address(Driver::Cassandra), "cassandra-1:9042");
    }

    #[test]
    fn test_ipv6_address_not_split() {
        let config = ConnectionConfig::new().address("::1");
        assert_eq!(config.host_port(Driver::Postgres), ("::1".to_string(), Some(5432)));
    }

    #[test]
    fn test_unix_socket_detection() {
        assert!(ConnectionConfig::new().net("UNIX").is_unix_socket());
        assert!(!ConnectionConfig::new().net("tcp").is_unix_socket());
        assert!(!ConnectionConfig::new().is_unix_socket());
    }

    #[test]
    fn test_redacted_masks_password() {
        let config = ConnectionConfig::new().user("app").password("secret");
        let redacted = config.redacted();
        assert_eq!(redacted.password.as_deref(), Some("****"));
        assert_eq!(redacted.user.as_deref(), Some("app"));
        assert!(ConnectionConfig::new().redacted().password.is_none());
    }

    #[test]
    fn test_require_reports_field() {
        let config = ConnectionConfig::new();
        let err = ConnectionConfig::require(&config.keyspace, "keyspace", Driver::Cassandra)
            .unwrap_err();
        assert!(err.to_string().contains("keyspace"));
    }
}
