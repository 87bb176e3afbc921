mod connection;

pub use connection::ConnectionConfig;

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::driver::Driver;
use crate::error::{Result, StrataError};

/// Root configuration loaded from `strata.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StrataConfig {
    /// Database connection.
    pub database: DatabaseConfig,

    /// Migration file location.
    #[serde(default)]
    pub migrations: MigrationsConfig,
}

impl StrataConfig {
    /// Load configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| StrataError::Config(format!("Failed to read config file: {}", e)))?;

        Self::parse_toml(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn parse_toml(content: &str) -> Result<Self> {
        let content = substitute_env_vars(content);

        toml::from_str(&content)
            .map_err(|e| StrataError::Config(format!("Failed to parse config: {}", e)))
    }
}

/// Database section: a driver name plus the flat connection record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Driver name, matched case-insensitively.
    pub driver: String,

    #[serde(flatten)]
    pub connection: ConnectionConfig,
}

impl DatabaseConfig {
    /// Resolve the configured driver name.
    pub fn driver(&self) -> Result<Driver> {
        self.driver.parse()
    }
}

/// Where migrations are written and read.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MigrationsConfig {
    #[serde(default = "default_migrations_dir")]
    pub dir: PathBuf,
}

impl Default for MigrationsConfig {
    fn default() -> Self {
        Self {
            dir: default_migrations_dir(),
        }
    }
}

fn default_migrations_dir() -> PathBuf {
    PathBuf::from("migrations")
}

/// Substitute environment variables in the format ${VAR_NAME}.
fn substitute_env_vars(content: &str) -> String {
    let mut result = content.to_string();
    let re = match regex_lite::Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}") {
        Ok(re) => re,
        Err(_) => return result,
    };

    for cap in re.captures_iter(content) {
        let var_name = &cap[1];
        if let Ok(value) = std::env::var(var_name) {
            result = result.replace(&cap[0], &value);
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_minimal_config() {
        let toml = r#"
            [database]
            driver = "sqlite"
            database = "app.db"
        "#;

        let config = StrataConfig::parse_toml(toml).unwrap();
        assert_eq!(config.database.driver().unwrap(), Driver::Sqlite);
        assert_eq!(config.database.connection.database.as_deref(), Some("app.db"));
        assert_eq!(config.migrations.dir, PathBuf::from("migrations"));
    }

    #[test]
    fn test_parse_full_config() {
        let toml = r#"
            [database]
            driver = "PostgreSQL"
            user = "postgres"
            password = "secret"
            net = "tcp"
            address = "localhost"
            port = 5433
            database = "app"

            [migrations]
            dir = "db/migrations"
        "#;

        let config = StrataConfig::parse_toml(toml).unwrap();
        let conn = &config.database.connection;
        assert_eq!(config.database.driver().unwrap(), Driver::Postgres);
        assert_eq!(conn.user.as_deref(), Some("postgres"));
        assert_eq!(conn.port, Some(5433));
        assert_eq!(config.migrations.dir, PathBuf::from("db/migrations"));
    }

    #[test]
    fn test_unknown_driver_surfaces_on_resolve() {
        let toml = r#"
            [database]
            driver = "db2"
        "#;

        let config = StrataConfig::parse_toml(toml).unwrap();
        assert!(matches!(
            config.database.driver(),
            Err(StrataError::UnsupportedDriver(_))
        ));
    }

    #[test]
    fn test_missing_database_section() {
        let result = StrataConfig::parse_toml("[migrations]\ndir = \"m\"\n");
        assert!(matches!(result, Err(StrataError::Config(_))));
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("STRATA_TEST_DB_PASSWORD", "hunter2");

        let toml = r#"
            [database]
            driver = "mysql"
            password = "${STRATA_TEST_DB_PASSWORD}"
        "#;

        let config = StrataConfig::parse_toml(toml).unwrap();
        assert_eq!(config.database.connection.password.as_deref(), Some("hunter2"));

        std::env::remove_var("STRATA_TEST_DB_PASSWORD");
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("strata.toml");
        std::fs::write(&path, "[database]\ndriver = \"mongodb\"\naddress = \"localhost:27017\"\n")
            .unwrap();

        let config = StrataConfig::from_file(&path).unwrap();
        assert_eq!(config.database.driver().unwrap(), Driver::MongoDb);
    }
}
