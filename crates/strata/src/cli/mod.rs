mod check;
mod generate;
mod list;
mod migrate;

pub use check::CheckCommand;
pub use generate::GenerateCommand;
pub use list::ListCommand;
pub use migrate::MigrateCommand;

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::{debug, warn};

use strata_core::config::{ConnectionConfig, DatabaseConfig, MigrationsConfig, StrataConfig};
use strata_core::driver::Driver;
use strata_core::error::StrataError;

/// strata - timestamped schema migrations
#[derive(Parser)]
#[command(name = "strata")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file path.
    #[arg(short, long, default_value = "strata.toml", global = true)]
    pub config: String,

    /// Migrations directory (overrides the config file).
    #[arg(short, long, global = true)]
    pub migrations_dir: Option<String>,

    /// Database driver (overrides the config file).
    #[arg(short, long, global = true)]
    pub driver: Option<String>,

    /// Enable debug logging.
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// CLI commands.
#[derive(Subcommand)]
pub enum Commands {
    /// Write a new migration from a schema description.
    Generate(GenerateCommand),

    /// Run every migration in the migrations directory.
    Migrate(MigrateCommand),

    /// List the migrations `migrate` would run, in order.
    List(ListCommand),

    /// Open a connection and check that it is alive.
    Check(CheckCommand),
}

/// Resolved settings shared by every command.
pub struct Settings {
    pub driver: Driver,
    pub connection: ConnectionConfig,
    pub migrations_dir: PathBuf,
}

impl Cli {
    /// Execute the CLI command.
    pub async fn execute(self) -> Result<()> {
        let log_level = if self.verbose { "debug" } else { "info" };
        tracing_subscriber::fmt()
            .with_env_filter(std::env::var("RUST_LOG").unwrap_or_else(|_| log_level.to_string()))
            .init();

        dotenvy::dotenv().ok();

        let settings = self.settings()?;
        match self.command {
            Commands::Generate(cmd) => cmd.execute(&settings).await,
            Commands::Migrate(cmd) => cmd.execute(&settings).await,
            Commands::List(cmd) => cmd.execute(&settings).await,
            Commands::Check(cmd) => cmd.execute(&settings).await,
        }
    }

    /// Load the config file and apply command-line overrides.
    ///
    /// The file may be absent when `--driver` is given; the connection is
    /// then empty, which is enough for `generate` and `list`.
    pub fn settings(&self) -> Result<Settings> {
        let config_path = Path::new(&self.config);
        let config = if config_path.exists() {
            debug!("Loading configuration from {}", self.config);
            StrataConfig::from_file(config_path)?
        } else if let Some(driver) = &self.driver {
            StrataConfig {
                database: DatabaseConfig {
                    driver: driver.clone(),
                    connection: ConnectionConfig::default(),
                },
                migrations: MigrationsConfig::default(),
            }
        } else {
            anyhow::bail!(
                "Configuration file not found: {}\nCreate one or pass --driver.",
                self.config
            );
        };

        let driver_name = self.driver.as_deref().unwrap_or(&config.database.driver);
        let driver: Driver = driver_name.parse()?;

        let migrations_dir = self
            .migrations_dir
            .as_ref()
            .map(PathBuf::from)
            .unwrap_or(config.migrations.dir);

        Ok(Settings {
            driver,
            connection: config.database.connection,
            migrations_dir,
        })
    }
}

/// Combine a command's outcome with the outcome of closing its connection.
///
/// The command's own error wins; a close failure after it is only logged.
pub(crate) fn after_close<T>(
    result: std::result::Result<T, StrataError>,
    closed: std::result::Result<(), StrataError>,
) -> Result<T> {
    match (result, closed) {
        (Ok(value), Ok(())) => Ok(value),
        (Ok(_), Err(close_err)) => Err(close_err.into()),
        (Err(err), Ok(())) => Err(err.into()),
        (Err(err), Err(close_err)) => {
            warn!("Failed to close connection: {}", close_err);
            Err(err.into())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_migrate() {
        let cli = Cli::try_parse_from(["strata", "migrate"]);
        assert!(cli.is_ok());
    }

    #[test]
    fn test_cli_parse_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "strata",
            "generate",
            "--schema",
            "tables.toml",
            "--driver",
            "MySQL",
            "-m",
            "db/migrations",
        ])
        .unwrap();
        assert_eq!(cli.driver.as_deref(), Some("MySQL"));
        assert_eq!(cli.migrations_dir.as_deref(), Some("db/migrations"));
        assert!(matches!(cli.command, Commands::Generate(_)));
    }

    #[test]
    fn test_cli_requires_subcommand() {
        assert!(Cli::try_parse_from(["strata"]).is_err());
    }

    #[test]
    fn test_settings_from_driver_flag_only() {
        let cli = Cli::try_parse_from([
            "strata",
            "list",
            "--config",
            "/nonexistent/strata.toml",
            "--driver",
            "Cassandra",
        ])
        .unwrap();

        let settings = cli.settings().unwrap();
        assert_eq!(settings.driver, Driver::Cassandra);
        assert_eq!(settings.migrations_dir, PathBuf::from("migrations"));
    }

    #[test]
    fn test_settings_missing_config_without_driver() {
        let cli =
            Cli::try_parse_from(["strata", "check", "--config", "/nonexistent/strata.toml"])
                .unwrap();
        assert!(cli.settings().is_err());
    }

    #[test]
    fn test_settings_overrides_config_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("strata.toml");
        std::fs::write(
            &path,
            "[database]\ndriver = \"postgresql\"\nuser = \"app\"\n\n[migrations]\ndir = \"sql\"\n",
        )
        .unwrap();
        let config = path.to_string_lossy().to_string();

        let cli = Cli::try_parse_from(["strata", "list", "--config", &config]).unwrap();
        let settings = cli.settings().unwrap();
        assert_eq!(settings.driver, Driver::Postgres);
        assert_eq!(settings.connection.user.as_deref(), Some("app"));
        assert_eq!(settings.migrations_dir, PathBuf::from("sql"));

        let cli = Cli::try_parse_from([
            "strata", "list", "--config", &config, "--driver", "sqlite", "-m", "other",
        ])
        .unwrap();
        let settings = cli.settings().unwrap();
        assert_eq!(settings.driver, Driver::Sqlite);
        assert_eq!(settings.migrations_dir, PathBuf::from("other"));
    }

    #[test]
    fn test_after_close_keeps_command_error() {
        let failed: std::result::Result<(), _> = Err(StrataError::Execute {
            path: PathBuf::from("migrations/broken.sql"),
            message: "syntax error".into(),
        });
        let closed = Err(StrataError::Database("connection reset".into()));

        let err = after_close(failed, closed).unwrap_err();
        assert!(err.to_string().contains("broken.sql"));
    }

    #[test]
    fn test_after_close_reports_close_failure() {
        let closed = Err(StrataError::Database("connection reset".into()));
        let err = after_close(Ok(3), closed).unwrap_err();
        assert!(err.to_string().contains("connection reset"));

        assert_eq!(after_close(Ok(3), Ok(())).unwrap(), 3);
    }

    #[test]
    fn test_settings_unknown_driver() {
        let cli = Cli::try_parse_from([
            "strata",
            "list",
            "--config",
            "/nonexistent/strata.toml",
            "--driver",
            "db2",
        ])
        .unwrap();
        let err = cli.settings().err().unwrap();
        assert!(err.to_string().contains("db2"));
    }
}
