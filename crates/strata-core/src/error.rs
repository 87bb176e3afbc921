use std::path::PathBuf;

use thiserror::Error;

/// Core error type for strata operations.
#[derive(Error, Debug)]
pub enum StrataError {
    #[error("Unsupported database driver: {0}")]
    UnsupportedDriver(String),

    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Migrations directory does not exist: {}", .0.display())]
    MigrationsDirNotFound(PathBuf),

    #[error("Failed to list migrations in {}: {source}", path.display())]
    ListDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read migration {}: {source}", path.display())]
    ReadMigration {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to execute migration {}: {message}", path.display())]
    Execute { path: PathBuf, message: String },

    #[error("Failed to write migration {}: {source}", path.display())]
    WriteMigration {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("SQL error: {0}")]
    Sql(#[from] sqlx::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for StrataError {
    fn from(e: serde_json::Error) -> Self {
        StrataError::Serialization(e.to_string())
    }
}

/// Result type alias using StrataError.
pub type Result<T> = std::result::Result<T, StrataError>;
