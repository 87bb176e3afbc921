pub mod config;
pub mod driver;
pub mod error;
pub mod schema;

pub use config::{ConnectionConfig, DatabaseConfig, MigrationsConfig, StrataConfig};
pub use driver::{Driver, MigrationKind};
pub use error::{Result, StrataError};
pub use schema::{Document, DocumentBatch, FieldDef, SchemaFile, TableSchema};
