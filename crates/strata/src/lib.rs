//! strata - timestamped schema migrations for relational and document databases.
//!
//! Write a migration from table or collection descriptions, then replay every
//! migration in a directory against a live connection.

pub use strata_core::{
    ConnectionConfig, DatabaseConfig, Document, DocumentBatch, Driver, FieldDef, MigrationKind,
    MigrationsConfig, Result, SchemaFile, StrataConfig, StrataError, TableSchema,
};
pub use strata_runtime::{
    connect, list_migrations, Connection, GeneratedMigration, MigrationRunner, MigrationWriter,
};
