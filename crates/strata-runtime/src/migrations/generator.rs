use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use tracing::info;

use strata_core::driver::{Driver, MigrationKind};
use strata_core::error::{Result, StrataError};
use strata_core::schema::{DocumentBatch, TableSchema};

/// Timestamp format embedded in migration file names.
const TIMESTAMP_FORMAT: &str = "%Y%m%d%H%M%S";

/// Writes timestamp-named migration files into one directory.
///
/// File names have one-second resolution; two writes within the same second
/// produce the same name and the later one replaces the earlier file.
pub struct MigrationWriter {
    /// Output directory for migrations. Must already exist.
    output_dir: PathBuf,
    /// Dialect used to render table DDL.
    dialect: Driver,
}

impl MigrationWriter {
    /// Create a writer for the generic SQL dialect.
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            dialect: Driver::Postgres,
        }
    }

    /// Render DDL for a specific back end.
    pub fn with_dialect(mut self, dialect: Driver) -> Self {
        self.dialect = dialect;
        self
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Write one migration with a `CREATE TABLE` block per schema.
    pub fn write_tables(&self, schemas: &[TableSchema]) -> Result<GeneratedMigration> {
        self.write_tables_at(schemas, Local::now())
    }

    /// Write one MongoDB script inserting every document of every batch.
    pub fn write_documents(&self, batches: &[DocumentBatch]) -> Result<GeneratedMigration> {
        self.write_documents_at(batches, Local::now())
    }

    fn write_tables_at(
        &self,
        schemas: &[TableSchema],
        created_at: DateTime<Local>,
    ) -> Result<GeneratedMigration> {
        let content = render_tables(schemas, self.dialect);
        let kind = match self.dialect.migration_kind() {
            MigrationKind::Script => MigrationKind::Sql,
            kind => kind,
        };
        self.write(kind, content, created_at)
    }

    fn write_documents_at(
        &self,
        batches: &[DocumentBatch],
        created_at: DateTime<Local>,
    ) -> Result<GeneratedMigration> {
        let content = render_documents(batches)?;
        self.write(MigrationKind::Script, content, created_at)
    }

    fn write(
        &self,
        kind: MigrationKind,
        content: String,
        created_at: DateTime<Local>,
    ) -> Result<GeneratedMigration> {
        let file_name = migration_file_name(kind, &created_at);
        let path = self.output_dir.join(&file_name);

        let write_err = |source| StrataError::WriteMigration {
            path: path.clone(),
            source,
        };
        let mut file = std::fs::File::create(&path).map_err(write_err)?;
        file.write_all(content.as_bytes()).map_err(write_err)?;

        info!("Wrote migration {}", path.display());

        Ok(GeneratedMigration {
            file_name,
            path,
            kind,
            content,
            created_at,
        })
    }
}

/// A migration file that has been written to disk.
#[derive(Debug, Clone)]
pub struct GeneratedMigration {
    /// File name, e.g. `migration_20240101120000.sql`.
    pub file_name: String,
    /// Full path of the written file.
    pub path: PathBuf,
    /// Kind of file written.
    pub kind: MigrationKind,
    /// What was written.
    pub content: String,
    /// When the file was named.
    pub created_at: DateTime<Local>,
}

/// `migration_<YYYYMMDDHHMMSS>.<ext>`.
pub fn migration_file_name(kind: MigrationKind, created_at: &DateTime<Local>) -> String {
    format!(
        "migration_{}.{}",
        created_at.format(TIMESTAMP_FORMAT),
        kind.extension()
    )
}

/// Render `CREATE TABLE` blocks for every schema, in order.
pub fn render_tables(schemas: &[TableSchema], dialect: Driver) -> String {
    let if_not_exists = dialect.supports_if_not_exists();
    schemas
        .iter()
        .map(|schema| schema.to_create_sql(if_not_exists))
        .collect()
}

/// Render `insertOne` lines for every batch, in order.
pub fn render_documents(batches: &[DocumentBatch]) -> Result<String> {
    let mut script = String::new();
    for batch in batches {
        script.push_str(&batch.to_script()?);
    }
    Ok(script)
}
