use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use console::style;

use strata_core::driver::Driver;
use strata_core::schema::SchemaFile;
use strata_runtime::{GeneratedMigration, MigrationWriter};

use super::Settings;

/// Write a timestamped migration from a schema file.
#[derive(Parser)]
pub struct GenerateCommand {
    /// Schema file with `[[tables]]` or `[[collections]]` entries.
    #[arg(short, long, default_value = "schema.toml")]
    pub schema: PathBuf,
}

impl GenerateCommand {
    pub async fn execute(self, settings: &Settings) -> Result<()> {
        let migration = self.generate(settings)?;

        println!(
            "{} Created migration: {}",
            style("✅").green(),
            style(migration.path.display()).cyan()
        );
        Ok(())
    }

    fn generate(&self, settings: &Settings) -> Result<GeneratedMigration> {
        let schema = SchemaFile::from_file(&self.schema)?;
        let writer =
            MigrationWriter::new(&settings.migrations_dir).with_dialect(settings.driver);

        let migration = if settings.driver == Driver::MongoDb {
            if schema.collections.is_empty() {
                anyhow::bail!("No [[collections]] in {}", self.schema.display());
            }
            writer.write_documents(&schema.collections)?
        } else {
            if schema.tables.is_empty() {
                anyhow::bail!("No [[tables]] in {}", self.schema.display());
            }
            writer.write_tables(&schema.tables)?
        };

        Ok(migration)
    }
}
