mod generator;
mod runner;

pub use generator::{
    migration_file_name, render_documents, render_tables, GeneratedMigration, MigrationWriter,
};
pub use runner::{list_migrations, MigrationRunner};
