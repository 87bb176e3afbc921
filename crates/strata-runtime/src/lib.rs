pub mod db;
pub mod migrations;

pub use db::{connect, Connection};
pub use migrations::{list_migrations, GeneratedMigration, MigrationRunner, MigrationWriter};
