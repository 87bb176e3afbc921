use anyhow::Result;
use clap::Parser;
use console::style;

use strata_runtime::list_migrations;

use super::Settings;

/// List the migration files `migrate` would run, in execution order.
#[derive(Parser)]
pub struct ListCommand {}

impl ListCommand {
    pub async fn execute(self, settings: &Settings) -> Result<()> {
        let kind = settings.driver.migration_kind();
        let paths = list_migrations(&settings.migrations_dir, kind)?;

        println!();
        if paths.is_empty() {
            println!(
                "  {} No .{} migrations in {}",
                style("ℹ").blue(),
                kind.extension(),
                settings.migrations_dir.display()
            );
        } else {
            for path in &paths {
                println!("    {} {}", style("→").dim(), style(path.display()).yellow());
            }
            println!();
            println!(
                "  {} {} migration(s) for {}",
                style("ℹ").blue(),
                paths.len(),
                settings.driver
            );
        }
        println!();

        Ok(())
    }
}
