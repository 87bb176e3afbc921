use anyhow::Result;
use clap::Parser;
use console::style;

use strata_runtime::{Connection, MigrationRunner};

use super::{after_close, Settings};

/// Run every migration file in the migrations directory.
#[derive(Parser)]
pub struct MigrateCommand {}

impl MigrateCommand {
    pub async fn execute(self, settings: &Settings) -> Result<()> {
        println!();
        println!(
            "  {}  {} Migrations ({})",
            style("⚒️").bold(),
            style("STRATA").bold().cyan(),
            settings.driver
        );
        println!();

        let mut conn = Connection::open(settings.driver, &settings.connection).await?;

        println!(
            "  {} Running migrations from {}...",
            style("→").dim(),
            settings.migrations_dir.display()
        );
        let result = MigrationRunner::new(&mut conn)
            .run(&settings.migrations_dir)
            .await;
        let closed = conn.close().await;
        let applied = after_close(result, closed)?;

        if applied.is_empty() {
            println!(
                "  {} No migrations found in {}",
                style("ℹ").blue(),
                settings.migrations_dir.display()
            );
        } else {
            for path in &applied {
                println!(
                    "  {} Applied: {}",
                    style("✓").green(),
                    style(path.display()).cyan()
                );
            }
            println!();
            println!(
                "  {} Applied {} migration(s)",
                style("✓").green(),
                applied.len()
            );
        }
        println!();

        Ok(())
    }
}
