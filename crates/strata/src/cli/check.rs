use anyhow::Result;
use clap::Parser;
use console::style;
use tracing::debug;

use strata_runtime::Connection;

use super::{after_close, Settings};

/// Open a connection with the configured driver and ping it.
#[derive(Parser)]
pub struct CheckCommand {}

impl CheckCommand {
    pub async fn execute(self, settings: &Settings) -> Result<()> {
        debug!("Checking {:?}", settings.connection.redacted());

        let mut conn = Connection::open(settings.driver, &settings.connection).await?;
        let result = conn.ping().await;
        let closed = conn.close().await;
        after_close(result, closed)?;

        println!(
            "  {} {} connection is alive",
            style("✓").green(),
            settings.driver
        );
        Ok(())
    }
}
