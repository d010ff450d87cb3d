//! List-containers command implementation

use crate::cli::commands::{connect, EXIT_FATAL, EXIT_SUCCESS};
use crate::cli::ConnectionArgs;
use crate::config::FerryConfig;
use crate::core::admin;
use clap::Args;

/// Arguments for the list-containers command
#[derive(Args, Debug)]
pub struct ListArgs {
    #[command(flatten)]
    pub connection: ConnectionArgs,
}

impl ListArgs {
    /// Execute the list-containers command
    pub async fn execute(&self, config: &FerryConfig) -> anyhow::Result<i32> {
        let store = match connect(&self.connection, config) {
            Ok(store) => store,
            Err(code) => return Ok(code),
        };

        let rows = match admin::list_containers(store.as_ref()).await {
            Ok(rows) => rows,
            Err(e) => {
                tracing::error!(error = %e, "Failed to list containers");
                eprintln!("❌ Failed to list containers: {e}");
                return Ok(EXIT_FATAL);
            }
        };

        print!("{}", admin::render_container_table(&rows));
        Ok(EXIT_SUCCESS)
    }
}
