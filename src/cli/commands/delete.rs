//! Delete-container command implementation

use crate::adapters::database::DocumentStore;
use crate::cli::commands::{connect, container_path, EXIT_FATAL, EXIT_SUCCESS};
use crate::cli::{ConnectionArgs, ContainerArgs};
use crate::config::FerryConfig;
use crate::core::admin;
use crate::domain::ContainerPath;
use clap::Args;
use std::io::Write;

/// Arguments for the delete-container command
#[derive(Args, Debug)]
pub struct DeleteArgs {
    #[command(flatten)]
    pub target: ContainerArgs,

    #[command(flatten)]
    pub connection: ConnectionArgs,
}

impl DeleteArgs {
    /// Execute the delete-container command
    pub async fn execute(&self, config: &FerryConfig) -> anyhow::Result<i32> {
        let path = match container_path(&self.target) {
            Ok(path) => path,
            Err(code) => return Ok(code),
        };
        let store = match connect(&self.connection, config) {
            Ok(store) => store,
            Err(code) => return Ok(code),
        };

        delete(store.as_ref(), &path, &mut std::io::stdout()).await
    }
}

/// Resolve, announce and delete a container, writing progress to `out`
///
/// Nothing is written to `out` unless the database and container exist.
async fn delete(
    store: &dyn DocumentStore,
    path: &ContainerPath,
    out: &mut (dyn Write + Send),
) -> anyhow::Result<i32> {
    if let Err(e) = admin::resolve_container(store, path).await {
        tracing::error!(error = %e, container = %path, "Container lookup failed");
        eprintln!("❌ {e}");
        return Ok(EXIT_FATAL);
    }

    writeln!(
        out,
        "deleting container {} from database {}...",
        path.container, path.database
    )?;

    match admin::delete_resolved_container(store, path).await {
        Ok(()) => {
            writeln!(out, "container {} has been deleted", path.container)?;
            Ok(EXIT_SUCCESS)
        }
        Err(e) => {
            tracing::error!(error = %e, container = %path, "Failed to delete container");
            eprintln!("❌ {e}");
            Ok(EXIT_FATAL)
        }
    }
}
