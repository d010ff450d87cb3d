//! Export-documents command implementation

use crate::cli::commands::{
    connect, container_path, print_progress, report_summary, EXIT_FATAL,
};
use crate::cli::{ConnectionArgs, ContainerArgs};
use crate::config::FerryConfig;
use crate::core::export::ExportPipeline;
use crate::core::transfer::BatchEngine;
use clap::Args;
use std::path::PathBuf;

/// Arguments for the export-documents command
#[derive(Args, Debug)]
pub struct ExportArgs {
    #[command(flatten)]
    pub target: ContainerArgs,

    #[command(flatten)]
    pub connection: ConnectionArgs,

    /// Output directory, removed and recreated before the export
    #[arg(short, long, default_value = "output")]
    pub output: PathBuf,
}

impl ExportArgs {
    /// Execute the export-documents command
    pub async fn execute(&self, config: &FerryConfig) -> anyhow::Result<i32> {
        let path = match container_path(&self.target) {
            Ok(path) => path,
            Err(code) => return Ok(code),
        };
        let store = match connect(&self.connection, config) {
            Ok(store) => store,
            Err(code) => return Ok(code),
        };

        println!(
            "Exporting documents from {} to {}",
            path,
            self.output.display()
        );

        let pipeline = ExportPipeline::new(store, BatchEngine::new(config.transfer.max_concurrency))
            .with_progress(print_progress());

        match pipeline.run(&path, &self.output).await {
            Ok(summary) => {
                if summary.is_successful() {
                    println!("All documents exported to file");
                }
                Ok(report_summary("Export", &summary))
            }
            Err(e) => {
                tracing::error!(error = %e, container = %path, "Export failed");
                eprintln!("❌ Failed to export documents: {e}");
                Ok(EXIT_FATAL)
            }
        }
    }
}
