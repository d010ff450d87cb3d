//! Upload-documents command implementation

use crate::adapters::database::create_dry_run_store;
use crate::cli::commands::{
    connect, container_path, parse_account, print_progress, report_summary, EXIT_CONFIG,
    EXIT_FATAL,
};
use crate::cli::{ConnectionArgs, ContainerArgs};
use crate::config::FerryConfig;
use crate::core::codec::TextEncoding;
use crate::core::transfer::BatchEngine;
use crate::core::upload::UploadPipeline;
use clap::Args;
use std::path::PathBuf;

/// Arguments for the upload-documents command
#[derive(Args, Debug)]
pub struct UploadArgs {
    #[command(flatten)]
    pub target: ContainerArgs,

    #[command(flatten)]
    pub connection: ConnectionArgs,

    /// Directory holding the .json files to upload
    #[arg(short, long)]
    pub source: PathBuf,

    /// Text encoding of the source files (utf8, utf16le, latin1, ascii)
    #[arg(short, long)]
    pub encoding: Option<String>,

    /// Run the upload against an in-memory store without contacting Cosmos DB
    #[arg(long)]
    pub dry_run: bool,
}

impl UploadArgs {
    /// Execute the upload-documents command
    pub async fn execute(&self, config: &FerryConfig) -> anyhow::Result<i32> {
        let encoding_name = self
            .encoding
            .as_deref()
            .unwrap_or(&config.transfer.default_encoding);
        let encoding: TextEncoding = match encoding_name.parse() {
            Ok(encoding) => encoding,
            Err(e) => {
                eprintln!("Configuration error: {e}");
                return Ok(EXIT_CONFIG);
            }
        };

        let path = match container_path(&self.target) {
            Ok(path) => path,
            Err(code) => return Ok(code),
        };

        let store = if self.dry_run {
            if let Err(code) = parse_account(&self.connection) {
                return Ok(code);
            }
            println!("🔍 Dry run: documents are uploaded to an in-memory store");
            create_dry_run_store()
        } else {
            match connect(&self.connection, config) {
                Ok(store) => store,
                Err(code) => return Ok(code),
            }
        };

        let pipeline = UploadPipeline::new(
            store,
            BatchEngine::new(config.transfer.max_concurrency),
            config.transfer.batch_size,
            encoding,
        )
        .with_dry_run(self.dry_run)
        .with_progress(print_progress());

        println!("Uploading files from {} to Cosmos DB", self.source.display());

        match pipeline.run(&self.source, &path).await {
            Ok(summary) => {
                println!("File upload complete");
                Ok(report_summary("Upload", &summary))
            }
            Err(e) => {
                tracing::error!(error = %e, container = %path, "Upload failed");
                eprintln!("❌ Failed to upload documents: {e}");
                Ok(EXIT_FATAL)
            }
        }
    }
}
