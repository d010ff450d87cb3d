// Ferry - Azure Cosmos DB document transfer tool
// Copyright (c) 2025 Ferry Contributors
// Licensed under the MIT License

use clap::Parser;
use ferry::cli::commands::{EXIT_CONFIG, EXIT_FATAL};
use ferry::cli::{Cli, Commands};
use ferry::config::{resolve_config, FerryConfig, LoggingConfig};
use ferry::logging::init_logging;
use std::process;

#[tokio::main]
async fn main() {
    // Load environment variables from .env file if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    let log_level = cli.log_level.as_deref().unwrap_or("info");

    let config = match resolve_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            // Console-only logging so the failure is still traced
            let _guard = init_logging(log_level, &LoggingConfig::default()).ok();
            tracing::error!(error = %e, "Failed to load configuration");
            eprintln!("{e}");
            process::exit(EXIT_CONFIG);
        }
    };

    let guard = match init_logging(log_level, &config.logging) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e}");
            process::exit(EXIT_FATAL);
        }
    };

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        "Ferry - Azure Cosmos DB document transfer tool"
    );

    let exit_code = match execute_command(&cli, &config).await {
        Ok(code) => code,
        Err(e) => {
            tracing::error!(error = %e, "Command execution failed");
            eprintln!("Error: {e}");
            EXIT_FATAL
        }
    };

    // process::exit skips destructors, flush the file log first
    drop(guard);
    process::exit(exit_code);
}

/// Execute the CLI command
async fn execute_command(cli: &Cli, config: &FerryConfig) -> anyhow::Result<i32> {
    match &cli.command {
        Commands::DeleteContainer(args) => args.execute(config).await,
        Commands::ListContainers(args) => args.execute(config).await,
        Commands::ExportDocuments(args) => args.execute(config).await,
        Commands::UploadDocuments(args) => args.execute(config).await,
    }
}
