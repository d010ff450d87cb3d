//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for Ferry using clap.

pub mod commands;

use clap::{Args, Parser, Subcommand};

/// Ferry - Azure Cosmos DB document transfer tool
#[derive(Parser, Debug)]
#[command(name = "ferry")]
#[command(version, about, long_about = None)]
#[command(author = "Ferry Contributors")]
pub struct Cli {
    /// Path to an optional configuration file
    #[arg(long, env = "FERRY_CONFIG")]
    pub config: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "FERRY_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Delete a container and every document in it
    DeleteContainer(commands::delete::DeleteArgs),

    /// List every container of every database
    ListContainers(commands::list::ListArgs),

    /// Export every document of a container to one JSON file each
    ExportDocuments(commands::export::ExportArgs),

    /// Upload every .json file of a directory as one document each
    UploadDocuments(commands::upload::UploadArgs),
}

/// Connection options shared by every command
#[derive(Args, Debug, Clone)]
pub struct ConnectionArgs {
    /// Connection string to the Cosmos DB account including access key
    #[arg(short, long, env = "FERRY_ACCOUNT", hide_env_values = true)]
    pub account: String,

    /// Accept self-signed certificates when connecting to Cosmos DB
    #[arg(long)]
    pub allow_self_signed: bool,
}

/// Database and container a command operates on
#[derive(Args, Debug, Clone)]
pub struct ContainerArgs {
    /// Cosmos DB database name
    #[arg(short, long)]
    pub database: String,

    /// Cosmos DB container name
    #[arg(short, long)]
    pub container: String,
}
