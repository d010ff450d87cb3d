// Ferry - Azure Cosmos DB document transfer tool
// Copyright (c) 2025 Ferry Contributors
// Licensed under the MIT License

//! # Ferry - Azure Cosmos DB document transfer tool
//!
//! Ferry moves JSON documents between an Azure Cosmos DB container and a
//! directory of files, one document per file.
//!
//! ## Overview
//!
//! This library provides the core functionality for:
//! - **Exporting** every document of a container to `<id>.json` files
//! - **Uploading** a directory of `.json` files as documents
//! - **Listing** every container of every database of an account
//! - **Deleting** a container after checking that it exists
//!
//! ## Architecture
//!
//! Ferry follows a layered architecture:
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - Business logic (transfer engine, codec, export, upload, admin)
//! - [`adapters`] - External integrations (Cosmos DB, in-memory store)
//! - [`domain`] - Core domain types and errors
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use ferry::adapters::database::create_document_store;
//! use ferry::config::{CosmosAccount, FerryConfig};
//! use ferry::core::export::ExportPipeline;
//! use ferry::core::transfer::BatchEngine;
//! use ferry::domain::ContainerPath;
//! use std::path::Path;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = FerryConfig::default();
//!     let account = CosmosAccount::parse(
//!         "AccountEndpoint=https://localhost:8081/;AccountKey=a2V5;",
//!     )?;
//!     let store = create_document_store(&account, true, &config.cosmosdb)?;
//!
//!     let source = ContainerPath::new("db1", "c1")?;
//!     let summary = ExportPipeline::new(store, BatchEngine::new(64))
//!         .run(&source, Path::new("output"))
//!         .await?;
//!
//!     println!("Exported {} documents", summary.succeeded);
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! Run-level failures use [`domain::FerryError`]. A document that cannot be
//! decoded or written is reported as a [`core::transfer::ItemFailure`] and
//! never stops the rest of the run.
//!
//! ## Logging
//!
//! Ferry uses structured logging with the `tracing` crate:
//!
//! ```rust,no_run
//! use tracing::{info, warn};
//!
//! info!(container = "db1/c1", "Starting export");
//! warn!(file = "notes.txt", "The file does not have a .json file extension. It will be skipped");
//! ```

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
