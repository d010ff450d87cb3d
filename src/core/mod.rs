//! Core business logic for Ferry.
//!
//! # Modules
//!
//! - [`transfer`] - Pagination cursor, batch engine and per-item outcomes
//! - [`codec`] - Reserved-field stripping, text decoding and JSON parsing
//! - [`destination`] - Output directory reset and create-if-absent containers
//! - [`export`] - Container to directory pipeline
//! - [`upload`] - Directory to container pipeline
//! - [`admin`] - Container lookup, deletion and listing
//!
//! # Export Workflow
//!
//! 1. **Resolve**: check that the database and then the container exist
//! 2. **Reset**: remove and recreate the output directory
//! 3. **Page**: fetch one page of documents at a time
//! 4. **Fan out**: strip, encode and write every document of the page concurrently
//! 5. **Report**: log the batch and move on to the next page
//!
//! # Example
//!
//! ```rust,no_run
//! use ferry::adapters::database::InMemoryStore;
//! use ferry::core::export::ExportPipeline;
//! use ferry::core::transfer::BatchEngine;
//! use ferry::domain::ContainerPath;
//! use std::path::Path;
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let store = Arc::new(InMemoryStore::new());
//! let source = ContainerPath::new("db1", "c1")?;
//!
//! let summary = ExportPipeline::new(store, BatchEngine::new(64))
//!     .run(&source, Path::new("output"))
//!     .await?;
//!
//! println!("Exported: {}", summary.succeeded);
//! println!("Failed: {}", summary.failed);
//! # Ok(())
//! # }
//! ```

pub mod admin;
pub mod codec;
pub mod destination;
pub mod export;
pub mod transfer;
pub mod upload;
