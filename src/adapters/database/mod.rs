//! Document store abstraction layer
//!
//! This module provides a trait-based abstraction for document store
//! operations, allowing Ferry to run its pipelines against Azure Cosmos DB or
//! an in-memory store.

pub mod factory;
pub mod memory;
pub mod traits;

pub use factory::{create_document_store, create_dry_run_store};
pub use memory::InMemoryStore;
pub use traits::{DocumentStore, ID_PARTITION_KEY_PATH};
