//! Azure Cosmos DB integration
//!
//! This module provides the Cosmos DB implementation of the document store.

pub mod adapter;
pub mod client;

pub use adapter::CosmosDbAdapter;
pub use client::CosmosDbClient;
