//! Document store factory
//!
//! This module provides factory functions that turn command-line and file
//! configuration into a ready [`DocumentStore`].

use crate::adapters::cosmosdb::adapter::CosmosDbAdapter;
use crate::adapters::cosmosdb::client::CosmosDbClient;
use crate::adapters::database::memory::InMemoryStore;
use crate::adapters::database::traits::DocumentStore;
use crate::config::{CosmosAccount, CosmosDbConfig, TransportConfig};
use crate::domain::Result;
use std::sync::Arc;

/// Create a Cosmos DB backed document store
///
/// # Arguments
///
/// * `account` - Parsed connection string
/// * `allow_self_signed` - Accept untrusted certificates for this client
/// * `config` - Cosmos DB section of the configuration file
///
/// # Errors
///
/// Returns an error if the client cannot be created
pub fn create_document_store(
    account: &CosmosAccount,
    allow_self_signed: bool,
    config: &CosmosDbConfig,
) -> Result<Arc<dyn DocumentStore>> {
    let transport = TransportConfig::new(allow_self_signed, config.request_timeout_seconds);

    tracing::info!(
        endpoint = %account.endpoint,
        allow_self_signed,
        "Creating Cosmos DB client"
    );
    let client = CosmosDbClient::new(account, transport, config.page_size)?;

    Ok(Arc::new(CosmosDbAdapter::new(client)) as Arc<dyn DocumentStore>)
}

/// Create an empty in-memory document store
///
/// Nothing written to it leaves the process.
pub fn create_dry_run_store() -> Arc<dyn DocumentStore> {
    tracing::info!("Creating in-memory document store for dry run");
    Arc::new(InMemoryStore::new()) as Arc<dyn DocumentStore>
}
