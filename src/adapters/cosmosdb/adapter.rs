//! CosmosDB adapter implementing the document store trait
//!
//! This module provides the implementation of [`DocumentStore`] for Azure
//! Cosmos DB.

use crate::adapters::cosmosdb::client::CosmosDbClient;
use crate::adapters::database::traits::DocumentStore;
use crate::core::transfer::PageCursor;
use crate::domain::{ContainerPath, DocumentId, Record, Result};
use async_trait::async_trait;
use std::sync::Arc;

/// CosmosDB implementation of [`DocumentStore`]
///
/// This wraps the CosmosDbClient and implements the DocumentStore trait.
pub struct CosmosDbAdapter {
    client: Arc<CosmosDbClient>,
}

impl CosmosDbAdapter {
    /// Create a new CosmosDB adapter
    pub fn new(client: CosmosDbClient) -> Self {
        Self {
            client: Arc::new(client),
        }
    }

    /// Get a reference to the underlying client
    pub fn client(&self) -> &Arc<CosmosDbClient> {
        &self.client
    }
}

#[async_trait]
impl DocumentStore for CosmosDbAdapter {
    async fn database_exists(&self, database: &str) -> Result<bool> {
        self.client.database_exists(database).await
    }

    async fn container_exists(&self, path: &ContainerPath) -> Result<bool> {
        self.client.container_exists(path).await
    }

    async fn ensure_database_exists(&self, database: &str) -> Result<()> {
        self.client.ensure_database_exists(database).await
    }

    async fn ensure_container_exists(
        &self,
        path: &ContainerPath,
        partition_key_path: &str,
    ) -> Result<()> {
        self.client
            .ensure_container_exists(path, partition_key_path)
            .await
    }

    async fn list_databases(&self) -> Result<Vec<String>> {
        self.client.list_databases().await
    }

    async fn list_containers(&self, database: &str) -> Result<Vec<String>> {
        self.client.list_containers(database).await
    }

    async fn delete_container(&self, path: &ContainerPath) -> Result<()> {
        self.client.delete_container(path).await
    }

    async fn read_all(&self, path: &ContainerPath) -> Result<PageCursor> {
        tracing::debug!(container = %path, "Opening paginated read");
        self.client.read_all(path)
    }

    async fn create_document(
        &self,
        path: &ContainerPath,
        id: &DocumentId,
        document: &Record,
    ) -> Result<()> {
        self.client.create_document(path, id, document).await
    }
}
