//! Cosmos DB client implementation
//!
//! This module provides the client for interacting with Azure Cosmos DB.

use crate::config::{CosmosAccount, TransportConfig};
use crate::core::transfer::{PageCursor, PageStream};
use crate::domain::{Batch, ContainerPath, CosmosDbError, DocumentId, FerryError, Record, Result};
use azure_core::credentials::Secret;
use azure_core::http::{StatusCode, Transport};
use azure_data_cosmos::clients::{ContainerClient, DatabaseClient};
use azure_data_cosmos::models::{
    ContainerProperties, DatabaseProperties, IndexingPolicy, PartitionKeyDefinition,
    PartitionKeyKind,
};
use azure_data_cosmos::{CosmosClient, CosmosClientOptions, PartitionKey};
use futures::stream::StreamExt;
use serde_json::Value;
use std::borrow::Cow;
use std::sync::Arc;
use std::time::Duration;

const ALL_DATABASES: &str = "SELECT * FROM root";
const ALL_CONTAINERS: &str = "SELECT * FROM root";
const ALL_DOCUMENTS: &str = "SELECT * FROM c";

/// Cosmos DB client for Ferry
///
/// Provides existence checks, create-if-absent, enumeration, deletion, paged
/// reads and single-document inserts against one Cosmos DB account.
pub struct CosmosDbClient {
    /// Cosmos DB client
    client: CosmosClient,

    /// Account endpoint, kept for logging
    endpoint: String,

    /// Documents requested per page
    page_size: usize,
}

impl CosmosDbClient {
    /// Create a new Cosmos DB client
    ///
    /// # Arguments
    ///
    /// * `account` - Parsed connection string
    /// * `transport` - TLS and timeout settings for this client only
    /// * `page_size` - Documents per page when reading a container
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP transport or the client cannot be created.
    pub fn new(
        account: &CosmosAccount,
        transport: TransportConfig,
        page_size: usize,
    ) -> Result<Self> {
        let http_client = build_http_client(&account.endpoint, transport)?;

        let mut options = CosmosClientOptions::default();
        options.client_options.transport = Some(Transport::new(Arc::new(http_client)));

        let key = Secret::new(account.expose_key());
        let client = CosmosClient::with_key(&account.endpoint, key, Some(options)).map_err(|e| {
            FerryError::CosmosDb(CosmosDbError::ConnectionFailed(format!(
                "Failed to create Cosmos client: {e}"
            )))
        })?;

        tracing::debug!(endpoint = %account.endpoint, page_size, "Cosmos DB client created");

        Ok(Self {
            client,
            endpoint: account.endpoint.clone(),
            page_size: page_size.max(1),
        })
    }

    fn database(&self, database: &str) -> DatabaseClient {
        self.client.database_client(database)
    }

    fn container(&self, path: &ContainerPath) -> ContainerClient {
        self.database(&path.database).container_client(&path.container)
    }

    /// Check whether a database exists
    pub async fn database_exists(&self, database: &str) -> Result<bool> {
        match self.database(database).read(None).await {
            Ok(_) => Ok(true),
            Err(e) if is_status(&e, StatusCode::NotFound) => Ok(false),
            Err(e) => Err(FerryError::CosmosDb(CosmosDbError::QueryFailed(format!(
                "Failed to read database {database}: {e}"
            )))),
        }
    }

    /// Check whether a container exists
    pub async fn container_exists(&self, path: &ContainerPath) -> Result<bool> {
        match self.container(path).read(None).await {
            Ok(_) => Ok(true),
            Err(e) if is_status(&e, StatusCode::NotFound) => Ok(false),
            Err(e) => Err(FerryError::CosmosDb(CosmosDbError::QueryFailed(format!(
                "Failed to read container {path}: {e}"
            )))),
        }
    }

    /// Ensure the database exists, creating it if necessary
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be created.
    pub async fn ensure_database_exists(&self, database: &str) -> Result<()> {
        if self.database_exists(database).await? {
            tracing::info!(database = %database, "Database already exists");
            return Ok(());
        }

        tracing::info!(database = %database, "Creating database");

        match self.client.create_database(database, None).await {
            Ok(_) => {
                tracing::info!(database = %database, "Database created successfully");
                Ok(())
            }
            // Created concurrently by someone else
            Err(e) if is_status(&e, StatusCode::Conflict) => Ok(()),
            Err(e) => Err(FerryError::CosmosDb(CosmosDbError::DatabaseCreationFailed(
                format!("Failed to create database {database}: {e}"),
            ))),
        }
    }

    /// Ensure a container exists, creating it if necessary
    ///
    /// # Arguments
    ///
    /// * `path` - Database and container name
    /// * `partition_key_path` - Partition key path, `/id` for Ferry containers
    ///
    /// # Errors
    ///
    /// Returns an error if the container cannot be created.
    pub async fn ensure_container_exists(
        &self,
        path: &ContainerPath,
        partition_key_path: &str,
    ) -> Result<()> {
        if self.container_exists(path).await? {
            tracing::info!(container = %path, "Container already exists");
            return Ok(());
        }

        tracing::info!(
            container = %path,
            partition_key = %partition_key_path,
            "Creating container"
        );

        let partition_key_def = PartitionKeyDefinition {
            paths: vec![partition_key_path.to_string()],
            kind: PartitionKeyKind::Hash,
            version: None,
        };

        let properties = ContainerProperties {
            id: Cow::Owned(path.container.clone()),
            partition_key: partition_key_def,
            indexing_policy: Some(IndexingPolicy::default()),
            ..Default::default()
        };

        match self
            .database(&path.database)
            .create_container(properties, None)
            .await
        {
            Ok(_) => {
                tracing::info!(container = %path, "Container created successfully");
                Ok(())
            }
            Err(e) if is_status(&e, StatusCode::Conflict) => Ok(()),
            Err(e) => Err(FerryError::CosmosDb(CosmosDbError::ContainerCreationFailed(
                format!("Failed to create container {path}: {e}"),
            ))),
        }
    }

    /// Names of every database in the account
    pub async fn list_databases(&self) -> Result<Vec<String>> {
        let mut pager = self
            .client
            .query_databases(ALL_DATABASES, None)
            .map_err(|e| query_failed("Failed to create database query", e))?;

        let mut names = Vec::new();
        while let Some(item) = pager.next().await {
            let database: DatabaseProperties =
                item.map_err(|e| query_failed("Failed to list databases", e))?;
            names.push(database.id);
        }
        Ok(names)
    }

    /// Names of every container in a database
    pub async fn list_containers(&self, database: &str) -> Result<Vec<String>> {
        let mut pager = self
            .database(database)
            .query_containers(ALL_CONTAINERS, None)
            .map_err(|e| query_failed("Failed to create container query", e))?;

        let mut names = Vec::new();
        while let Some(item) = pager.next().await {
            let container: ContainerProperties = item.map_err(|e| {
                query_failed(&format!("Failed to list containers of {database}"), e)
            })?;
            names.push(container.id.into_owned());
        }
        Ok(names)
    }

    /// Delete a container
    pub async fn delete_container(&self, path: &ContainerPath) -> Result<()> {
        self.container(path).delete(None).await.map_err(|e| {
            if is_status(&e, StatusCode::NotFound) {
                FerryError::CosmosDb(CosmosDbError::ContainerNotFound {
                    database: path.database.clone(),
                    container: path.container.clone(),
                })
            } else {
                FerryError::CosmosDb(CosmosDbError::DeleteFailed(format!(
                    "Failed to delete container {path}: {e}"
                )))
            }
        })?;

        tracing::info!(container = %path, "Container deleted");
        Ok(())
    }

    /// Open a cross-partition listing of every document in a container
    ///
    /// Items are regrouped into pages of at most `page_size` documents; the
    /// query itself is only issued as the cursor is advanced.
    pub fn read_all(&self, path: &ContainerPath) -> Result<PageCursor> {
        let pager = self
            .container(path)
            .query_items::<Value>(ALL_DOCUMENTS, PartitionKey::EMPTY, None)
            .map_err(|e| query_failed(&format!("Failed to create query on {path}"), e))?;

        let label = path.to_string();
        let pages: PageStream = pager
            .chunks(self.page_size)
            .map(move |items| into_batch(&label, items))
            .boxed();

        Ok(PageCursor::new(pages))
    }

    /// Insert one document, partitioned by its id
    pub async fn create_document(
        &self,
        path: &ContainerPath,
        id: &DocumentId,
        document: &Record,
    ) -> Result<()> {
        let partition_key = PartitionKey::from(id.as_str().to_string());

        self.container(path)
            .create_item(partition_key, document.clone(), None)
            .await
            .map_err(|e| {
                if is_status(&e, StatusCode::Conflict) {
                    FerryError::CosmosDb(CosmosDbError::Conflict(format!(
                        "Document {id} already exists in {path}"
                    )))
                } else {
                    FerryError::CosmosDb(CosmosDbError::InsertFailed(format!(
                        "Failed to insert document {id}: {e}"
                    )))
                }
            })?;

        Ok(())
    }

    /// Get the endpoint URL
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

fn build_http_client(endpoint: &str, transport: TransportConfig) -> Result<reqwest::Client> {
    let mut client_builder =
        reqwest::Client::builder().timeout(Duration::from_secs(transport.request_timeout_seconds));

    if transport.allow_self_signed {
        tracing::warn!(
            "⚠️  SECURITY WARNING: TLS certificate verification is DISABLED for Cosmos DB at {}. \
            Every request made by this client accepts self-signed and untrusted certificates and \
            is vulnerable to man-in-the-middle attacks. Only use --allow-self-signed against the \
            local emulator or a trusted test environment.",
            endpoint
        );
        client_builder = client_builder.danger_accept_invalid_certs(true);
    }

    client_builder.build().map_err(|e| {
        FerryError::CosmosDb(CosmosDbError::ConnectionFailed(format!(
            "Failed to create HTTP client: {e}"
        )))
    })
}

fn is_status(error: &azure_core::Error, status: StatusCode) -> bool {
    error.http_status() == Some(status)
}

fn query_failed(context: &str, error: azure_core::Error) -> FerryError {
    FerryError::CosmosDb(CosmosDbError::QueryFailed(format!("{context}: {error}")))
}

fn into_batch(container: &str, items: Vec<azure_core::Result<Value>>) -> Result<Batch> {
    items
        .into_iter()
        .map(|item| {
            let item = item
                .map_err(|e| query_failed(&format!("Failed to read page of {container}"), e))?;
            match item {
                Value::Object(document) => Ok(document),
                other => Err(FerryError::CosmosDb(CosmosDbError::QueryFailed(format!(
                    "Query on {container} returned a non-object document: {other}"
                )))),
            }
        })
        .collect()
}
