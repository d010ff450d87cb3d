//! Document store abstraction
//!
//! This module defines the trait that store adapters must implement to be
//! driven by the transfer pipelines and the administrative commands.

use crate::core::transfer::PageCursor;
use crate::domain::{ContainerPath, DocumentId, Record, Result};
use async_trait::async_trait;

/// Partition key path of every container Ferry creates
pub const ID_PARTITION_KEY_PATH: &str = "/id";

/// Document store client
///
/// Each method is a single logical call against the store. Implementations
/// must be safe to share across the concurrent item workers of a batch.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Check whether a database exists
    ///
    /// # Errors
    ///
    /// Returns an error if the lookup fails for a reason other than "not found".
    async fn database_exists(&self, database: &str) -> Result<bool>;

    /// Check whether a container exists in a database that is known to exist
    ///
    /// # Errors
    ///
    /// Returns an error if the lookup fails for a reason other than "not found".
    async fn container_exists(&self, path: &ContainerPath) -> Result<bool>;

    /// Create the database if it does not exist
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be created or accessed.
    async fn ensure_database_exists(&self, database: &str) -> Result<()>;

    /// Create the container if it does not exist
    ///
    /// # Arguments
    ///
    /// * `path` - Database and container name
    /// * `partition_key_path` - Partition key path used when the container is created
    ///
    /// # Errors
    ///
    /// Returns an error if the container cannot be created or accessed.
    async fn ensure_container_exists(
        &self,
        path: &ContainerPath,
        partition_key_path: &str,
    ) -> Result<()>;

    /// Names of every database in the account
    async fn list_databases(&self) -> Result<Vec<String>>;

    /// Names of every container in a database
    async fn list_containers(&self, database: &str) -> Result<Vec<String>>;

    /// Delete a container and every document in it
    ///
    /// # Errors
    ///
    /// Returns an error if the container does not exist or the delete fails.
    async fn delete_container(&self, path: &ContainerPath) -> Result<()>;

    /// Open a paginated listing of every document in a container
    ///
    /// Pages are fetched lazily as the returned cursor is advanced. Documents
    /// are returned as stored, reserved fields included.
    ///
    /// # Errors
    ///
    /// Returns an error if the query cannot be issued.
    async fn read_all(&self, path: &ContainerPath) -> Result<PageCursor>;

    /// Insert one document, partitioned by its id
    ///
    /// # Errors
    ///
    /// Returns [`crate::domain::CosmosDbError::Conflict`] when a document with
    /// the same id already exists, or another error if the insert fails.
    async fn create_document(
        &self,
        path: &ContainerPath,
        id: &DocumentId,
        document: &Record,
    ) -> Result<()>;
}
