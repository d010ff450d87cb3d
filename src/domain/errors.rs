//! Domain error types
//!
//! This module defines the error hierarchy for Ferry. Errors are domain-specific
//! and don't expose third-party SDK types.

use thiserror::Error;

/// Main Ferry error type
///
/// This is the primary error type used throughout the application.
/// Per-item transfer failures are not represented here; they are reported as
/// [`crate::core::transfer::ItemFailure`] values and never abort a run.
#[derive(Debug, Error)]
pub enum FerryError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Cosmos DB-related errors
    #[error("Cosmos DB error: {0}")]
    CosmosDb(#[from] CosmosDbError),

    /// Transfer pipeline errors (destination preparation, pagination)
    #[error("Transfer error: {0}")]
    Transfer(String),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// Generic errors with context
    #[error("{0}")]
    Other(String),
}

/// Cosmos DB-specific errors
///
/// Errors that occur when interacting with Azure Cosmos DB.
#[derive(Debug, Error)]
pub enum CosmosDbError {
    /// Failed to connect to Cosmos DB or construct the client
    #[error("Failed to connect to Cosmos DB: {0}")]
    ConnectionFailed(String),

    /// Database not found
    #[error("Specified database {0} does not exist")]
    DatabaseNotFound(String),

    /// Container not found
    #[error("Specified container {container} does not exist in database {database}")]
    ContainerNotFound { database: String, container: String },

    /// Failed to create database
    #[error("Failed to create database: {0}")]
    DatabaseCreationFailed(String),

    /// Failed to create container
    #[error("Failed to create container: {0}")]
    ContainerCreationFailed(String),

    /// Failed to insert document
    #[error("Failed to insert document: {0}")]
    InsertFailed(String),

    /// Conflict error (409), a document with the same id already exists
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Failed to query or page through documents
    #[error("Failed to query documents: {0}")]
    QueryFailed(String),

    /// Failed to delete a container
    #[error("Failed to delete container: {0}")]
    DeleteFailed(String),
}

impl CosmosDbError {
    /// Returns true if the error means the requested resource does not exist
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            CosmosDbError::DatabaseNotFound(_) | CosmosDbError::ContainerNotFound { .. }
        )
    }
}

// Conversion from std::io::Error
impl From<std::io::Error> for FerryError {
    fn from(err: std::io::Error) -> Self {
        FerryError::Io(err.to_string())
    }
}

// Conversion from serde_json::Error
impl From<serde_json::Error> for FerryError {
    fn from(err: serde_json::Error) -> Self {
        FerryError::Serialization(err.to_string())
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for FerryError {
    fn from(err: toml::de::Error) -> Self {
        FerryError::Configuration(format!("TOML parse error: {err}"))
    }
}
