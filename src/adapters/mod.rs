//! External system integrations for Ferry.
//!
//! - [`database`] - Document store abstraction layer (trait-based) and the
//!   in-memory store
//! - [`cosmosdb`] - Azure Cosmos DB implementation
//!
//! # Design Pattern
//!
//! Adapters follow the **Adapter Pattern** to isolate the Cosmos DB SDK and
//! enable testing against the in-memory store. Pipelines only ever see
//! `Arc<dyn DocumentStore>`.
//!
//! ```rust,no_run
//! use ferry::adapters::database::create_document_store;
//! use ferry::config::{CosmosAccount, CosmosDbConfig};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let account = CosmosAccount::parse(
//!     "AccountEndpoint=https://localhost:8081/;AccountKey=C2y6yDjf5/R+ob0N8A7Cgv30VRDJIWEHLM+4QDU5DE2nQ9nDuVTqobD4b8mGGyPMbIZnqyMsEcaGQy67XIw/Jw==;",
//! )?;
//! let store = create_document_store(&account, true, &CosmosDbConfig::default())?;
//! let databases = store.list_databases().await?;
//! # Ok(())
//! # }
//! ```

pub mod cosmosdb;
pub mod database;
