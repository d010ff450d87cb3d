//! Configuration management for Ferry.
//!
//! Ferry is driven by command-line options. An optional TOML file tunes the
//! transfer pipeline and logging, with support for:
//! - Environment variable substitution (`${VAR_NAME}`)
//! - `FERRY_*` environment overrides
//! - Default values for every setting
//! - Validation on load
//!
//! # Example Configuration
//!
//! ```toml
//! [transfer]
//! max_concurrency = 64
//! batch_size = 100
//! default_encoding = "utf8"
//!
//! [cosmosdb]
//! request_timeout_seconds = 60
//!
//! [logging]
//! local_enabled = true
//! local_path = "${HOME}/.ferry/logs"
//! local_rotation = "daily"
//! ```
//!
//! The Cosmos DB account itself is supplied as a connection string through
//! `--account` or `FERRY_ACCOUNT` and parsed by [`CosmosAccount`].

pub mod account;
pub mod loader;
pub mod schema;
pub mod secret;

// Re-export commonly used types
pub use account::{CosmosAccount, TransportConfig};
pub use loader::{load_config, resolve_config};
pub use schema::{CosmosDbConfig, FerryConfig, LoggingConfig, TransferConfig};
pub use secret::{secret_string, SecretString, SecretValue};
