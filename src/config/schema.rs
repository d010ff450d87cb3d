//! Configuration schema types
//!
//! Every section is optional in the TOML file; missing values fall back to the
//! defaults below, so an absent configuration file behaves like an empty one.

use crate::core::codec::TextEncoding;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Main Ferry configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FerryConfig {
    /// Transfer pipeline settings
    #[serde(default)]
    pub transfer: TransferConfig,

    /// Azure Cosmos DB client settings
    #[serde(default)]
    pub cosmosdb: CosmosDbConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl FerryConfig {
    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid
    pub fn validate(&self) -> Result<(), String> {
        self.transfer.validate()?;
        self.cosmosdb.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}

/// Transfer pipeline configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransferConfig {
    /// Maximum number of item operations in flight within one batch
    #[serde(default = "default_max_concurrency")]
    pub max_concurrency: usize,

    /// Number of source files grouped into one upload batch
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,

    /// Text encoding used for upload source files when `--encoding` is not given
    #[serde(default = "default_encoding")]
    pub default_encoding: String,
}

impl TransferConfig {
    fn validate(&self) -> Result<(), String> {
        if self.max_concurrency == 0 || self.max_concurrency > 1024 {
            return Err(format!(
                "transfer.max_concurrency must be between 1 and 1024, got {}",
                self.max_concurrency
            ));
        }

        if self.batch_size == 0 || self.batch_size > 10_000 {
            return Err(format!(
                "transfer.batch_size must be between 1 and 10000, got {}",
                self.batch_size
            ));
        }

        TextEncoding::from_str(&self.default_encoding)
            .map_err(|e| format!("transfer.default_encoding: {e}"))?;

        Ok(())
    }
}

impl Default for TransferConfig {
    fn default() -> Self {
        Self {
            max_concurrency: default_max_concurrency(),
            batch_size: default_batch_size(),
            default_encoding: default_encoding(),
        }
    }
}

/// Azure Cosmos DB client configuration
///
/// Account endpoint and key come from the `--account` connection string and
/// are deliberately not part of the file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CosmosDbConfig {
    /// Request timeout in seconds
    #[serde(default = "default_request_timeout_seconds")]
    pub request_timeout_seconds: u64,

    /// Documents requested per page when reading a container
    #[serde(default = "default_page_size")]
    pub page_size: usize,
}

impl CosmosDbConfig {
    fn validate(&self) -> Result<(), String> {
        if self.request_timeout_seconds == 0 {
            return Err("cosmosdb.request_timeout_seconds must be > 0".to_string());
        }
        if self.page_size == 0 || self.page_size > 1000 {
            return Err(format!(
                "cosmosdb.page_size must be between 1 and 1000, got {}",
                self.page_size
            ));
        }
        Ok(())
    }
}

impl Default for CosmosDbConfig {
    fn default() -> Self {
        Self {
            request_timeout_seconds: default_request_timeout_seconds(),
            page_size: default_page_size(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Enable local JSON file logging
    #[serde(default)]
    pub local_enabled: bool,

    /// Local log directory
    #[serde(default = "default_local_path")]
    pub local_path: String,

    /// Log rotation strategy (daily, hourly, never)
    #[serde(default = "default_local_rotation")]
    pub local_rotation: String,
}

impl LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_rotations = ["daily", "hourly", "never"];
        if !valid_rotations.contains(&self.local_rotation.as_str()) {
            return Err(format!(
                "Invalid logging.local_rotation '{}'. Must be one of: {}",
                self.local_rotation,
                valid_rotations.join(", ")
            ));
        }

        if self.local_enabled && self.local_path.trim().is_empty() {
            return Err(
                "logging.local_path cannot be empty when local logging is enabled".to_string(),
            );
        }

        Ok(())
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            local_enabled: false,
            local_path: default_local_path(),
            local_rotation: default_local_rotation(),
        }
    }
}

// Default value functions
fn default_max_concurrency() -> usize {
    64
}

fn default_batch_size() -> usize {
    100
}

fn default_encoding() -> String {
    "utf8".to_string()
}

fn default_request_timeout_seconds() -> u64 {
    60
}

fn default_page_size() -> usize {
    100
}

fn default_local_path() -> String {
    "logs".to_string()
}

fn default_local_rotation() -> String {
    "daily".to_string()
}
