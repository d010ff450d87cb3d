//! Cosmos DB account connection settings
//!
//! The `--account` option carries a Cosmos DB connection string as shown in the
//! Azure portal or by the emulator:
//!
//! ```text
//! AccountEndpoint=https://localhost:8081/;AccountKey=C2y6yDjf5/R+ob0N8A7Cgv30VRDJIWEHLM+4QDU5DE2nQ9nDuVTqobD4b8mGGyPMbIZnqyMsEcaGQy67XIw/Jw==;
//! ```
//!
//! Parsing produces a [`CosmosAccount`] whose key is held as a secret. TLS
//! trust is a separate [`TransportConfig`] value handed to the client that
//! needs it, instead of a process-wide switch.

use super::secret::{secret_string, SecretString};
use crate::domain::{FerryError, Result};
use base64::{engine::general_purpose, Engine as _};
use secrecy::ExposeSecret;
use std::fmt;
use std::str::FromStr;
use url::Url;

/// Parsed Cosmos DB connection string
#[derive(Clone)]
pub struct CosmosAccount {
    /// Account endpoint URL
    pub endpoint: String,

    /// Account master key
    pub key: SecretString,
}

impl CosmosAccount {
    /// Parse a `AccountEndpoint=...;AccountKey=...;` connection string
    ///
    /// Segment names are matched case-insensitively, unknown segments are
    /// ignored and values may themselves contain `=` (base64 padding).
    ///
    /// # Errors
    ///
    /// Returns a configuration error if either segment is missing, the
    /// endpoint is not an http(s) URL, or the key is not valid base64.
    pub fn parse(connection_string: &str) -> Result<Self> {
        let mut endpoint = None;
        let mut key = None;

        for segment in connection_string.split(';') {
            let segment = segment.trim();
            if segment.is_empty() {
                continue;
            }

            let Some((name, value)) = segment.split_once('=') else {
                return Err(FerryError::Configuration(format!(
                    "Malformed connection string segment without '=': {}",
                    redact_segment(segment)
                )));
            };

            match name.trim().to_ascii_lowercase().as_str() {
                "accountendpoint" => endpoint = Some(value.trim().to_string()),
                "accountkey" => key = Some(value.trim().to_string()),
                other => {
                    tracing::debug!(segment = other, "Ignoring connection string segment");
                }
            }
        }

        let endpoint = endpoint.ok_or_else(|| {
            FerryError::Configuration("Connection string is missing AccountEndpoint".to_string())
        })?;
        let key = key.ok_or_else(|| {
            FerryError::Configuration("Connection string is missing AccountKey".to_string())
        })?;

        validate_endpoint(&endpoint)?;
        validate_key(&key)?;

        Ok(Self {
            endpoint,
            key: secret_string(key),
        })
    }

    /// Account key as a plain string, for handing to the SDK
    pub fn expose_key(&self) -> String {
        self.key.expose_secret().as_ref().to_string()
    }
}

impl FromStr for CosmosAccount {
    type Err = FerryError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Debug for CosmosAccount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CosmosAccount")
            .field("endpoint", &self.endpoint)
            .field("key", &"[REDACTED]")
            .finish()
    }
}

fn validate_endpoint(endpoint: &str) -> Result<()> {
    let url = Url::parse(endpoint).map_err(|e| {
        FerryError::Configuration(format!("Invalid AccountEndpoint '{endpoint}': {e}"))
    })?;

    if url.scheme() != "https" && url.scheme() != "http" {
        return Err(FerryError::Configuration(format!(
            "AccountEndpoint must start with https:// or http://, got '{endpoint}'"
        )));
    }

    Ok(())
}

fn validate_key(key: &str) -> Result<()> {
    if key.is_empty() {
        return Err(FerryError::Configuration(
            "AccountKey cannot be empty".to_string(),
        ));
    }

    general_purpose::STANDARD.decode(key).map_err(|e| {
        FerryError::Configuration(format!("AccountKey is not valid base64: {e}"))
    })?;

    Ok(())
}

/// Keep the segment name but never echo a value that might be a key
fn redact_segment(segment: &str) -> String {
    let visible: String = segment.chars().take(16).collect();
    if segment.chars().count() > 16 {
        format!("{visible}...")
    } else {
        visible
    }
}

/// Transport settings for one Cosmos DB client instance
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TransportConfig {
    /// Accept self-signed or otherwise untrusted server certificates.
    ///
    /// **SECURITY WARNING**: this disables certificate validation for every
    /// request made by the client it is given to, which exposes the session to
    /// man-in-the-middle attacks. Intended for the local Cosmos DB emulator.
    pub allow_self_signed: bool,

    /// Per-request timeout in seconds
    pub request_timeout_seconds: u64,
}

impl TransportConfig {
    /// Create transport settings
    pub fn new(allow_self_signed: bool, request_timeout_seconds: u64) -> Self {
        Self {
            allow_self_signed,
            request_timeout_seconds,
        }
    }
}
