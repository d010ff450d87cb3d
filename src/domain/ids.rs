//! Document and container identifier types with validation
//!
//! The `id` field of a Cosmos DB document doubles as the partition key of the
//! containers Ferry creates and as the filename stem of an exported document,
//! so it is validated once here and carried as a newtype afterwards.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Characters Cosmos DB rejects in a document id. Each of them would also
/// change the meaning of `<id>.json` when used as a path.
const FORBIDDEN_CHARS: [char; 4] = ['/', '\\', '?', '#'];

/// Document identifier newtype wrapper
///
/// # Examples
///
/// ```
/// use ferry::domain::ids::DocumentId;
/// use std::str::FromStr;
///
/// let id = DocumentId::from_str("customer-42").unwrap();
/// assert_eq!(id.file_name(), "customer-42.json");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DocumentId(String);

impl DocumentId {
    /// Creates a new DocumentId from a string
    ///
    /// # Arguments
    ///
    /// * `id` - The document identifier string
    ///
    /// # Returns
    ///
    /// Returns `Ok(DocumentId)` if the ID is valid, `Err` otherwise
    pub fn new(id: impl Into<String>) -> Result<Self, String> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err("Document ID cannot be empty".to_string());
        }

        if let Some(c) = id.chars().find(|c| FORBIDDEN_CHARS.contains(c)) {
            return Err(format!(
                "Document ID '{id}' contains forbidden character '{c}'"
            ));
        }

        if id == "." || id == ".." {
            return Err(format!("Document ID '{id}' is not a valid file name"));
        }

        Ok(Self(id))
    }

    /// Returns the document ID as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes self and returns the inner String
    pub fn into_inner(self) -> String {
        self.0
    }

    /// File name used for the exported copy of this document
    pub fn file_name(&self) -> String {
        format!("{}.json", self.0)
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for DocumentId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl AsRef<str> for DocumentId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A container addressed by database and container name
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ContainerPath {
    /// Database name
    pub database: String,

    /// Container name
    pub container: String,
}

impl ContainerPath {
    /// Creates a container path, rejecting empty names
    pub fn new(database: impl Into<String>, container: impl Into<String>) -> Result<Self, String> {
        let database = database.into();
        let container = container.into();
        if database.trim().is_empty() {
            return Err("Database name cannot be empty".to_string());
        }
        if container.trim().is_empty() {
            return Err("Container name cannot be empty".to_string());
        }
        Ok(Self {
            database,
            container,
        })
    }
}

impl fmt::Display for ContainerPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.database, self.container)
    }
}
