//! Domain models and types for Ferry.
//!
//! # Overview
//!
//! The domain layer provides:
//! - **Records** ([`Record`], [`Batch`]) - schema-free JSON documents
//! - **Identifiers** ([`DocumentId`]) - validated document ids
//! - **Error types** ([`FerryError`], [`CosmosDbError`])
//! - **Result type alias** ([`Result`])
//!
//! # Error Handling
//!
//! All fallible operations return [`Result<T, FerryError>`]:
//!
//! ```rust
//! use ferry::domain::{FerryError, Result};
//!
//! fn example() -> Result<()> {
//!     Err(FerryError::Validation("missing id".to_string()))
//! }
//! ```

pub mod errors;
pub mod ids;
pub mod record;
pub mod result;

// Re-export commonly used types for convenience
pub use errors::{CosmosDbError, FerryError};
pub use ids::{ContainerPath, DocumentId};
pub use record::{record_id, Batch, Record, ID_FIELD};
pub use result::Result;
