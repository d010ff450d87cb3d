//! Bulk transfer machinery shared by export and upload
//!
//! - [`cursor`] - pagination over a store listing
//! - [`engine`] - bounded concurrent execution of one batch
//! - [`outcome`] - typed per-item results
//! - [`summary`] - per-run aggregation

pub mod cursor;
pub mod engine;
pub mod outcome;
pub mod summary;

pub use cursor::{PageCursor, PageStream};
pub use engine::BatchEngine;
pub use outcome::{BatchReport, FailureKind, ItemFailure, ProgressHook, TransferOutcome};
pub use summary::{TransferDirection, TransferSummary};
