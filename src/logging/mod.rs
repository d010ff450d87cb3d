//! Logging and observability
//!
//! This module provides structured logging with support for:
//! - Console output on stderr (stdout is reserved for tables and progress)
//! - Configurable log levels
//! - Local JSON file logging with rotation
//!
//! # Example
//!
//! ```no_run
//! use ferry::logging::init_logging;
//! use ferry::config::LoggingConfig;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//!
//! // Use tracing macros for logging
//! tracing::info!("Application started");
//! ```

pub mod structured;

// Re-export commonly used items
pub use structured::{init_logging, LoggingGuard};

/// Log the start of a transfer run
///
/// # Example
///
/// ```no_run
/// use ferry::log_transfer_start;
///
/// log_transfer_start!("export", "db1/c1", "output");
/// ```
#[macro_export]
macro_rules! log_transfer_start {
    ($direction:expr, $container:expr, $directory:expr) => {
        tracing::info!(
            direction = $direction,
            container = %$container,
            directory = %$directory,
            "Starting transfer"
        );
    };
}

/// Log a settled batch
///
/// Takes a [`crate::core::transfer::BatchReport`].
#[macro_export]
macro_rules! log_batch_complete {
    ($report:expr) => {
        tracing::info!(
            batch = $report.batch_number,
            batch_size = $report.size(),
            succeeded = $report.succeeded(),
            failed = $report.failed(),
            duration_ms = $report.duration.as_millis() as u64,
            "{}",
            $report.progress_line()
        );
    };
}

/// Log a skipped item
///
/// Takes a batch number and a [`crate::core::transfer::ItemFailure`].
#[macro_export]
macro_rules! log_item_failure {
    ($batch:expr, $failure:expr) => {
        tracing::warn!(
            batch = $batch,
            key = %$failure.key,
            kind = %$failure.kind,
            reason = %$failure.reason,
            "Skipping item"
        );
    };
}
