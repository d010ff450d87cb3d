//! CLI command implementations
//!
//! Every command returns the process exit code:
//!
//! | Code | Meaning |
//! |---|---|
//! | 0 | success |
//! | 1 | transfer finished with item failures |
//! | 2 | configuration error |
//! | 4 | client construction error |
//! | 5 | fatal error |

pub mod delete;
pub mod export;
pub mod list;
pub mod upload;

use crate::adapters::database::{create_document_store, DocumentStore};
use crate::cli::{ConnectionArgs, ContainerArgs};
use crate::config::{CosmosAccount, FerryConfig};
use crate::core::transfer::{ProgressHook, TransferSummary};
use crate::domain::ContainerPath;
use std::sync::Arc;

/// Success
pub const EXIT_SUCCESS: i32 = 0;
/// Transfer completed with item failures
pub const EXIT_PARTIAL: i32 = 1;
/// Configuration error
pub const EXIT_CONFIG: i32 = 2;
/// Connection or client construction error
pub const EXIT_CONNECTION: i32 = 4;
/// Fatal error
pub const EXIT_FATAL: i32 = 5;

const MAX_LISTED_FAILURES: usize = 10;

/// Parse the account connection string, reporting failures as a config error
pub(crate) fn parse_account(connection: &ConnectionArgs) -> Result<CosmosAccount, i32> {
    CosmosAccount::parse(&connection.account).map_err(|e| {
        tracing::error!(error = %e, "Invalid account connection string");
        eprintln!("Invalid account connection string: {e}");
        EXIT_CONFIG
    })
}

/// Validate the database and container names
pub(crate) fn container_path(target: &ContainerArgs) -> Result<ContainerPath, i32> {
    ContainerPath::new(&target.database, &target.container).map_err(|e| {
        tracing::error!(error = %e, "Invalid container name");
        eprintln!("Configuration error: {e}");
        EXIT_CONFIG
    })
}

/// Create the Cosmos DB backed store for a command
pub(crate) fn connect(
    connection: &ConnectionArgs,
    config: &FerryConfig,
) -> Result<Arc<dyn DocumentStore>, i32> {
    let account = parse_account(connection)?;

    create_document_store(&account, connection.allow_self_signed, &config.cosmosdb).map_err(|e| {
        tracing::error!(error = %e, "Failed to create Cosmos DB client");
        eprintln!("Failed to connect to Cosmos DB: {e}");
        EXIT_CONNECTION
    })
}

/// Progress hook printing one line per settled batch
pub(crate) fn print_progress() -> ProgressHook {
    Box::new(|report| println!("{}", report.progress_line()))
}

/// Print a transfer summary and map it to an exit code
pub(crate) fn report_summary(title: &str, summary: &TransferSummary) -> i32 {
    println!();
    println!("📊 {title} Summary:");
    println!("  Batches: {}", summary.batches);
    println!("  Total Documents: {}", summary.total_items);
    println!("  Successful: {}", summary.succeeded);
    println!("  Failed: {}", summary.failed);
    if summary.skipped > 0 {
        println!("  Skipped Files: {}", summary.skipped);
    }
    println!("  Duration: {:.2}s", summary.duration.as_secs_f64());
    println!("  Success Rate: {:.2}%", summary.success_rate());
    println!();

    if !summary.failures.is_empty() {
        println!("⚠️  Failures:");
        for failure in summary.failures.iter().take(MAX_LISTED_FAILURES) {
            println!("  - {} ({}): {}", failure.key, failure.kind, failure.reason);
        }
        if summary.failures.len() > MAX_LISTED_FAILURES {
            println!(
                "  ... and {} more failures",
                summary.failures.len() - MAX_LISTED_FAILURES
            );
        }
        println!();
    }

    exit_code(summary, title)
}

fn exit_code(summary: &TransferSummary, title: &str) -> i32 {
    if summary.is_successful() {
        println!("✅ {title} completed successfully!");
        EXIT_SUCCESS
    } else {
        println!("⚠️  {title} completed with failures");
        EXIT_PARTIAL
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::transfer::{
        BatchReport, FailureKind, ItemFailure, TransferDirection, TransferOutcome,
    };
    use std::time::Duration;

    #[test]
    fn test_exit_code_for_summary() {
        let mut summary = TransferSummary::new(TransferDirection::Export);
        assert_eq!(report_summary("Export", &summary), EXIT_SUCCESS);

        summary.record_batch(&BatchReport::new(
            1,
            vec![TransferOutcome::Failure(ItemFailure::new(
                "a.json",
                FailureKind::Codec,
                "invalid JSON",
            ))],
            Duration::ZERO,
        ));
        assert_eq!(report_summary("Export", &summary), EXIT_PARTIAL);
    }

    #[test]
    fn test_invalid_account_is_config_error() {
        let connection = ConnectionArgs {
            account: "not a connection string".to_string(),
            allow_self_signed: false,
        };
        assert_eq!(parse_account(&connection).unwrap_err(), EXIT_CONFIG);
    }

    #[test]
    fn test_empty_container_name_is_config_error() {
        let target = ContainerArgs {
            database: "db1".to_string(),
            container: " ".to_string(),
        };
        assert_eq!(container_path(&target).unwrap_err(), EXIT_CONFIG);
    }
}
