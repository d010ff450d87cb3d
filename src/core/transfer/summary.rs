//! Transfer summary and reporting
//!
//! Aggregates the batch reports of one export or upload run.

use super::outcome::{BatchReport, FailureKind, ItemFailure};
use std::time::Duration;

/// Direction of a transfer run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferDirection {
    /// Cosmos DB container to local directory
    Export,
    /// Local directory to Cosmos DB container
    Upload,
}

impl TransferDirection {
    /// Lowercase name used in log fields
    pub fn as_str(&self) -> &'static str {
        match self {
            TransferDirection::Export => "export",
            TransferDirection::Upload => "upload",
        }
    }
}

/// Summary of a transfer run
#[derive(Debug, Clone)]
pub struct TransferSummary {
    /// Direction of the run
    pub direction: TransferDirection,

    /// Number of batches processed
    pub batches: usize,

    /// Number of items handed to the engine
    pub total_items: usize,

    /// Number of items transferred
    pub succeeded: usize,

    /// Number of failed items
    pub failed: usize,

    /// Source files skipped because they are not record files
    pub skipped: usize,

    /// Duration of the run
    pub duration: Duration,

    /// Every failure, in the order batches settled
    pub failures: Vec<ItemFailure>,

    /// True when the run only simulated writes
    pub dry_run: bool,
}

impl TransferSummary {
    /// Create a new empty summary
    pub fn new(direction: TransferDirection) -> Self {
        Self {
            direction,
            batches: 0,
            total_items: 0,
            succeeded: 0,
            failed: 0,
            skipped: 0,
            duration: Duration::from_secs(0),
            failures: Vec::new(),
            dry_run: false,
        }
    }

    /// Set the duration
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    /// Fold a settled batch into the summary
    pub fn record_batch(&mut self, report: &BatchReport) {
        self.batches += 1;
        self.total_items += report.size();
        self.succeeded += report.succeeded();
        self.failed += report.failed();
        self.failures.extend(report.failures().cloned());
    }

    /// Count a skipped source file
    pub fn record_skipped(&mut self) {
        self.skipped += 1;
    }

    /// Check if every item was transferred
    pub fn is_successful(&self) -> bool {
        self.failed == 0
    }

    /// Number of failures of the given kind
    pub fn failures_of(&self, kind: FailureKind) -> usize {
        self.failures.iter().filter(|f| f.kind == kind).count()
    }

    /// Get success rate as a percentage
    pub fn success_rate(&self) -> f64 {
        if self.total_items == 0 {
            return 100.0;
        }
        (self.succeeded as f64 / self.total_items as f64) * 100.0
    }

    /// Log the summary
    pub fn log_summary(&self) {
        tracing::info!(
            direction = self.direction.as_str(),
            batches = self.batches,
            total = self.total_items,
            successful = self.succeeded,
            failed = self.failed,
            skipped = self.skipped,
            dry_run = self.dry_run,
            duration_ms = self.duration.as_millis() as u64,
            success_rate = format!("{:.2}%", self.success_rate()),
            "Transfer completed"
        );

        if !self.failures.is_empty() {
            tracing::warn!(
                failure_count = self.failures.len(),
                codec = self.failures_of(FailureKind::Codec),
                missing_id = self.failures_of(FailureKind::MissingId),
                write = self.failures_of(FailureKind::Write),
                "Transfer completed with failures"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::transfer::TransferOutcome;

    fn report(batch_number: usize, ok: usize, failed: usize) -> BatchReport {
        let mut outcomes: Vec<TransferOutcome> = (0..ok)
            .map(|n| TransferOutcome::Success {
                key: format!("ok-{batch_number}-{n}"),
            })
            .collect();
        outcomes.extend((0..failed).map(|n| {
            TransferOutcome::Failure(ItemFailure::new(
                format!("bad-{batch_number}-{n}"),
                FailureKind::Codec,
                "invalid JSON",
            ))
        }));
        BatchReport::new(batch_number, outcomes, Duration::from_millis(1))
    }

    #[test]
    fn test_summary_creation() {
        let summary = TransferSummary::new(TransferDirection::Export);

        assert_eq!(summary.batches, 0);
        assert_eq!(summary.total_items, 0);
        assert_eq!(summary.duration, Duration::from_secs(0));
        assert!(summary.failures.is_empty());
        assert!(summary.is_successful());
    }

    #[test]
    fn test_record_batches() {
        let mut summary = TransferSummary::new(TransferDirection::Upload);
        summary.record_batch(&report(1, 3, 0));
        summary.record_batch(&report(2, 1, 2));
        summary.record_skipped();

        assert_eq!(summary.batches, 2);
        assert_eq!(summary.total_items, 6);
        assert_eq!(summary.succeeded, 4);
        assert_eq!(summary.failed, 2);
        assert_eq!(summary.skipped, 1);
        assert_eq!(summary.failures_of(FailureKind::Codec), 2);
        assert_eq!(summary.failures_of(FailureKind::Write), 0);
        assert!(!summary.is_successful());
    }

    #[test]
    fn test_success_rate() {
        let mut summary = TransferSummary::new(TransferDirection::Export);
        assert_eq!(summary.success_rate(), 100.0);

        summary.record_batch(&report(1, 3, 1));
        assert_eq!(summary.success_rate(), 75.0);
    }

    #[test]
    fn test_with_duration() {
        let summary =
            TransferSummary::new(TransferDirection::Export).with_duration(Duration::from_secs(3));
        assert_eq!(summary.duration, Duration::from_secs(3));
    }
}
