//! Per-item transfer outcomes
//!
//! Every item handed to the batch engine produces exactly one
//! [`TransferOutcome`]. Failures are values, not errors: they are logged,
//! counted and reported but never abort a batch or a run.

use std::fmt;
use std::time::Duration;

/// Where a per-item failure happened
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureKind {
    /// Decode, parse or serialize error
    Codec,
    /// Record has no usable `id`
    MissingId,
    /// Writing the file or inserting the document failed
    Write,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FailureKind::Codec => "codec",
            FailureKind::MissingId => "missing_id",
            FailureKind::Write => "write",
        };
        f.write_str(name)
    }
}

/// A failed item with enough context to diagnose it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemFailure {
    /// Document id or source file name
    pub key: String,

    /// Failure site
    pub kind: FailureKind,

    /// Human-readable reason
    pub reason: String,
}

impl ItemFailure {
    /// Create a new item failure
    pub fn new(key: impl Into<String>, kind: FailureKind, reason: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            kind,
            reason: reason.into(),
        }
    }
}

impl fmt::Display for ItemFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}): {}", self.key, self.kind, self.reason)
    }
}

/// Result of transferring one item
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransferOutcome {
    /// The item reached its destination; carries the document id or file name
    Success { key: String },
    /// The item was skipped
    Failure(ItemFailure),
}

impl TransferOutcome {
    /// Key of the item this outcome belongs to
    pub fn key(&self) -> &str {
        match self {
            TransferOutcome::Success { key } => key,
            TransferOutcome::Failure(failure) => &failure.key,
        }
    }

    /// True for [`TransferOutcome::Success`]
    pub fn is_success(&self) -> bool {
        matches!(self, TransferOutcome::Success { .. })
    }
}

impl From<Result<String, ItemFailure>> for TransferOutcome {
    fn from(result: Result<String, ItemFailure>) -> Self {
        match result {
            Ok(key) => TransferOutcome::Success { key },
            Err(failure) => TransferOutcome::Failure(failure),
        }
    }
}

/// Outcomes of one settled batch
#[derive(Debug, Clone)]
pub struct BatchReport {
    /// 1-based position of the batch in the run
    pub batch_number: usize,

    /// One outcome per input item, in completion order
    pub outcomes: Vec<TransferOutcome>,

    /// Time from launch until the last item settled
    pub duration: Duration,
}

impl BatchReport {
    /// Create a batch report
    pub fn new(batch_number: usize, outcomes: Vec<TransferOutcome>, duration: Duration) -> Self {
        Self {
            batch_number,
            outcomes,
            duration,
        }
    }

    /// Number of items in the batch
    pub fn size(&self) -> usize {
        self.outcomes.len()
    }

    /// Number of items that succeeded
    pub fn succeeded(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_success()).count()
    }

    /// Number of items that failed
    pub fn failed(&self) -> usize {
        self.size() - self.succeeded()
    }

    /// Failures in this batch
    pub fn failures(&self) -> impl Iterator<Item = &ItemFailure> {
        self.outcomes.iter().filter_map(|o| match o {
            TransferOutcome::Failure(failure) => Some(failure),
            TransferOutcome::Success { .. } => None,
        })
    }

    /// Human-readable progress line
    pub fn progress_line(&self) -> String {
        if self.failed() == 0 {
            format!(
                "Batch {} complete: {} documents transferred",
                self.batch_number,
                self.succeeded()
            )
        } else {
            format!(
                "Batch {} complete: {} of {} documents transferred, {} failed",
                self.batch_number,
                self.succeeded(),
                self.size(),
                self.failed()
            )
        }
    }
}

/// Callback invoked after every settled batch
pub type ProgressHook = Box<dyn Fn(&BatchReport) + Send + Sync>;

#[cfg(test)]
mod tests {
    use super::*;

    fn report() -> BatchReport {
        BatchReport::new(
            3,
            vec![
                TransferOutcome::Success {
                    key: "a".to_string(),
                },
                TransferOutcome::Failure(ItemFailure::new("b", FailureKind::Write, "disk full")),
                TransferOutcome::Success {
                    key: "c".to_string(),
                },
            ],
            Duration::from_millis(5),
        )
    }

    #[test]
    fn test_batch_report_counts() {
        let report = report();
        assert_eq!(report.size(), 3);
        assert_eq!(report.succeeded(), 2);
        assert_eq!(report.failed(), 1);
        assert_eq!(report.failures().next().unwrap().key, "b");
    }

    #[test]
    fn test_progress_line() {
        assert_eq!(
            report().progress_line(),
            "Batch 3 complete: 2 of 3 documents transferred, 1 failed"
        );

        let clean = BatchReport::new(1, Vec::new(), Duration::ZERO);
        assert_eq!(
            clean.progress_line(),
            "Batch 1 complete: 0 documents transferred"
        );
    }

    #[test]
    fn test_outcome_from_result() {
        let ok: TransferOutcome = Ok::<_, ItemFailure>("a".to_string()).into();
        assert!(ok.is_success());
        assert_eq!(ok.key(), "a");

        let failed: TransferOutcome =
            Err(ItemFailure::new("b.json", FailureKind::Codec, "bad")).into();
        assert!(!failed.is_success());
        assert_eq!(failed.key(), "b.json");
    }

    #[test]
    fn test_item_failure_display() {
        let failure = ItemFailure::new("x", FailureKind::MissingId, "no id");
        assert_eq!(failure.to_string(), "x (missing_id): no id");
    }
}
