//! Batch transfer engine
//!
//! Runs one worker invocation per item of a batch, concurrently, and waits for
//! all of them to settle before returning. Batches themselves are driven one
//! after another by the export and upload pipelines.

use super::outcome::{BatchReport, FailureKind, ItemFailure, TransferOutcome};
use crate::{log_batch_complete, log_item_failure};
use futures::stream::{self, StreamExt};
use std::future::Future;
use std::time::Instant;

/// Fan-out/fan-in executor for one batch at a time
#[derive(Debug, Clone)]
pub struct BatchEngine {
    max_concurrency: usize,
}

impl BatchEngine {
    /// Create an engine running at most `max_concurrency` items at once
    pub fn new(max_concurrency: usize) -> Self {
        Self {
            max_concurrency: max_concurrency.max(1),
        }
    }

    /// Maximum number of items in flight
    pub fn max_concurrency(&self) -> usize {
        self.max_concurrency
    }

    /// Run `worker` over every item of the batch
    ///
    /// The worker returns the item key on success or an [`ItemFailure`].
    /// Items complete in any order. A failing item never cancels its siblings
    /// and the returned report holds exactly one outcome per input item.
    /// Failed items are not retried.
    pub async fn run_batch<T, W, Fut>(
        &self,
        batch_number: usize,
        items: Vec<T>,
        worker: W,
    ) -> BatchReport
    where
        W: Fn(T) -> Fut,
        Fut: Future<Output = Result<String, ItemFailure>>,
    {
        let started = Instant::now();
        let batch_size = items.len();

        tracing::debug!(
            batch = batch_number,
            batch_size,
            max_concurrency = self.max_concurrency,
            "Launching batch"
        );

        let outcomes: Vec<TransferOutcome> = stream::iter(items)
            .map(&worker)
            .buffer_unordered(self.max_concurrency)
            .map(|result| {
                let outcome = TransferOutcome::from(result);
                if let TransferOutcome::Failure(failure) = &outcome {
                    report_failure(batch_number, failure);
                }
                outcome
            })
            .collect()
            .await;

        let report = BatchReport::new(batch_number, outcomes, started.elapsed());
        log_batch_complete!(report);
        report
    }
}

impl Default for BatchEngine {
    fn default() -> Self {
        Self::new(64)
    }
}

fn report_failure(batch_number: usize, failure: &ItemFailure) {
    match failure.kind {
        FailureKind::Write => {
            tracing::error!(
                batch = batch_number,
                key = %failure.key,
                kind = %failure.kind,
                reason = %failure.reason,
                "Item transfer failed"
            );
        }
        FailureKind::Codec | FailureKind::MissingId => {
            log_item_failure!(batch_number, failure);
        }
    }
}
