//! Pagination cursor
//!
//! Wraps a store's paged listing as a lazy sequence of batches. The cursor
//! performs no transformation; each call to [`PageCursor::fetch_next`] is one
//! round trip to the store.

use crate::domain::{Batch, FerryError, Result};
use futures::stream::{self, BoxStream, StreamExt};

/// Stream of pages produced by a [`crate::adapters::database::DocumentStore`]
pub type PageStream = BoxStream<'static, Result<Batch>>;

/// Continuation state over one paginated listing
///
/// Created once per transfer run and advanced until exhausted. A page may be
/// empty without the listing being finished; only [`PageCursor::has_more`]
/// signals exhaustion.
pub struct PageCursor {
    pages: PageStream,
    exhausted: bool,
    pages_fetched: usize,
    records_fetched: usize,
}

impl PageCursor {
    /// Wrap a page stream
    pub fn new(pages: PageStream) -> Self {
        Self {
            pages,
            exhausted: false,
            pages_fetched: 0,
            records_fetched: 0,
        }
    }

    /// Cursor over pages that are already in memory
    pub fn from_pages(pages: Vec<Batch>) -> Self {
        Self::new(stream::iter(pages.into_iter().map(Ok)).boxed())
    }

    /// Whether another fetch may return records
    pub fn has_more(&self) -> bool {
        !self.exhausted
    }

    /// Fetch the next page
    ///
    /// Returns an empty batch when the listing ends, after which
    /// [`PageCursor::has_more`] is false. Store errors are returned as is and
    /// also end the cursor.
    ///
    /// # Errors
    ///
    /// Returns an error if the store fails or the cursor is already exhausted.
    pub async fn fetch_next(&mut self) -> Result<Batch> {
        if self.exhausted {
            return Err(FerryError::Transfer(
                "Pagination cursor is exhausted and cannot be reused".to_string(),
            ));
        }

        match self.pages.next().await {
            Some(Ok(batch)) => {
                self.pages_fetched += 1;
                self.records_fetched += batch.len();
                tracing::debug!(
                    page = self.pages_fetched,
                    records = batch.len(),
                    "Fetched page"
                );
                Ok(batch)
            }
            Some(Err(e)) => {
                self.exhausted = true;
                Err(e)
            }
            None => {
                self.exhausted = true;
                Ok(Batch::new())
            }
        }
    }

    /// Number of pages fetched so far
    pub fn pages_fetched(&self) -> usize {
        self.pages_fetched
    }

    /// Number of records fetched so far
    pub fn records_fetched(&self) -> usize {
        self.records_fetched
    }
}
