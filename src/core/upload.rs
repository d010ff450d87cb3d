//! Upload pipeline - directory to container
//!
//! Reads every `.json` file of a source directory and inserts it as one
//! document, partitioned by its `id`. Files are taken in name order and
//! processed in batches of `batch_size`.

use crate::adapters::database::DocumentStore;
use crate::core::codec::{self, TextEncoding};
use crate::core::destination::prepare_collection;
use crate::core::transfer::{
    BatchEngine, FailureKind, ItemFailure, ProgressHook, TransferDirection, TransferSummary,
};
use crate::domain::{record_id, ContainerPath, FerryError, Result};
use crate::log_transfer_start;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

/// Source directory contents, split into record files and skipped entries
#[derive(Debug, Default)]
pub struct SourceListing {
    /// Files with the record extension, sorted by name
    pub records: Vec<PathBuf>,

    /// Entries that are not record files
    pub skipped: Vec<PathBuf>,
}

/// List a source directory
///
/// Entries without a `.json` extension and anything that is not a regular
/// file are skipped with a warning. Symlinks are resolved, so a link to a
/// `.json` file is uploaded and a dangling link is skipped.
///
/// # Errors
///
/// Returns an error if the directory cannot be read.
pub async fn list_source(source: &Path) -> Result<SourceListing> {
    let mut entries = tokio::fs::read_dir(source).await.map_err(|e| {
        FerryError::Transfer(format!(
            "Failed to read source directory {}: {e}",
            source.display()
        ))
    })?;

    let mut listing = SourceListing::default();
    while let Some(entry) = entries.next_entry().await.map_err(|e| {
        FerryError::Transfer(format!(
            "Failed to list source directory {}: {e}",
            source.display()
        ))
    })? {
        let path = entry.path();
        // metadata follows symlinks
        let is_file = tokio::fs::metadata(&path)
            .await
            .map(|metadata| metadata.is_file())
            .unwrap_or(false);

        if !is_file {
            tracing::warn!(
                file = %codec::display_name(&path),
                "The entry is not a regular file. It will be skipped"
            );
            listing.skipped.push(path);
        } else if !codec::is_record_file(&path) {
            tracing::warn!(
                file = %codec::display_name(&path),
                "The file does not have a .json file extension. It will be skipped"
            );
            listing.skipped.push(path);
        } else {
            listing.records.push(path);
        }
    }

    listing.records.sort();
    listing.skipped.sort();
    Ok(listing)
}

/// Upload pipeline
pub struct UploadPipeline {
    store: Arc<dyn DocumentStore>,
    engine: BatchEngine,
    batch_size: usize,
    encoding: TextEncoding,
    dry_run: bool,
    progress: Option<ProgressHook>,
}

impl UploadPipeline {
    /// Create a new upload pipeline
    pub fn new(
        store: Arc<dyn DocumentStore>,
        engine: BatchEngine,
        batch_size: usize,
        encoding: TextEncoding,
    ) -> Self {
        Self {
            store,
            engine,
            batch_size: batch_size.max(1),
            encoding,
            dry_run: false,
            progress: None,
        }
    }

    /// Mark the summary as a dry run
    ///
    /// The pipeline writes to whatever store it was given; callers pass an
    /// in-memory store for a dry run.
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Report every settled batch to `hook`
    pub fn with_progress(mut self, hook: ProgressHook) -> Self {
        self.progress = Some(hook);
        self
    }

    /// Upload every record file of `source` into `target`
    ///
    /// The database and container are created if absent. A file that cannot
    /// be read, decoded, parsed or inserted is reported as a failure and the
    /// remaining files are still processed.
    ///
    /// # Errors
    ///
    /// Returns an error if the source directory cannot be listed or the
    /// destination cannot be prepared.
    pub async fn run(&self, source: &Path, target: &ContainerPath) -> Result<TransferSummary> {
        let started = Instant::now();
        log_transfer_start!(
            TransferDirection::Upload.as_str(),
            target,
            source.display()
        );

        let listing = list_source(source).await?;
        prepare_collection(self.store.as_ref(), target).await?;

        let mut summary = TransferSummary::new(TransferDirection::Upload);
        summary.dry_run = self.dry_run;
        for _ in &listing.skipped {
            summary.record_skipped();
        }

        tracing::info!(
            files = listing.records.len(),
            skipped = listing.skipped.len(),
            encoding = %self.encoding,
            dry_run = self.dry_run,
            "Uploading files to Cosmos DB"
        );

        for (index, chunk) in listing.records.chunks(self.batch_size).enumerate() {
            let report = self
                .engine
                .run_batch(index + 1, chunk.to_vec(), |path| {
                    upload_file(self.store.as_ref(), target, self.encoding, path)
                })
                .await;

            if let Some(progress) = &self.progress {
                progress(&report);
            }
            summary.record_batch(&report);
        }

        let summary = summary.with_duration(started.elapsed());
        summary.log_summary();
        Ok(summary)
    }
}

async fn upload_file(
    store: &dyn DocumentStore,
    target: &ContainerPath,
    encoding: TextEncoding,
    path: PathBuf,
) -> std::result::Result<String, ItemFailure> {
    let name = codec::display_name(&path);

    let bytes = tokio::fs::read(&path).await.map_err(|e| {
        ItemFailure::new(&name, FailureKind::Codec, format!("Failed to read file: {e}"))
    })?;

    let document = codec::parse(&bytes, encoding, &path)?;

    let id = record_id(&document)
        .map_err(|reason| ItemFailure::new(&name, FailureKind::MissingId, reason))?;

    store
        .create_document(target, &id, &document)
        .await
        .map_err(|e| ItemFailure::new(&name, FailureKind::Write, e.to_string()))?;

    tracing::debug!(file = %name, id = %id, "Document uploaded");
    Ok(name)
}
