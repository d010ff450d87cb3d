//! Export pipeline - container to directory
//!
//! Pages through every document of a container and writes each one, stripped
//! of its system properties, to `<output>/<id>.json`.

use crate::adapters::database::DocumentStore;
use crate::core::admin::resolve_container;
use crate::core::codec;
use crate::core::destination::prepare_output_dir;
use crate::core::transfer::{
    BatchEngine, FailureKind, ItemFailure, ProgressHook, TransferDirection, TransferSummary,
};
use crate::domain::{record_id, ContainerPath, Record, Result, ID_FIELD};
use crate::log_transfer_start;
use serde_json::Value;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

/// Export pipeline
pub struct ExportPipeline {
    store: Arc<dyn DocumentStore>,
    engine: BatchEngine,
    progress: Option<ProgressHook>,
}

impl ExportPipeline {
    /// Create a new export pipeline
    pub fn new(store: Arc<dyn DocumentStore>, engine: BatchEngine) -> Self {
        Self {
            store,
            engine,
            progress: None,
        }
    }

    /// Report every settled batch to `hook`
    pub fn with_progress(mut self, hook: ProgressHook) -> Self {
        self.progress = Some(hook);
        self
    }

    /// Export every document of `source` into `output`
    ///
    /// The output directory is reset first. Batches are processed one after
    /// another; documents within a batch are written concurrently.
    ///
    /// # Errors
    ///
    /// Returns an error if the database or container does not exist, the
    /// output directory cannot be prepared, or a page cannot be fetched. Files
    /// written before a page failure are left in place.
    pub async fn run(&self, source: &ContainerPath, output: &Path) -> Result<TransferSummary> {
        let started = Instant::now();
        log_transfer_start!(
            TransferDirection::Export.as_str(),
            source,
            output.display()
        );

        resolve_container(self.store.as_ref(), source).await?;
        prepare_output_dir(output).await?;

        let mut cursor = self.store.read_all(source).await?;
        let mut summary = TransferSummary::new(TransferDirection::Export);
        let mut batch_number = 0;

        while cursor.has_more() {
            let batch = cursor.fetch_next().await?;
            if batch.is_empty() {
                continue;
            }

            batch_number += 1;
            let report = self
                .engine
                .run_batch(batch_number, batch, |document| {
                    export_document(document, output)
                })
                .await;

            if let Some(progress) = &self.progress {
                progress(&report);
            }
            summary.record_batch(&report);
        }

        tracing::debug!(
            pages = cursor.pages_fetched(),
            documents = cursor.records_fetched(),
            "Pagination finished"
        );

        let summary = summary.with_duration(started.elapsed());
        summary.log_summary();
        Ok(summary)
    }
}

async fn export_document(
    document: Record,
    output: &Path,
) -> std::result::Result<String, ItemFailure> {
    let id = record_id(&document)
        .map_err(|reason| ItemFailure::new(describe(&document), FailureKind::MissingId, reason))?;

    let bytes = codec::encode(&codec::strip(document))
        .map_err(|e| ItemFailure::new(id.as_str(), FailureKind::Codec, e.to_string()))?;

    let target = output.join(id.file_name());
    tokio::fs::write(&target, bytes).await.map_err(|e| {
        ItemFailure::new(
            id.as_str(),
            FailureKind::Write,
            format!("Failed to write {}: {e}", target.display()),
        )
    })?;

    tracing::trace!(id = %id, path = %target.display(), "Document exported");
    Ok(id.into_inner())
}

/// Label for a document whose id cannot be used
fn describe(document: &Record) -> String {
    match (document.get(ID_FIELD), document.get("_rid")) {
        (Some(id), _) => format!("document with id {id}"),
        (None, Some(Value::String(rid))) => format!("document _rid {rid}"),
        _ => "document without id".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::database::InMemoryStore;
    use crate::domain::{CosmosDbError, FerryError};
    use serde_json::json;
    use tempfile::TempDir;

    fn record(value: Value) -> Record {
        value.as_object().cloned().unwrap()
    }

    fn path() -> ContainerPath {
        ContainerPath::new("db1", "c1").unwrap()
    }

    fn pipeline(store: Arc<InMemoryStore>) -> ExportPipeline {
        ExportPipeline::new(store, BatchEngine::new(8))
    }

    #[tokio::test]
    async fn test_export_writes_stripped_documents() {
        let store = Arc::new(InMemoryStore::new());
        store
            .seed(&path(), vec![record(json!({"id": "a", "x": 1}))])
            .unwrap();
        let temp = TempDir::new().unwrap();
        let out = temp.path().join("out");

        let summary = pipeline(store).run(&path(), &out).await.unwrap();

        assert_eq!(summary.succeeded, 1);
        let written = std::fs::read_to_string(out.join("a.json")).unwrap();
        assert_eq!(written, r#"{"id":"a","x":1}"#);
    }

    #[tokio::test]
    async fn test_missing_id_is_item_failure() {
        let store = Arc::new(InMemoryStore::new().with_page_size(10));
        store
            .seed(&path(), vec![record(json!({"id": "a"}))])
            .unwrap();
        let temp = TempDir::new().unwrap();

        let failure = export_document(record(json!({"x": 1, "_rid": "r1"})), temp.path())
            .await
            .unwrap_err();
        assert_eq!(failure.kind, FailureKind::MissingId);
        assert_eq!(failure.key, "document _rid r1");

        let summary = pipeline(store).run(&path(), temp.path()).await.unwrap();
        assert!(summary.is_successful());
    }

    #[tokio::test]
    async fn test_write_failure_is_item_failure() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("does-not-exist");

        let failure = export_document(record(json!({"id": "a"})), &missing)
            .await
            .unwrap_err();
        assert_eq!(failure.kind, FailureKind::Write);
        assert_eq!(failure.key, "a");
    }

    #[tokio::test]
    async fn test_missing_container_is_fatal() {
        let store = Arc::new(InMemoryStore::new());
        store.ensure_database_exists("db1").await.unwrap();
        let temp = TempDir::new().unwrap();

        let err = pipeline(store)
            .run(&path(), &temp.path().join("out"))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            FerryError::CosmosDb(CosmosDbError::ContainerNotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_page_failure_keeps_written_files() {
        let store = Arc::new(
            InMemoryStore::new()
                .with_page_size(2)
                .with_read_failure_after(1),
        );
        let docs = ["a", "b", "c"]
            .iter()
            .map(|id| record(json!({ "id": id })))
            .collect();
        store.seed(&path(), docs).unwrap();
        let temp = TempDir::new().unwrap();
        let out = temp.path().join("out");

        let err = pipeline(store).run(&path(), &out).await.unwrap_err();

        assert!(err.to_string().contains("Simulated read failure"));
        assert!(out.join("a.json").exists());
        assert!(out.join("b.json").exists());
        assert!(!out.join("c.json").exists());
    }

    #[test]
    fn test_describe() {
        assert_eq!(
            describe(&record(json!({"id": 7}))),
            "document with id 7"
        );
        assert_eq!(describe(&record(json!({}))), "document without id");
    }
}
