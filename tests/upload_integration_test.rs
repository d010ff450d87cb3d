//! Integration tests for the upload pipeline against the in-memory store

use ferry::adapters::database::{create_dry_run_store, DocumentStore, InMemoryStore};
use ferry::core::codec::TextEncoding;
use ferry::core::transfer::{BatchEngine, FailureKind};
use ferry::core::upload::UploadPipeline;
use ferry::domain::ContainerPath;
use std::sync::Arc;
use tempfile::TempDir;

fn target() -> ContainerPath {
    ContainerPath::new("db1", "c1").unwrap()
}

fn pipeline(store: Arc<dyn DocumentStore>) -> UploadPipeline {
    UploadPipeline::new(store, BatchEngine::new(8), 50, TextEncoding::Utf8)
}

#[tokio::test]
async fn test_upload_skips_non_json_files() {
    let temp = TempDir::new().unwrap();
    std::fs::write(temp.path().join("a.json"), r#"{"id":"a","v":1}"#).unwrap();
    std::fs::write(temp.path().join("b.txt"), r#"{"id":"b"}"#).unwrap();
    let store = Arc::new(InMemoryStore::new());

    let summary = pipeline(store.clone())
        .run(temp.path(), &target())
        .await
        .unwrap();

    assert_eq!(summary.total_items, 1);
    assert_eq!(summary.succeeded, 1);
    assert_eq!(summary.skipped, 1);

    let documents = store.documents(&target());
    assert_eq!(documents.len(), 1);
    assert_eq!(documents[0]["id"], "a");
    assert_eq!(documents[0]["v"], 1);
}

#[tokio::test]
async fn test_upload_creates_missing_database_and_container() {
    let temp = TempDir::new().unwrap();
    std::fs::write(temp.path().join("a.json"), r#"{"id":"a"}"#).unwrap();
    let store = Arc::new(InMemoryStore::new());
    assert!(!store.database_exists("db1").await.unwrap());

    pipeline(store.clone())
        .run(temp.path(), &target())
        .await
        .unwrap();

    assert!(store.database_exists("db1").await.unwrap());
    assert!(store.container_exists(&target()).await.unwrap());
}

#[tokio::test]
async fn test_invalid_json_is_named_and_later_files_are_processed() {
    let temp = TempDir::new().unwrap();
    std::fs::write(temp.path().join("a.json"), "{ broken").unwrap();
    std::fs::write(temp.path().join("b.json"), r#"{"id":"b"}"#).unwrap();
    let store = Arc::new(InMemoryStore::new());

    let pipeline = UploadPipeline::new(store.clone(), BatchEngine::new(1), 1, TextEncoding::Utf8);
    let summary = pipeline.run(temp.path(), &target()).await.unwrap();

    assert_eq!(summary.batches, 2);
    assert_eq!(summary.succeeded, 1);
    assert_eq!(summary.failed, 1);
    assert_eq!(summary.failures[0].key, "a.json");
    assert_eq!(summary.failures[0].kind, FailureKind::Codec);
    assert!(summary.failures[0].reason.contains("valid JSON"));
    assert_eq!(store.documents(&target()).len(), 1);
}

#[tokio::test]
async fn test_upload_rerun_reports_conflicts() {
    let temp = TempDir::new().unwrap();
    std::fs::write(temp.path().join("a.json"), r#"{"id":"a"}"#).unwrap();
    std::fs::write(temp.path().join("b.json"), r#"{"id":"b"}"#).unwrap();
    let store = Arc::new(InMemoryStore::new());

    let first = pipeline(store.clone())
        .run(temp.path(), &target())
        .await
        .unwrap();
    assert!(first.is_successful());

    let second = pipeline(store.clone())
        .run(temp.path(), &target())
        .await
        .unwrap();
    assert_eq!(second.failed, 2);
    assert_eq!(second.failures_of(FailureKind::Write), 2);
    assert!(second
        .failures
        .iter()
        .all(|failure| failure.reason.contains("Conflict")));
    assert_eq!(store.documents(&target()).len(), 2);
}

#[tokio::test]
async fn test_upload_missing_id_is_reported() {
    let temp = TempDir::new().unwrap();
    std::fs::write(temp.path().join("anon.json"), r#"{"name":"no id"}"#).unwrap();
    std::fs::write(temp.path().join("numeric.json"), r#"{"id":42}"#).unwrap();
    let store = Arc::new(InMemoryStore::new());

    let summary = pipeline(store.clone())
        .run(temp.path(), &target())
        .await
        .unwrap();

    assert_eq!(summary.failures_of(FailureKind::MissingId), 2);
    assert!(store.documents(&target()).is_empty());
}

#[tokio::test]
async fn test_upload_latin1_file() {
    let temp = TempDir::new().unwrap();
    let mut bytes = br#"{"id":"caf"#.to_vec();
    bytes.push(0xE9);
    bytes.extend_from_slice(br#""}"#);
    std::fs::write(temp.path().join("cafe.json"), bytes).unwrap();
    let store = Arc::new(InMemoryStore::new());

    let pipeline =
        UploadPipeline::new(store.clone(), BatchEngine::new(2), 10, TextEncoding::Latin1);
    let summary = pipeline.run(temp.path(), &target()).await.unwrap();

    assert!(summary.is_successful());
    assert_eq!(store.documents(&target())[0]["id"], "café");
}

#[tokio::test]
async fn test_dry_run_store_is_isolated() {
    let temp = TempDir::new().unwrap();
    std::fs::write(temp.path().join("a.json"), r#"{"id":"a"}"#).unwrap();

    let summary = pipeline(create_dry_run_store())
        .with_dry_run(true)
        .run(temp.path(), &target())
        .await
        .unwrap();
    assert!(summary.dry_run);
    assert_eq!(summary.succeeded, 1);

    // Every dry run starts from an empty store
    let again = pipeline(create_dry_run_store())
        .with_dry_run(true)
        .run(temp.path(), &target())
        .await
        .unwrap();
    assert!(again.is_successful());
}

#[tokio::test]
async fn test_upload_missing_source_directory_is_fatal() {
    let temp = TempDir::new().unwrap();
    let store = Arc::new(InMemoryStore::new());

    let result = pipeline(store.clone())
        .run(&temp.path().join("missing"), &target())
        .await;

    assert!(result.is_err());
    assert!(!store.database_exists("db1").await.unwrap());
}

#[cfg(unix)]
#[tokio::test]
async fn test_upload_follows_symlinked_files() {
    let temp = TempDir::new().unwrap();
    let data = TempDir::new().unwrap();
    let real = data.path().join("linked.json");
    std::fs::write(&real, r#"{"id":"linked"}"#).unwrap();
    std::os::unix::fs::symlink(&real, temp.path().join("a.json")).unwrap();
    let dangling = data.path().join("gone.json");
    std::os::unix::fs::symlink(dangling, temp.path().join("b.json")).unwrap();
    let store = Arc::new(InMemoryStore::new());

    let summary = pipeline(store.clone())
        .run(temp.path(), &target())
        .await
        .unwrap();

    assert_eq!(summary.succeeded, 1);
    assert_eq!(summary.skipped, 1);
    let documents = store.documents(&target());
    assert_eq!(documents.len(), 1);
    assert_eq!(documents[0]["id"], "linked");
}
