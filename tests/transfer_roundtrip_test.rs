//! End-to-end transfer tests: upload a directory, export it back, compare

use fake::faker::lorem::en::Word;
use fake::faker::name::en::Name;
use fake::Fake;
use ferry::adapters::database::InMemoryStore;
use ferry::core::codec::TextEncoding;
use ferry::core::export::ExportPipeline;
use ferry::core::transfer::{BatchEngine, FailureKind, ItemFailure};
use ferry::core::upload::UploadPipeline;
use ferry::domain::{ContainerPath, Record};
use serde_json::{json, Value};
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;

fn fake_record(index: usize) -> Record {
    let name: String = Name().fake();
    let tag: String = Word().fake();
    let score: u32 = (1..10_000).fake();
    json!({
        "id": format!("doc-{index:03}"),
        "name": name,
        "tags": [tag],
        "score": score,
        "nested": {"active": index % 2 == 0}
    })
    .as_object()
    .cloned()
    .unwrap()
}

fn read_dir_records(dir: &std::path::Path) -> BTreeMap<String, Value> {
    std::fs::read_dir(dir)
        .unwrap()
        .map(|entry| {
            let path = entry.unwrap().path();
            let name = path.file_name().unwrap().to_string_lossy().to_string();
            let value: Value = serde_json::from_slice(&std::fs::read(&path).unwrap()).unwrap();
            (name, value)
        })
        .collect()
}

#[tokio::test]
async fn test_upload_then_export_preserves_documents() {
    let source = TempDir::new().unwrap();
    let records: Vec<Record> = (0..37).map(fake_record).collect();
    for record in &records {
        let id = record["id"].as_str().unwrap();
        std::fs::write(
            source.path().join(format!("{id}.json")),
            serde_json::to_vec_pretty(record).unwrap(),
        )
        .unwrap();
    }

    let store = Arc::new(InMemoryStore::new().with_page_size(10));
    let container = ContainerPath::new("roundtrip", "docs").unwrap();

    let uploaded = UploadPipeline::new(store.clone(), BatchEngine::new(8), 5, TextEncoding::Utf8)
        .run(source.path(), &container)
        .await
        .unwrap();
    assert_eq!(uploaded.succeeded, 37);
    assert_eq!(uploaded.batches, 8);

    let output = TempDir::new().unwrap();
    let exported = ExportPipeline::new(store, BatchEngine::new(8))
        .run(&container, output.path())
        .await
        .unwrap();
    assert_eq!(exported.succeeded, 37);
    assert_eq!(exported.batches, 4);

    let original = read_dir_records(source.path());
    let copy = read_dir_records(output.path());
    assert_eq!(original, copy);
}

#[tokio::test]
async fn test_engine_bounds_concurrency_and_settles_every_item() {
    let engine = BatchEngine::new(3);
    let in_flight = Arc::new(AtomicUsize::new(0));
    let peak = Arc::new(AtomicUsize::new(0));

    let report = engine
        .run_batch(1, (0..20).collect(), |n: usize| {
            let in_flight = in_flight.clone();
            let peak = peak.clone();
            async move {
                let now = in_flight.fetch_add(1, Ordering::SeqCst) + 1;
                peak.fetch_max(now, Ordering::SeqCst);
                tokio::time::sleep(Duration::from_millis(2)).await;
                in_flight.fetch_sub(1, Ordering::SeqCst);

                if n % 5 == 0 {
                    Err(ItemFailure::new(n.to_string(), FailureKind::Write, "rejected"))
                } else {
                    Ok(n.to_string())
                }
            }
        })
        .await;

    assert_eq!(report.size(), 20);
    assert_eq!(report.succeeded(), 16);
    assert_eq!(report.failed(), 4);
    assert!(peak.load(Ordering::SeqCst) <= 3);
    assert_eq!(
        report.progress_line(),
        "Batch 1 complete: 16 of 20 documents transferred, 4 failed"
    );
}
