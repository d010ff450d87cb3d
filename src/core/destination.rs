//! Destination preparation
//!
//! Brings a transfer target into a known state before the first item is
//! written. Any failure here is fatal to the run.

use crate::adapters::database::{DocumentStore, ID_PARTITION_KEY_PATH};
use crate::domain::{ContainerPath, FerryError, Result};
use std::io::ErrorKind;
use std::path::Path;

/// Reset the export directory
///
/// An existing directory is removed with everything in it and recreated
/// empty, so a re-run never leaves files from an earlier export behind.
/// Missing parent directories are created.
///
/// # Errors
///
/// Returns an error if the directory cannot be removed or created, or if the
/// path exists and is not a directory.
pub async fn prepare_output_dir(path: &Path) -> Result<()> {
    match tokio::fs::metadata(path).await {
        Ok(metadata) if metadata.is_dir() => {
            tracing::info!(path = %path.display(), "Removing existing output directory");
            tokio::fs::remove_dir_all(path).await.map_err(|e| {
                FerryError::Transfer(format!(
                    "Failed to remove output directory {}: {e}",
                    path.display()
                ))
            })?;
        }
        Ok(_) => {
            return Err(FerryError::Transfer(format!(
                "Output path {} exists and is not a directory",
                path.display()
            )));
        }
        Err(e) if e.kind() == ErrorKind::NotFound => {}
        Err(e) => {
            return Err(FerryError::Transfer(format!(
                "Failed to inspect output directory {}: {e}",
                path.display()
            )));
        }
    }

    tokio::fs::create_dir_all(path).await.map_err(|e| {
        FerryError::Transfer(format!(
            "Failed to create output directory {}: {e}",
            path.display()
        ))
    })?;

    tracing::debug!(path = %path.display(), "Output directory ready");
    Ok(())
}

/// Create the upload database and container if they are absent
///
/// Never destructive: documents already in the container are kept. New
/// containers are partitioned by `/id`.
///
/// # Errors
///
/// Returns an error if either resource cannot be created or accessed.
pub async fn prepare_collection(store: &dyn DocumentStore, path: &ContainerPath) -> Result<()> {
    store.ensure_database_exists(&path.database).await?;
    store
        .ensure_container_exists(path, ID_PARTITION_KEY_PATH)
        .await?;

    tracing::debug!(container = %path, "Upload container ready");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::database::InMemoryStore;
    use crate::domain::DocumentId;
    use serde_json::json;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_prepare_output_dir_resets_contents() {
        let temp = TempDir::new().unwrap();
        let out = temp.path().join("out");
        std::fs::create_dir_all(out.join("nested")).unwrap();
        std::fs::write(out.join("stale.json"), "{}").unwrap();
        std::fs::write(out.join("nested").join("old.json"), "{}").unwrap();

        prepare_output_dir(&out).await.unwrap();

        assert!(out.is_dir());
        assert_eq!(std::fs::read_dir(&out).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn test_prepare_output_dir_creates_parents() {
        let temp = TempDir::new().unwrap();
        let out = temp.path().join("a").join("b").join("out");

        prepare_output_dir(&out).await.unwrap();
        assert!(out.is_dir());

        // second run is a no-op reset
        prepare_output_dir(&out).await.unwrap();
        assert!(out.is_dir());
    }

    #[tokio::test]
    async fn test_prepare_output_dir_rejects_file() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("out");
        std::fs::write(&file, "not a dir").unwrap();

        let err = prepare_output_dir(&file).await.unwrap_err();
        assert!(err.to_string().contains("not a directory"));
    }

    #[tokio::test]
    async fn test_prepare_collection_is_idempotent() {
        let store = InMemoryStore::new();
        let path = ContainerPath::new("db1", "c1").unwrap();

        prepare_collection(&store, &path).await.unwrap();
        store
            .create_document(
                &path,
                &DocumentId::new("a").unwrap(),
                json!({"id": "a"}).as_object().unwrap(),
            )
            .await
            .unwrap();

        prepare_collection(&store, &path).await.unwrap();
        assert_eq!(store.documents(&path).len(), 1);
    }
}
