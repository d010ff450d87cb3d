//! In-memory document store
//!
//! Behaves like a Cosmos DB account for the operations Ferry uses: documents
//! get system properties on insert, duplicate ids conflict and listings are
//! paged. Used by `upload-documents --dry-run` and by the test suites.

use crate::adapters::database::traits::DocumentStore;
use crate::core::transfer::{PageCursor, PageStream};
use crate::domain::{
    Batch, ContainerPath, CosmosDbError, DocumentId, FerryError, Record, Result, ID_FIELD,
};
use async_trait::async_trait;
use futures::stream::{self, StreamExt};
use serde_json::Value;
use std::collections::{BTreeMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

type Container = BTreeMap<String, Record>;
type Database = BTreeMap<String, Container>;

/// Document store held entirely in memory
pub struct InMemoryStore {
    databases: Mutex<BTreeMap<String, Database>>,
    page_size: usize,
    failing_ids: HashSet<String>,
    fail_read_after: Option<usize>,
    container_lookups: AtomicUsize,
    next_rid: AtomicUsize,
}

impl InMemoryStore {
    /// Create an empty store serving pages of 100 documents
    pub fn new() -> Self {
        Self {
            databases: Mutex::new(BTreeMap::new()),
            page_size: 100,
            failing_ids: HashSet::new(),
            fail_read_after: None,
            container_lookups: AtomicUsize::new(0),
            next_rid: AtomicUsize::new(1),
        }
    }

    /// Set the number of documents per page
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    /// Make inserts of the given ids fail
    pub fn with_failing_ids<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.failing_ids = ids.into_iter().map(Into::into).collect();
        self
    }

    /// Make paged reads fail once `pages` pages have been served
    pub fn with_read_failure_after(mut self, pages: usize) -> Self {
        self.fail_read_after = Some(pages);
        self
    }

    /// Create a database and container and seed them with documents
    ///
    /// Documents are stored as given plus system properties. Documents without
    /// a string `id` are rejected.
    pub fn seed(&self, path: &ContainerPath, documents: Vec<Record>) -> Result<()> {
        let mut databases = self.lock();
        let container = databases
            .entry(path.database.clone())
            .or_default()
            .entry(path.container.clone())
            .or_default();

        for document in documents {
            let id = match document.get(ID_FIELD) {
                Some(Value::String(id)) => id.clone(),
                _ => {
                    return Err(FerryError::Validation(format!(
                        "Seed document for {path} has no string id"
                    )))
                }
            };
            let stored = self.with_system_properties(path, &id, document);
            container.insert(id, stored);
        }
        Ok(())
    }

    /// Documents currently stored in a container, system properties included
    pub fn documents(&self, path: &ContainerPath) -> Vec<Record> {
        self.lock()
            .get(&path.database)
            .and_then(|database| database.get(&path.container))
            .map(|container| container.values().cloned().collect())
            .unwrap_or_default()
    }

    /// Number of container lookups performed so far
    pub fn container_lookups(&self) -> usize {
        self.container_lookups.load(Ordering::SeqCst)
    }

    fn lock(&self) -> MutexGuard<'_, BTreeMap<String, Database>> {
        self.databases.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn with_system_properties(
        &self,
        path: &ContainerPath,
        id: &str,
        mut document: Record,
    ) -> Record {
        let rid = self.next_rid.fetch_add(1, Ordering::SeqCst);
        document.insert("_rid".to_string(), Value::from(format!("rid{rid:08}")));
        document.insert(
            "_self".to_string(),
            Value::from(format!(
                "dbs/{}/colls/{}/docs/{id}/",
                path.database, path.container
            )),
        );
        document.insert("_etag".to_string(), Value::from(format!("\"{rid:016x}\"")));
        document.insert("_attachments".to_string(), Value::from("attachments/"));
        document.insert("_ts".to_string(), Value::from(chrono::Utc::now().timestamp()));
        document
    }

    fn container_not_found(path: &ContainerPath) -> FerryError {
        FerryError::CosmosDb(CosmosDbError::ContainerNotFound {
            database: path.database.clone(),
            container: path.container.clone(),
        })
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DocumentStore for InMemoryStore {
    async fn database_exists(&self, database: &str) -> Result<bool> {
        Ok(self.lock().contains_key(database))
    }

    async fn container_exists(&self, path: &ContainerPath) -> Result<bool> {
        self.container_lookups.fetch_add(1, Ordering::SeqCst);
        Ok(self
            .lock()
            .get(&path.database)
            .is_some_and(|database| database.contains_key(&path.container)))
    }

    async fn ensure_database_exists(&self, database: &str) -> Result<()> {
        self.lock().entry(database.to_string()).or_default();
        Ok(())
    }

    async fn ensure_container_exists(
        &self,
        path: &ContainerPath,
        _partition_key_path: &str,
    ) -> Result<()> {
        let mut databases = self.lock();
        let database = databases
            .get_mut(&path.database)
            .ok_or_else(|| CosmosDbError::DatabaseNotFound(path.database.clone()))?;
        database.entry(path.container.clone()).or_default();
        Ok(())
    }

    async fn list_databases(&self) -> Result<Vec<String>> {
        Ok(self.lock().keys().cloned().collect())
    }

    async fn list_containers(&self, database: &str) -> Result<Vec<String>> {
        self.lock()
            .get(database)
            .map(|containers| containers.keys().cloned().collect())
            .ok_or_else(|| CosmosDbError::DatabaseNotFound(database.to_string()).into())
    }

    async fn delete_container(&self, path: &ContainerPath) -> Result<()> {
        self.lock()
            .get_mut(&path.database)
            .and_then(|database| database.remove(&path.container))
            .map(|_| ())
            .ok_or_else(|| Self::container_not_found(path))
    }

    async fn read_all(&self, path: &ContainerPath) -> Result<PageCursor> {
        let documents: Vec<Record> = self
            .lock()
            .get(&path.database)
            .and_then(|database| database.get(&path.container))
            .map(|container| container.values().cloned().collect())
            .ok_or_else(|| Self::container_not_found(path))?;

        let mut pages: Vec<Result<Batch>> = documents
            .chunks(self.page_size)
            .map(|chunk| Ok(chunk.to_vec()))
            .collect();

        if let Some(after) = self.fail_read_after {
            pages.truncate(after);
            pages.push(Err(FerryError::CosmosDb(CosmosDbError::QueryFailed(format!(
                "Simulated read failure on {path} after {after} pages"
            )))));
        }

        let stream: PageStream = stream::iter(pages).boxed();
        Ok(PageCursor::new(stream))
    }

    async fn create_document(
        &self,
        path: &ContainerPath,
        id: &DocumentId,
        document: &Record,
    ) -> Result<()> {
        if self.failing_ids.contains(id.as_str()) {
            return Err(FerryError::CosmosDb(CosmosDbError::InsertFailed(format!(
                "Simulated insert failure for document {id}"
            ))));
        }

        let stored = self.with_system_properties(path, id.as_str(), document.clone());

        let mut databases = self.lock();
        let container = databases
            .get_mut(&path.database)
            .and_then(|database| database.get_mut(&path.container))
            .ok_or_else(|| Self::container_not_found(path))?;

        if container.contains_key(id.as_str()) {
            return Err(FerryError::CosmosDb(CosmosDbError::Conflict(format!(
                "Document {id} already exists in {path}"
            ))));
        }

        container.insert(id.as_str().to_string(), stored);
        Ok(())
    }
}
