//! Integration tests for container listing and deletion

use ferry::adapters::database::{DocumentStore, InMemoryStore, ID_PARTITION_KEY_PATH};
use ferry::core::admin::{delete_container, list_containers, render_container_table};
use ferry::domain::{ContainerPath, CosmosDbError, FerryError};

fn path(database: &str, container: &str) -> ContainerPath {
    ContainerPath::new(database, container).unwrap()
}

#[tokio::test]
async fn test_delete_missing_database_skips_container_lookup() {
    let store = InMemoryStore::new();

    let err = delete_container(&store, &path("nope", "c1"))
        .await
        .unwrap_err();

    assert_eq!(
        err.to_string(),
        "Cosmos DB error: Specified database nope does not exist"
    );
    assert_eq!(store.container_lookups(), 0);
}

#[tokio::test]
async fn test_delete_missing_container() {
    let store = InMemoryStore::new();
    store.ensure_database_exists("db1").await.unwrap();

    let err = delete_container(&store, &path("db1", "ghost"))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        FerryError::CosmosDb(CosmosDbError::ContainerNotFound { ref container, .. })
            if container == "ghost"
    ));
    assert_eq!(store.container_lookups(), 1);
}

#[tokio::test]
async fn test_delete_removes_container_and_keeps_database() {
    let store = InMemoryStore::new();
    store.seed(&path("db1", "c1"), Vec::new()).unwrap();
    store.seed(&path("db1", "c2"), Vec::new()).unwrap();

    delete_container(&store, &path("db1", "c1")).await.unwrap();

    assert!(store.database_exists("db1").await.unwrap());
    assert!(!store.container_exists(&path("db1", "c1")).await.unwrap());
    assert!(store.container_exists(&path("db1", "c2")).await.unwrap());
}

#[tokio::test]
async fn test_list_and_render_containers() {
    let store = InMemoryStore::new();
    store
        .ensure_database_exists("analytics")
        .await
        .unwrap();
    store
        .ensure_container_exists(&path("analytics", "events"), ID_PARTITION_KEY_PATH)
        .await
        .unwrap();
    store
        .ensure_container_exists(&path("analytics", "audit"), ID_PARTITION_KEY_PATH)
        .await
        .unwrap();
    store.ensure_database_exists("empty").await.unwrap();

    let rows = list_containers(&store).await.unwrap();
    let table = render_container_table(&rows);
    let lines: Vec<&str> = table.lines().collect();

    assert_eq!(lines[0], "| Database            | Container           |");
    assert_eq!(lines[1], format!(" {} ", "-".repeat(43)));
    assert_eq!(lines[2], "| analytics           | audit               |");
    assert_eq!(lines[3], "| analytics           | events              |");
    assert_eq!(lines[4], "| empty               |                     |");
    assert_eq!(lines.len(), 5);
}

#[tokio::test]
async fn test_list_empty_account_renders_header_only() {
    let store = InMemoryStore::new();

    let rows = list_containers(&store).await.unwrap();
    let table = render_container_table(&rows);

    assert!(rows.is_empty());
    assert_eq!(table.lines().count(), 2);
}
