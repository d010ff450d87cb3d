//! Administrative operations
//!
//! Thin wrappers over single [`DocumentStore`] calls: resolving a container by
//! name, deleting it, and listing every container of the account.

use crate::adapters::database::DocumentStore;
use crate::domain::{ContainerPath, CosmosDbError, Result};

/// Width of each column of the container table
pub const COLUMN_WIDTH: usize = 20;

/// One row of the container listing
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct ContainerRow {
    /// Database name
    pub database: String,

    /// Container name, `None` for a database without containers
    pub container: Option<String>,
}

/// Check that a database and then a container exist
///
/// The container lookup is only made once the database is known to exist.
///
/// # Errors
///
/// Returns [`CosmosDbError::DatabaseNotFound`] or
/// [`CosmosDbError::ContainerNotFound`] naming the missing resource.
pub async fn resolve_container(store: &dyn DocumentStore, path: &ContainerPath) -> Result<()> {
    if !store.database_exists(&path.database).await? {
        return Err(CosmosDbError::DatabaseNotFound(path.database.clone()).into());
    }

    if !store.container_exists(path).await? {
        return Err(CosmosDbError::ContainerNotFound {
            database: path.database.clone(),
            container: path.container.clone(),
        }
        .into());
    }

    Ok(())
}

/// Delete a container after checking that it exists
pub async fn delete_container(store: &dyn DocumentStore, path: &ContainerPath) -> Result<()> {
    resolve_container(store, path).await?;
    delete_resolved_container(store, path).await
}

/// Delete a container already found by [`resolve_container`]
pub async fn delete_resolved_container(
    store: &dyn DocumentStore,
    path: &ContainerPath,
) -> Result<()> {
    store.delete_container(path).await?;

    tracing::info!(
        database = %path.database,
        container = %path.container,
        "Container deleted"
    );
    Ok(())
}

/// Enumerate every container of every database
///
/// Rows are sorted by database, then container. A database without
/// containers yields a single row with no container.
pub async fn list_containers(store: &dyn DocumentStore) -> Result<Vec<ContainerRow>> {
    let mut rows = Vec::new();

    for database in store.list_databases().await? {
        let containers = store.list_containers(&database).await?;
        tracing::debug!(
            database = %database,
            containers = containers.len(),
            "Listed containers"
        );

        if containers.is_empty() {
            rows.push(ContainerRow {
                database,
                container: None,
            });
            continue;
        }

        rows.extend(containers.into_iter().map(|container| ContainerRow {
            database: database.clone(),
            container: Some(container),
        }));
    }

    rows.sort();
    Ok(rows)
}

/// Render rows as a two-column fixed-width table
///
/// Names longer than [`COLUMN_WIDTH`] characters are cut to their first
/// [`COLUMN_WIDTH`] characters.
pub fn render_container_table(rows: &[ContainerRow]) -> String {
    let mut out = String::new();
    out.push_str(&table_line("Database", "Container"));
    out.push_str(&format!(" {} \n", "-".repeat(2 * COLUMN_WIDTH + 3)));

    for row in rows {
        out.push_str(&table_line(
            &row.database,
            row.container.as_deref().unwrap_or(""),
        ));
    }
    out
}

fn table_line(database: &str, container: &str) -> String {
    format!(
        "| {:<width$}| {:<width$}|\n",
        fit(database),
        fit(container),
        width = COLUMN_WIDTH
    )
}

fn fit(name: &str) -> String {
    name.chars().take(COLUMN_WIDTH).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::database::InMemoryStore;
    use crate::domain::FerryError;

    fn path(db: &str, c: &str) -> ContainerPath {
        ContainerPath::new(db, c).unwrap()
    }

    #[test]
    fn test_table_header() {
        let table = render_container_table(&[]);
        let header = table.lines().next().unwrap();
        assert_eq!(header, "| Database            | Container           |");
        assert_eq!(
            table.lines().nth(1).unwrap(),
            " ------------------------------------------- "
        );
    }

    #[test]
    fn test_long_names_truncated_to_their_own_prefix() {
        let rows = vec![ContainerRow {
            database: "db".to_string(),
            container: Some("a-very-long-container-name-indeed".to_string()),
        }];
        let table = render_container_table(&rows);
        let line = table.lines().nth(2).unwrap();
        assert_eq!(line, "| db                  | a-very-long-containe|");
    }

    #[test]
    fn test_database_without_containers_has_empty_cell() {
        let rows = vec![ContainerRow {
            database: "empty".to_string(),
            container: None,
        }];
        let table = render_container_table(&rows);
        assert_eq!(
            table.lines().nth(2).unwrap(),
            "| empty               |                     |"
        );
    }

    #[tokio::test]
    async fn test_list_containers_sorted() {
        let store = InMemoryStore::new();
        store.seed(&path("zeta", "b"), Vec::new()).unwrap();
        store.seed(&path("zeta", "a"), Vec::new()).unwrap();
        store.seed(&path("alpha", "c"), Vec::new()).unwrap();
        store.ensure_database_exists("empty").await.unwrap();

        let rows = list_containers(&store).await.unwrap();
        let flat: Vec<(String, Option<String>)> = rows
            .into_iter()
            .map(|r| (r.database, r.container))
            .collect();

        assert_eq!(
            flat,
            vec![
                ("alpha".to_string(), Some("c".to_string())),
                ("empty".to_string(), None),
                ("zeta".to_string(), Some("a".to_string())),
                ("zeta".to_string(), Some("b".to_string())),
            ]
        );
    }

    #[tokio::test]
    async fn test_delete_in_missing_database_skips_container_lookup() {
        let store = InMemoryStore::new();

        let err = delete_container(&store, &path("nope", "c1"))
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "Cosmos DB error: Specified database nope does not exist");
        assert_eq!(store.container_lookups(), 0);
    }

    #[tokio::test]
    async fn test_delete_missing_container() {
        let store = InMemoryStore::new();
        store.ensure_database_exists("db1").await.unwrap();

        let err = delete_container(&store, &path("db1", "c1"))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            FerryError::CosmosDb(CosmosDbError::ContainerNotFound { .. })
        ));
        assert_eq!(store.container_lookups(), 1);
    }

    #[tokio::test]
    async fn test_delete_existing_container() {
        let store = InMemoryStore::new();
        store.seed(&path("db1", "c1"), Vec::new()).unwrap();

        delete_container(&store, &path("db1", "c1")).await.unwrap();
        assert!(store.list_containers("db1").await.unwrap().is_empty());
    }
}
