//! `SQLite` implementation of the `CollectionStore` trait.

use async_trait::async_trait;
use sqlx::{Row, SqlitePool};

use artdeck_core::domain::{
    CollectionModelEntry, ModelCollection, ModelType, DEFAULT_COLLECTION_ID,
};
use artdeck_core::ports::{CollectionStore, RepositoryError};

use super::storage_err;

const ENTRY_COLUMNS: &str =
    "collection_id, model_id, name, model_type, nsfw, thumbnail_url, creator_name, added_at";

fn row_to_entry(row: &sqlx::sqlite::SqliteRow) -> CollectionModelEntry {
    let model_type: String = row.get("model_type");
    CollectionModelEntry {
        collection_id: row.get("collection_id"),
        model_id: row.get("model_id"),
        name: row.get("name"),
        model_type: ModelType::from_api_param(&model_type),
        nsfw: row.get("nsfw"),
        thumbnail_url: row.get("thumbnail_url"),
        creator_name: row.get("creator_name"),
        added_at: row.get("added_at"),
    }
}

fn row_to_collection(row: &sqlx::sqlite::SqliteRow) -> ModelCollection {
    let count: i64 = row.get("model_count");
    ModelCollection {
        id: row.get("id"),
        name: row.get("name"),
        is_default: row.get("is_default"),
        model_count: u32::try_from(count).unwrap_or(0),
        thumbnail_url: row.get("thumbnail_url"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}

/// Reject mutations against the protected default collection before any
/// write happens.
fn guard_default(id: i64, operation: &str) -> Result<(), RepositoryError> {
    if id == DEFAULT_COLLECTION_ID {
        return Err(RepositoryError::Constraint(format!(
            "the default collection cannot be {operation}"
        )));
    }
    Ok(())
}

/// Query selecting collections with their derived count and thumbnail.
const COLLECTION_SELECT: &str = r#"
    SELECT c.id, c.name, c.is_default, c.created_at, c.updated_at,
           (SELECT COUNT(*) FROM collection_model_entries e
             WHERE e.collection_id = c.id) AS model_count,
           (SELECT e.thumbnail_url FROM collection_model_entries e
             WHERE e.collection_id = c.id
             ORDER BY e.added_at DESC LIMIT 1) AS thumbnail_url
    FROM collections c
"#;

/// `SQLite` implementation of the `CollectionStore` trait.
pub struct SqliteCollectionStore {
    pool: SqlitePool,
}

impl SqliteCollectionStore {
    /// Create a new `SQLite` collection store.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CollectionStore for SqliteCollectionStore {
    async fn list(&self) -> Result<Vec<ModelCollection>, RepositoryError> {
        let query = format!("{COLLECTION_SELECT} ORDER BY c.is_default DESC, c.created_at DESC");

        let rows = sqlx::query(&query)
            .fetch_all(&self.pool)
            .await
            .map_err(storage_err)?;

        Ok(rows.iter().map(row_to_collection).collect())
    }

    async fn get(&self, id: i64) -> Result<Option<ModelCollection>, RepositoryError> {
        let query = format!("{COLLECTION_SELECT} WHERE c.id = ?");

        let row = sqlx::query(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(storage_err)?;

        Ok(row.as_ref().map(row_to_collection))
    }

    async fn create(&self, name: &str) -> Result<ModelCollection, RepositoryError> {
        let now = chrono::Utc::now().timestamp_millis();

        let result = sqlx::query(
            "INSERT INTO collections (name, is_default, created_at, updated_at)
             VALUES (?, 0, ?, ?)",
        )
        .bind(name)
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(storage_err)?;

        let id = result.last_insert_rowid();
        self.get(id)
            .await?
            .ok_or_else(|| RepositoryError::Storage(format!("created collection {id} vanished")))
    }

    async fn rename(&self, id: i64, name: &str) -> Result<(), RepositoryError> {
        guard_default(id, "renamed")?;

        let now = chrono::Utc::now().timestamp_millis();
        let result = sqlx::query("UPDATE collections SET name = ?, updated_at = ? WHERE id = ?")
            .bind(name)
            .bind(now)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(storage_err)?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound(format!("collection {id}")));
        }
        Ok(())
    }

    async fn delete(&self, id: i64) -> Result<(), RepositoryError> {
        guard_default(id, "deleted")?;

        let result = sqlx::query("DELETE FROM collections WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(storage_err)?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound(format!("collection {id}")));
        }
        Ok(())
    }

    async fn models_in(
        &self,
        collection_id: i64,
    ) -> Result<Vec<CollectionModelEntry>, RepositoryError> {
        let query = format!(
            "SELECT {ENTRY_COLUMNS} FROM collection_model_entries
             WHERE collection_id = ? ORDER BY added_at DESC"
        );

        let rows = sqlx::query(&query)
            .bind(collection_id)
            .fetch_all(&self.pool)
            .await
            .map_err(storage_err)?;

        Ok(rows.iter().map(row_to_entry).collect())
    }

    async fn contains(
        &self,
        collection_id: i64,
        model_id: i64,
    ) -> Result<bool, RepositoryError> {
        let row = sqlx::query(
            "SELECT 1 FROM collection_model_entries WHERE collection_id = ? AND model_id = ?",
        )
        .bind(collection_id)
        .bind(model_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(storage_err)?;

        Ok(row.is_some())
    }

    async fn add_model(&self, entry: &CollectionModelEntry) -> Result<(), RepositoryError> {
        sqlx::query(
            r#"INSERT OR REPLACE INTO collection_model_entries (
                collection_id, model_id, name, model_type, nsfw,
                thumbnail_url, creator_name, added_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?)"#,
        )
        .bind(entry.collection_id)
        .bind(entry.model_id)
        .bind(&entry.name)
        .bind(entry.model_type.as_api_param())
        .bind(entry.nsfw)
        .bind(&entry.thumbnail_url)
        .bind(&entry.creator_name)
        .bind(entry.added_at)
        .execute(&self.pool)
        .await
        .map_err(storage_err)?;

        Ok(())
    }

    async fn remove_model(
        &self,
        collection_id: i64,
        model_id: i64,
    ) -> Result<bool, RepositoryError> {
        let result = sqlx::query(
            "DELETE FROM collection_model_entries WHERE collection_id = ? AND model_id = ?",
        )
        .bind(collection_id)
        .bind(model_id)
        .execute(&self.pool)
        .await
        .map_err(storage_err)?;

        Ok(result.rows_affected() > 0)
    }

    async fn bulk_remove_models(
        &self,
        collection_id: i64,
        model_ids: &[i64],
    ) -> Result<(), RepositoryError> {
        let mut tx = self.pool.begin().await.map_err(storage_err)?;

        for &model_id in model_ids {
            sqlx::query(
                "DELETE FROM collection_model_entries WHERE collection_id = ? AND model_id = ?",
            )
            .bind(collection_id)
            .bind(model_id)
            .execute(&mut *tx)
            .await
            .map_err(storage_err)?;
        }

        tx.commit().await.map_err(storage_err)
    }

    async fn bulk_move_models(
        &self,
        from: i64,
        to: i64,
        model_ids: &[i64],
    ) -> Result<(), RepositoryError> {
        let now = chrono::Utc::now().timestamp_millis();
        let mut tx = self.pool.begin().await.map_err(storage_err)?;

        for &model_id in model_ids {
            let select = format!(
                "SELECT {ENTRY_COLUMNS} FROM collection_model_entries
                 WHERE collection_id = ? AND model_id = ?"
            );
            let source = sqlx::query(&select)
                .bind(from)
                .bind(model_id)
                .fetch_optional(&mut *tx)
                .await
                .map_err(storage_err)?;

            // Remove-then-insert per id: the source entry always goes away,
            // and membership in the target never duplicates.
            sqlx::query(
                "DELETE FROM collection_model_entries WHERE collection_id = ? AND model_id = ?",
            )
            .bind(from)
            .bind(model_id)
            .execute(&mut *tx)
            .await
            .map_err(storage_err)?;

            if let Some(row) = source {
                let entry = row_to_entry(&row);
                sqlx::query(
                    r#"INSERT OR REPLACE INTO collection_model_entries (
                        collection_id, model_id, name, model_type, nsfw,
                        thumbnail_url, creator_name, added_at
                    ) VALUES (?, ?, ?, ?, ?, ?, ?, ?)"#,
                )
                .bind(to)
                .bind(entry.model_id)
                .bind(&entry.name)
                .bind(entry.model_type.as_api_param())
                .bind(entry.nsfw)
                .bind(&entry.thumbnail_url)
                .bind(&entry.creator_name)
                .bind(now)
                .execute(&mut *tx)
                .await
                .map_err(storage_err)?;
            }
        }

        tx.commit().await.map_err(storage_err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::setup::setup_test_database;

    fn entry(collection_id: i64, model_id: i64, added_at: i64) -> CollectionModelEntry {
        CollectionModelEntry {
            collection_id,
            model_id,
            name: format!("model-{model_id}"),
            model_type: ModelType::Checkpoint,
            nsfw: false,
            thumbnail_url: Some(format!("https://img/{model_id}.png")),
            creator_name: None,
            added_at,
        }
    }

    async fn store() -> SqliteCollectionStore {
        SqliteCollectionStore::new(setup_test_database().await.unwrap())
    }

    #[tokio::test]
    async fn test_default_collection_exists_and_is_protected() {
        let store = store().await;

        let collections = store.list().await.unwrap();
        assert_eq!(collections[0].id, DEFAULT_COLLECTION_ID);
        assert!(collections[0].is_default);

        assert!(matches!(
            store.rename(DEFAULT_COLLECTION_ID, "Mine").await,
            Err(RepositoryError::Constraint(_))
        ));
        assert!(matches!(
            store.delete(DEFAULT_COLLECTION_ID).await,
            Err(RepositoryError::Constraint(_))
        ));
    }

    #[tokio::test]
    async fn test_create_rename_delete() {
        let store = store().await;

        let created = store.create("Portraits").await.unwrap();
        assert!(!created.is_default);
        assert_eq!(created.model_count, 0);

        store.rename(created.id, "People").await.unwrap();
        assert_eq!(store.get(created.id).await.unwrap().unwrap().name, "People");

        store.delete(created.id).await.unwrap();
        assert!(store.get(created.id).await.unwrap().is_none());

        assert!(matches!(
            store.rename(999, "x").await,
            Err(RepositoryError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_deleting_collection_cascades_to_entries() {
        let store = store().await;
        let created = store.create("Doomed").await.unwrap();

        store.add_model(&entry(created.id, 1, 10)).await.unwrap();
        store.add_model(&entry(created.id, 2, 20)).await.unwrap();
        store.delete(created.id).await.unwrap();

        let orphans = store.models_in(created.id).await.unwrap();
        assert!(orphans.is_empty());
    }

    #[tokio::test]
    async fn test_derived_count_and_thumbnail() {
        let store = store().await;

        store
            .add_model(&entry(DEFAULT_COLLECTION_ID, 1, 10))
            .await
            .unwrap();
        store
            .add_model(&entry(DEFAULT_COLLECTION_ID, 2, 20))
            .await
            .unwrap();

        let favorites = store.get(DEFAULT_COLLECTION_ID).await.unwrap().unwrap();
        assert_eq!(favorites.model_count, 2);
        // Most recently added member provides the thumbnail.
        assert_eq!(
            favorites.thumbnail_url.as_deref(),
            Some("https://img/2.png")
        );
    }

    #[tokio::test]
    async fn test_models_in_orders_newest_first() {
        let store = store().await;

        store
            .add_model(&entry(DEFAULT_COLLECTION_ID, 1, 100))
            .await
            .unwrap();
        store
            .add_model(&entry(DEFAULT_COLLECTION_ID, 2, 300))
            .await
            .unwrap();
        store
            .add_model(&entry(DEFAULT_COLLECTION_ID, 3, 200))
            .await
            .unwrap();

        let ids: Vec<i64> = store
            .models_in(DEFAULT_COLLECTION_ID)
            .await
            .unwrap()
            .iter()
            .map(|e| e.model_id)
            .collect();
        assert_eq!(ids, vec![2, 3, 1]);
    }

    #[tokio::test]
    async fn test_bulk_move_membership_not_accumulation() {
        let store = store().await;
        let target = store.create("Target").await.unwrap();

        store
            .add_model(&entry(DEFAULT_COLLECTION_ID, 7, 10))
            .await
            .unwrap();
        store
            .add_model(&entry(DEFAULT_COLLECTION_ID, 8, 20))
            .await
            .unwrap();
        // 7 already present in the target.
        store.add_model(&entry(target.id, 7, 5)).await.unwrap();

        store
            .bulk_move_models(DEFAULT_COLLECTION_ID, target.id, &[7, 8])
            .await
            .unwrap();

        assert!(store
            .models_in(DEFAULT_COLLECTION_ID)
            .await
            .unwrap()
            .is_empty());

        let mut ids: Vec<i64> = store
            .models_in(target.id)
            .await
            .unwrap()
            .iter()
            .map(|e| e.model_id)
            .collect();
        ids.sort_unstable();
        assert_eq!(ids, vec![7, 8]);

        assert!(!store.contains(DEFAULT_COLLECTION_ID, 7).await.unwrap());
        assert!(store.contains(target.id, 7).await.unwrap());
    }

    #[tokio::test]
    async fn test_bulk_move_skips_ids_absent_from_source() {
        let store = store().await;
        let target = store.create("Target").await.unwrap();

        store
            .add_model(&entry(DEFAULT_COLLECTION_ID, 7, 10))
            .await
            .unwrap();

        // 99 is in neither collection; the move must not invent it.
        store
            .bulk_move_models(DEFAULT_COLLECTION_ID, target.id, &[7, 99])
            .await
            .unwrap();

        let ids: Vec<i64> = store
            .models_in(target.id)
            .await
            .unwrap()
            .iter()
            .map(|e| e.model_id)
            .collect();
        assert_eq!(ids, vec![7]);
    }

    #[tokio::test]
    async fn test_bulk_remove() {
        let store = store().await;

        for (model_id, added_at) in [(1, 10), (2, 20), (3, 30)] {
            store
                .add_model(&entry(DEFAULT_COLLECTION_ID, model_id, added_at))
                .await
                .unwrap();
        }

        store
            .bulk_remove_models(DEFAULT_COLLECTION_ID, &[1, 3])
            .await
            .unwrap();

        let ids: Vec<i64> = store
            .models_in(DEFAULT_COLLECTION_ID)
            .await
            .unwrap()
            .iter()
            .map(|e| e.model_id)
            .collect();
        assert_eq!(ids, vec![2]);
    }

    #[tokio::test]
    async fn test_readd_replaces_entry() {
        let store = store().await;

        store
            .add_model(&entry(DEFAULT_COLLECTION_ID, 1, 10))
            .await
            .unwrap();
        store
            .add_model(&entry(DEFAULT_COLLECTION_ID, 1, 99))
            .await
            .unwrap();

        let entries = store.models_in(DEFAULT_COLLECTION_ID).await.unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].added_at, 99);
    }
}
