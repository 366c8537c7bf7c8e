//! `SQLite` implementations of the excluded-tag and hidden-model stores.

use async_trait::async_trait;
use sqlx::{Row, SqlitePool};

use artdeck_core::domain::{ExcludedTag, HiddenModel};
use artdeck_core::ports::{ExcludedTagStore, HiddenModelStore, RepositoryError};

use super::storage_err;

/// `SQLite` implementation of the `ExcludedTagStore` trait.
pub struct SqliteExcludedTagStore {
    pool: SqlitePool,
}

impl SqliteExcludedTagStore {
    /// Create a new `SQLite` excluded-tag store.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ExcludedTagStore for SqliteExcludedTagStore {
    async fn list(&self) -> Result<Vec<ExcludedTag>, RepositoryError> {
        let rows = sqlx::query("SELECT tag, added_at FROM excluded_tags ORDER BY added_at DESC")
            .fetch_all(&self.pool)
            .await
            .map_err(storage_err)?;

        Ok(rows
            .iter()
            .map(|row| ExcludedTag {
                tag: row.get("tag"),
                added_at: row.get("added_at"),
            })
            .collect())
    }

    async fn add(&self, tag: &str, added_at: i64) -> Result<(), RepositoryError> {
        // IGNORE keeps the original added_at on repeat adds.
        sqlx::query("INSERT OR IGNORE INTO excluded_tags (tag, added_at) VALUES (?, ?)")
            .bind(tag)
            .bind(added_at)
            .execute(&self.pool)
            .await
            .map_err(storage_err)?;

        Ok(())
    }

    async fn remove(&self, tag: &str) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM excluded_tags WHERE tag = ?")
            .bind(tag)
            .execute(&self.pool)
            .await
            .map_err(storage_err)?;

        Ok(result.rows_affected() > 0)
    }
}

/// `SQLite` implementation of the `HiddenModelStore` trait.
pub struct SqliteHiddenModelStore {
    pool: SqlitePool,
}

impl SqliteHiddenModelStore {
    /// Create a new `SQLite` hidden-model store.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl HiddenModelStore for SqliteHiddenModelStore {
    async fn list(&self) -> Result<Vec<HiddenModel>, RepositoryError> {
        let rows =
            sqlx::query("SELECT model_id, added_at FROM hidden_models ORDER BY added_at DESC")
                .fetch_all(&self.pool)
                .await
                .map_err(storage_err)?;

        Ok(rows
            .iter()
            .map(|row| HiddenModel {
                model_id: row.get("model_id"),
                added_at: row.get("added_at"),
            })
            .collect())
    }

    async fn add(&self, model_id: i64, added_at: i64) -> Result<(), RepositoryError> {
        sqlx::query("INSERT OR IGNORE INTO hidden_models (model_id, added_at) VALUES (?, ?)")
            .bind(model_id)
            .bind(added_at)
            .execute(&self.pool)
            .await
            .map_err(storage_err)?;

        Ok(())
    }

    async fn remove(&self, model_id: i64) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM hidden_models WHERE model_id = ?")
            .bind(model_id)
            .execute(&self.pool)
            .await
            .map_err(storage_err)?;

        Ok(result.rows_affected() > 0)
    }
}
