//! `SQLite` implementation of the `BrowsingHistoryStore` trait.

use async_trait::async_trait;
use sqlx::{Row, SqlitePool};

use artdeck_core::domain::BrowsingHistoryEntry;
use artdeck_core::ports::{BrowsingHistoryStore, RepositoryError};

use super::storage_err;

/// `SQLite` implementation of the `BrowsingHistoryStore` trait.
pub struct SqliteBrowsingHistoryStore {
    pool: SqlitePool,
}

impl SqliteBrowsingHistoryStore {
    /// Create a new `SQLite` browsing history store.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BrowsingHistoryStore for SqliteBrowsingHistoryStore {
    async fn record(&self, entry: &BrowsingHistoryEntry) -> Result<(), RepositoryError> {
        sqlx::query(
            "INSERT OR REPLACE INTO browsing_history
             (model_id, model_name, thumbnail_url, viewed_at)
             VALUES (?, ?, ?, ?)",
        )
        .bind(entry.model_id)
        .bind(&entry.model_name)
        .bind(&entry.thumbnail_url)
        .bind(entry.viewed_at)
        .execute(&self.pool)
        .await
        .map_err(storage_err)?;

        Ok(())
    }

    async fn recent(&self, limit: u32) -> Result<Vec<BrowsingHistoryEntry>, RepositoryError> {
        let rows = sqlx::query(
            "SELECT model_id, model_name, thumbnail_url, viewed_at
             FROM browsing_history ORDER BY viewed_at DESC LIMIT ?",
        )
        .bind(i64::from(limit))
        .fetch_all(&self.pool)
        .await
        .map_err(storage_err)?;

        Ok(rows
            .iter()
            .map(|row| BrowsingHistoryEntry {
                model_id: row.get("model_id"),
                model_name: row.get("model_name"),
                thumbnail_url: row.get("thumbnail_url"),
                viewed_at: row.get("viewed_at"),
            })
            .collect())
    }

    async fn clear(&self) -> Result<u64, RepositoryError> {
        let result = sqlx::query("DELETE FROM browsing_history")
            .execute(&self.pool)
            .await
            .map_err(storage_err)?;

        Ok(result.rows_affected())
    }
}
