//! `SQLite` implementation of the `FavoriteStore` trait.

use async_trait::async_trait;
use sqlx::{Row, SqlitePool};

use artdeck_core::domain::{FavoriteModelSummary, ModelType};
use artdeck_core::ports::{FavoriteStore, RepositoryError};

use super::{as_i64, as_u64, storage_err};

const SELECT_COLUMNS: &str = "model_id, name, model_type, nsfw, thumbnail_url, creator_name, \
                              download_count, favorite_count, rating, favorited_at";

fn row_to_favorite(row: &sqlx::sqlite::SqliteRow) -> FavoriteModelSummary {
    let model_type: String = row.get("model_type");
    FavoriteModelSummary {
        model_id: row.get("model_id"),
        name: row.get("name"),
        model_type: ModelType::from_api_param(&model_type),
        nsfw: row.get("nsfw"),
        thumbnail_url: row.get("thumbnail_url"),
        creator_name: row.get("creator_name"),
        download_count: as_u64(row.get("download_count")),
        favorite_count: as_u64(row.get("favorite_count")),
        rating: row.get("rating"),
        favorited_at: row.get("favorited_at"),
    }
}

/// `SQLite` implementation of the `FavoriteStore` trait.
pub struct SqliteFavoriteStore {
    pool: SqlitePool,
}

impl SqliteFavoriteStore {
    /// Create a new `SQLite` favorite store.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl FavoriteStore for SqliteFavoriteStore {
    async fn list(&self) -> Result<Vec<FavoriteModelSummary>, RepositoryError> {
        let query =
            format!("SELECT {SELECT_COLUMNS} FROM favorite_models ORDER BY favorited_at DESC");

        let rows = sqlx::query(&query)
            .fetch_all(&self.pool)
            .await
            .map_err(storage_err)?;

        Ok(rows.iter().map(row_to_favorite).collect())
    }

    async fn get(&self, model_id: i64) -> Result<Option<FavoriteModelSummary>, RepositoryError> {
        let query = format!("SELECT {SELECT_COLUMNS} FROM favorite_models WHERE model_id = ?");

        let row = sqlx::query(&query)
            .bind(model_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(storage_err)?;

        Ok(row.as_ref().map(row_to_favorite))
    }

    async fn insert(&self, favorite: &FavoriteModelSummary) -> Result<(), RepositoryError> {
        sqlx::query(
            r#"INSERT OR REPLACE INTO favorite_models (
                model_id, name, model_type, nsfw, thumbnail_url, creator_name,
                download_count, favorite_count, rating, favorited_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)"#,
        )
        .bind(favorite.model_id)
        .bind(&favorite.name)
        .bind(favorite.model_type.as_api_param())
        .bind(favorite.nsfw)
        .bind(&favorite.thumbnail_url)
        .bind(&favorite.creator_name)
        .bind(as_i64(favorite.download_count))
        .bind(as_i64(favorite.favorite_count))
        .bind(favorite.rating)
        .bind(favorite.favorited_at)
        .execute(&self.pool)
        .await
        .map_err(storage_err)?;

        Ok(())
    }

    async fn remove(&self, model_id: i64) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM favorite_models WHERE model_id = ?")
            .bind(model_id)
            .execute(&self.pool)
            .await
            .map_err(storage_err)?;

        Ok(result.rows_affected() > 0)
    }
}
