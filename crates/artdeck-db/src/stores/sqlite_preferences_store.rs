//! `SQLite` implementation of the `PreferencesStore` trait.

use async_trait::async_trait;
use sqlx::{Row, SqlitePool};

use artdeck_core::domain::{NsfwFilterLevel, SortOrder, TimePeriod, UserPreferences};
use artdeck_core::ports::{PreferencesStore, RepositoryError};

use super::storage_err;

/// `SQLite` implementation of the `PreferencesStore` trait.
///
/// Backed by the singleton `user_preferences` row (id = 1, upsert
/// semantics). Enum columns hold the literal stored names.
pub struct SqlitePreferencesStore {
    pool: SqlitePool,
}

impl SqlitePreferencesStore {
    /// Create a new `SQLite` preferences store.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PreferencesStore for SqlitePreferencesStore {
    async fn load(&self) -> Result<UserPreferences, RepositoryError> {
        let row = sqlx::query(
            "SELECT nsfw_filter_level, default_sort, default_period, grid_columns, api_key
             FROM user_preferences WHERE id = 1",
        )
        .fetch_optional(&self.pool)
        .await
        .map_err(storage_err)?;

        match row {
            Some(row) => {
                let level: String = row.get("nsfw_filter_level");
                let sort: String = row.get("default_sort");
                let period: String = row.get("default_period");
                let columns: i64 = row.get("grid_columns");
                Ok(UserPreferences {
                    nsfw_filter_level: NsfwFilterLevel::from_stored_name(&level),
                    default_sort: SortOrder::from_stored_name(&sort),
                    default_period: TimePeriod::from_stored_name(&period),
                    grid_columns: u8::try_from(columns).unwrap_or(2),
                    api_key: row.get("api_key"),
                })
            }
            None => Ok(UserPreferences::with_defaults()),
        }
    }

    async fn save(&self, preferences: &UserPreferences) -> Result<(), RepositoryError> {
        sqlx::query(
            "INSERT OR REPLACE INTO user_preferences
             (id, nsfw_filter_level, default_sort, default_period, grid_columns, api_key)
             VALUES (1, ?, ?, ?, ?, ?)",
        )
        .bind(preferences.nsfw_filter_level.as_stored_name())
        .bind(preferences.default_sort.as_stored_name())
        .bind(preferences.default_period.as_api_param())
        .bind(i64::from(preferences.grid_columns))
        .bind(&preferences.api_key)
        .execute(&self.pool)
        .await
        .map_err(storage_err)?;

        Ok(())
    }
}
