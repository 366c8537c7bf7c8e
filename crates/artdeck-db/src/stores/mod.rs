//! `SQLite` implementations of the local-store ports.

mod sqlite_collection_store;
mod sqlite_favorite_store;
mod sqlite_history_store;
mod sqlite_personalization_store;
mod sqlite_preferences_store;
mod sqlite_response_cache;

pub use sqlite_collection_store::SqliteCollectionStore;
pub use sqlite_favorite_store::SqliteFavoriteStore;
pub use sqlite_history_store::SqliteBrowsingHistoryStore;
pub use sqlite_personalization_store::{SqliteExcludedTagStore, SqliteHiddenModelStore};
pub use sqlite_preferences_store::SqlitePreferencesStore;
pub use sqlite_response_cache::SqliteResponseCache;

use artdeck_core::ports::RepositoryError;

/// Map a sqlx error to the port error type.
pub(crate) fn storage_err(error: sqlx::Error) -> RepositoryError {
    RepositoryError::Storage(error.to_string())
}

/// Clamp a non-negative i64 column into u64.
pub(crate) fn as_u64(value: i64) -> u64 {
    u64::try_from(value).unwrap_or(0)
}

/// Clamp a u64 domain count into an i64 column.
pub(crate) fn as_i64(value: u64) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}
