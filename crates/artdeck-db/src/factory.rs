//! Composition utilities for wiring core services with `SQLite` backends.
//!
//! Construction only; no domain logic lives here.

use sqlx::SqlitePool;
use std::sync::Arc;

use artdeck_core::ports::Stores;

use crate::stores::{
    SqliteBrowsingHistoryStore, SqliteCollectionStore, SqliteExcludedTagStore,
    SqliteFavoriteStore, SqliteHiddenModelStore, SqlitePreferencesStore, SqliteResponseCache,
};

/// Factory for creating store instances with `SQLite` backends.
pub struct StoreFactory;

impl StoreFactory {
    /// Build all `SQLite` stores from a pool.
    ///
    /// This is the recommended way for adapters to obtain stores. Returns
    /// the `Stores` container from `artdeck-core` with trait-object-wrapped
    /// implementations.
    pub fn build_stores(pool: SqlitePool) -> Stores {
        Stores {
            favorites: Arc::new(SqliteFavoriteStore::new(pool.clone())),
            collections: Arc::new(SqliteCollectionStore::new(pool.clone())),
            preferences: Arc::new(SqlitePreferencesStore::new(pool.clone())),
            response_cache: Arc::new(SqliteResponseCache::new(pool.clone())),
            excluded_tags: Arc::new(SqliteExcludedTagStore::new(pool.clone())),
            hidden_models: Arc::new(SqliteHiddenModelStore::new(pool.clone())),
            history: Arc::new(SqliteBrowsingHistoryStore::new(pool)),
        }
    }

    /// Create a favorite store from a pool.
    pub fn favorite_store(pool: SqlitePool) -> Arc<SqliteFavoriteStore> {
        Arc::new(SqliteFavoriteStore::new(pool))
    }

    /// Create a collection store from a pool.
    pub fn collection_store(pool: SqlitePool) -> Arc<SqliteCollectionStore> {
        Arc::new(SqliteCollectionStore::new(pool))
    }

    /// Create a response cache from a pool.
    pub fn response_cache(pool: SqlitePool) -> Arc<SqliteResponseCache> {
        Arc::new(SqliteResponseCache::new(pool))
    }

    /// Create a preferences store from a pool.
    pub fn preferences_store(pool: SqlitePool) -> Arc<SqlitePreferencesStore> {
        Arc::new(SqlitePreferencesStore::new(pool))
    }
}
