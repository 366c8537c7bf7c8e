//! `SQLite` store implementations for artdeck.
//!
//! Implements the local-store ports from `artdeck-core`: favorites,
//! collections, cached API responses, user preferences, excluded tags,
//! hidden models and browsing history. The schema here is the durable
//! contract that survives app restarts: timestamps are milliseconds since
//! epoch, enums are stored as their literal names.

pub mod factory;
pub mod setup;

mod stores;

pub use factory::StoreFactory;
pub use setup::setup_database;
#[cfg(any(test, feature = "test-utils"))]
pub use setup::setup_test_database;
pub use stores::{
    SqliteBrowsingHistoryStore, SqliteCollectionStore, SqliteExcludedTagStore,
    SqliteFavoriteStore, SqliteHiddenModelStore, SqlitePreferencesStore, SqliteResponseCache,
};
