//! Port definitions (trait abstractions) for external systems.
//!
//! Ports define the interfaces the core domain expects from infrastructure.
//! They contain no implementation details and use only domain types.
//!
//! # Design Rules
//!
//! - No `sqlx` or `reqwest` types in any signature
//! - Traits are minimal and CRUD-focused for stores
//! - The catalog HTTP port returns raw JSON bodies; parsing and mapping
//!   happen in core so cached and fresh responses share one path

pub mod catalog_http;
pub mod collection_store;
pub mod favorite_store;
pub mod history_store;
pub mod personalization;
pub mod preferences_store;
pub mod response_cache;

use std::sync::Arc;
use thiserror::Error;

pub use catalog_http::{CatalogFetchError, CatalogHttp};
pub use collection_store::CollectionStore;
pub use favorite_store::FavoriteStore;
pub use history_store::BrowsingHistoryStore;
pub use personalization::{ExcludedTagStore, HiddenModelStore};
pub use preferences_store::PreferencesStore;
pub use response_cache::{ResponseCache, DEFAULT_CACHE_TTL};

/// Container for all local-store trait objects.
///
/// Provides a consistent way to wire stores across adapters without
/// coupling them to concrete implementations. Lives in `artdeck-core` so
/// services can accept it without depending on `artdeck-db`.
#[derive(Clone)]
pub struct Stores {
    pub favorites: Arc<dyn FavoriteStore>,
    pub collections: Arc<dyn CollectionStore>,
    pub preferences: Arc<dyn PreferencesStore>,
    pub response_cache: Arc<dyn ResponseCache>,
    pub excluded_tags: Arc<dyn ExcludedTagStore>,
    pub hidden_models: Arc<dyn HiddenModelStore>,
    pub history: Arc<dyn BrowsingHistoryStore>,
}

/// Domain-specific errors for local-store operations.
///
/// Abstracts away storage implementation details (e.g. sqlx errors) and
/// provides a clean interface for services to handle storage failures.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// The requested entity was not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// An entity with the same identifier already exists.
    #[error("Already exists: {0}")]
    AlreadyExists(String),

    /// Storage backend error (database, filesystem, etc.).
    #[error("Storage error: {0}")]
    Storage(String),

    /// Serialization or deserialization failed.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// A constraint was violated (e.g. mutating the default collection).
    #[error("Constraint violation: {0}")]
    Constraint(String),
}

/// Domain-level failure of a catalog fetch.
///
/// Carries a human-readable message; the presentation layer is expected to
/// surface it verbatim. An empty page is never represented as an error and
/// an error is never collapsed into an empty page.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The remote fetch failed after exhausting the retry budget.
    #[error("Fetch failed: {0}")]
    Fetch(String),

    /// The response body (fresh or cached) did not match the expected
    /// shape beyond what lenient defaults can absorb.
    #[error("Invalid response: {0}")]
    Decode(String),
}

/// Core error type for semantic domain errors.
///
/// The canonical error type across services. Adapters map this to their own
/// surface (exit codes, serialized errors, user-facing messages).
#[derive(Debug, Error)]
pub enum CoreError {
    /// Local-store operation failed.
    #[error(transparent)]
    Repository(#[from] RepositoryError),

    /// Catalog fetch failed.
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// Validation error (invalid input).
    #[error("Validation error: {0}")]
    Validation(String),
}
