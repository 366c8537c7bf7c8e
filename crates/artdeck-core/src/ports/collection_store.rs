//! Collection store trait definition.

use async_trait::async_trait;

use super::RepositoryError;
use crate::domain::{CollectionModelEntry, ModelCollection};

/// Persistence for collections and their model entries.
///
/// Collection id 1 is the reserved default "Favorites" collection:
/// implementations seed it at setup and reject `rename`/`delete` against it
/// with [`RepositoryError::Constraint`] before any write happens.
///
/// All multi-row mutations (`bulk_remove_models`, `bulk_move_models`) are
/// atomic: either all rows change or none do.
#[async_trait]
pub trait CollectionStore: Send + Sync {
    /// List all collections with derived counts and thumbnails, default
    /// collection first, then most recently created.
    async fn list(&self) -> Result<Vec<ModelCollection>, RepositoryError>;

    /// Look up a collection by id.
    async fn get(&self, id: i64) -> Result<Option<ModelCollection>, RepositoryError>;

    /// Create a new collection and return it.
    async fn create(&self, name: &str) -> Result<ModelCollection, RepositoryError>;

    /// Rename a collection. Rejects the default collection.
    async fn rename(&self, id: i64, name: &str) -> Result<(), RepositoryError>;

    /// Delete a collection and (by cascade) its entries. Rejects the
    /// default collection.
    async fn delete(&self, id: i64) -> Result<(), RepositoryError>;

    /// List entries of a collection, most recently added first.
    async fn models_in(
        &self,
        collection_id: i64,
    ) -> Result<Vec<CollectionModelEntry>, RepositoryError>;

    /// Whether a collection contains a model.
    async fn contains(&self, collection_id: i64, model_id: i64)
        -> Result<bool, RepositoryError>;

    /// Add a membership snapshot (replace-on-conflict).
    async fn add_model(&self, entry: &CollectionModelEntry) -> Result<(), RepositoryError>;

    /// Remove a model from a collection. Returns `true` if a row was
    /// deleted.
    async fn remove_model(
        &self,
        collection_id: i64,
        model_id: i64,
    ) -> Result<bool, RepositoryError>;

    /// Remove several models from a collection atomically.
    async fn bulk_remove_models(
        &self,
        collection_id: i64,
        model_ids: &[i64],
    ) -> Result<(), RepositoryError>;

    /// Move models between collections as a remove-then-insert per id,
    /// atomically. If `to` already contains an id the `from` entry is still
    /// removed — the net effect is membership, not accumulation.
    async fn bulk_move_models(
        &self,
        from: i64,
        to: i64,
        model_ids: &[i64],
    ) -> Result<(), RepositoryError>;
}
