//! Favorite store trait definition.

use async_trait::async_trait;

use super::RepositoryError;
use crate::domain::FavoriteModelSummary;

/// Persistence for favorited-model snapshots.
///
/// Rows are denormalized snapshots captured at favorite time; re-favoriting
/// replaces the old snapshot rather than merging.
#[async_trait]
pub trait FavoriteStore: Send + Sync {
    /// List all favorites, most recently favorited first.
    async fn list(&self) -> Result<Vec<FavoriteModelSummary>, RepositoryError>;

    /// Look up a favorite by model id.
    async fn get(&self, model_id: i64) -> Result<Option<FavoriteModelSummary>, RepositoryError>;

    /// Insert a favorite snapshot (replace-on-conflict).
    async fn insert(&self, favorite: &FavoriteModelSummary) -> Result<(), RepositoryError>;

    /// Remove a favorite. Returns `true` if a row was deleted.
    async fn remove(&self, model_id: i64) -> Result<bool, RepositoryError>;
}
