//! Favorites and collections domain types.
//!
//! These are denormalized snapshots captured at favorite/add time. They are
//! intentionally NOT kept in sync with the live catalog model afterwards;
//! replace-on-refavorite is the only mutation.

use serde::{Deserialize, Serialize};

use super::catalog::{Model, ModelType};

/// Reserved id of the always-present "Favorites" collection.
pub const DEFAULT_COLLECTION_ID: i64 = 1;

/// Display name of the default collection.
pub const DEFAULT_COLLECTION_NAME: &str = "Favorites";

/// Snapshot of a model taken when the user favorited it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FavoriteModelSummary {
    /// Catalog id of the favorited model.
    pub model_id: i64,
    pub name: String,
    pub model_type: ModelType,
    pub nsfw: bool,
    pub thumbnail_url: Option<String>,
    pub creator_name: Option<String>,
    pub download_count: u64,
    pub favorite_count: u64,
    pub rating: f64,
    /// Milliseconds since epoch.
    pub favorited_at: i64,
}

impl FavoriteModelSummary {
    /// Capture a snapshot of `model` at `favorited_at`.
    pub fn capture(model: &Model, favorited_at: i64) -> Self {
        Self {
            model_id: model.id,
            name: model.name.clone(),
            model_type: model.model_type,
            nsfw: model.nsfw,
            thumbnail_url: model.thumbnail_url().map(str::to_string),
            creator_name: model.creator.as_ref().map(|c| c.username.clone()),
            download_count: model.stats.download_count,
            favorite_count: model.stats.favorite_count,
            rating: model.stats.rating,
            favorited_at,
        }
    }
}

/// A user-defined grouping of models.
///
/// `model_count` and `thumbnail_url` are derived from the entries table,
/// not stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelCollection {
    pub id: i64,
    pub name: String,
    pub is_default: bool,
    pub model_count: u32,
    /// Thumbnail of the most-recently-added member.
    pub thumbnail_url: Option<String>,
    /// Milliseconds since epoch.
    pub created_at: i64,
    /// Milliseconds since epoch.
    pub updated_at: i64,
}

impl ModelCollection {
    /// Whether this is the protected default collection.
    pub const fn is_protected(&self) -> bool {
        self.id == DEFAULT_COLLECTION_ID
    }
}

/// Membership of a model in a collection, with a denormalized summary so the
/// collection can render without refetching the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollectionModelEntry {
    pub collection_id: i64,
    pub model_id: i64,
    pub name: String,
    pub model_type: ModelType,
    pub nsfw: bool,
    pub thumbnail_url: Option<String>,
    pub creator_name: Option<String>,
    /// Milliseconds since epoch.
    pub added_at: i64,
}

impl CollectionModelEntry {
    /// Capture a membership snapshot of `model` at `added_at`.
    pub fn capture(collection_id: i64, model: &Model, added_at: i64) -> Self {
        Self {
            collection_id,
            model_id: model.id,
            name: model.name.clone(),
            model_type: model.model_type,
            nsfw: model.nsfw,
            thumbnail_url: model.thumbnail_url().map(str::to_string),
            creator_name: model.creator.as_ref().map(|c| c.username.clone()),
            added_at,
        }
    }
}
