//! Personalization sets: excluded tags, hidden models, browsing history.
//!
//! These hold plain id/tag references only; the catalog model is never
//! owned locally in full.

use serde::{Deserialize, Serialize};

use super::catalog::Model;

/// A tag the user never wants to see results for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExcludedTag {
    pub tag: String,
    /// Milliseconds since epoch.
    pub added_at: i64,
}

/// A model the user has hidden from result streams.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HiddenModel {
    pub model_id: i64,
    /// Milliseconds since epoch.
    pub added_at: i64,
}

/// A model-detail visit. Revisits replace the old entry so the model moves
/// to the top of the history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrowsingHistoryEntry {
    pub model_id: i64,
    pub model_name: String,
    pub thumbnail_url: Option<String>,
    /// Milliseconds since epoch.
    pub viewed_at: i64,
}

impl BrowsingHistoryEntry {
    /// Capture a visit to `model` at `viewed_at`.
    pub fn capture(model: &Model, viewed_at: i64) -> Self {
        Self {
            model_id: model.id,
            model_name: model.name.clone(),
            thumbnail_url: model.thumbnail_url().map(str::to_string),
            viewed_at,
        }
    }
}
