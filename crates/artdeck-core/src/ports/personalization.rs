//! Excluded-tag and hidden-model store traits.
//!
//! Both are independent append/remove sets; adding an existing entry is a
//! no-op so the operations are idempotent.

use async_trait::async_trait;

use super::RepositoryError;
use crate::domain::{ExcludedTag, HiddenModel};

/// Persistence for tags the user has excluded from result streams.
#[async_trait]
pub trait ExcludedTagStore: Send + Sync {
    /// List all excluded tags, most recently added first.
    async fn list(&self) -> Result<Vec<ExcludedTag>, RepositoryError>;

    /// Add a tag to the exclusion set (no-op if present).
    async fn add(&self, tag: &str, added_at: i64) -> Result<(), RepositoryError>;

    /// Remove a tag. Returns `true` if a row was deleted.
    async fn remove(&self, tag: &str) -> Result<bool, RepositoryError>;
}

/// Persistence for models the user has hidden.
#[async_trait]
pub trait HiddenModelStore: Send + Sync {
    /// List all hidden models, most recently hidden first.
    async fn list(&self) -> Result<Vec<HiddenModel>, RepositoryError>;

    /// Hide a model (no-op if already hidden).
    async fn add(&self, model_id: i64, added_at: i64) -> Result<(), RepositoryError>;

    /// Unhide a model. Returns `true` if a row was deleted.
    async fn remove(&self, model_id: i64) -> Result<bool, RepositoryError>;
}
