//! Excluded-tag and hidden-model services.

use std::collections::HashSet;
use std::sync::Arc;

use tokio::sync::watch;

use super::now_ms;
use crate::domain::{ExcludedTag, HiddenModel};
use crate::ports::{CoreError, ExcludedTagStore, HiddenModelStore};

/// Use cases for the excluded-tag set, with live observation.
pub struct ExcludedTagsService {
    store: Arc<dyn ExcludedTagStore>,
    snapshot: watch::Sender<Vec<ExcludedTag>>,
}

impl ExcludedTagsService {
    pub async fn new(store: Arc<dyn ExcludedTagStore>) -> Result<Self, CoreError> {
        let initial = store.list().await?;
        let (snapshot, _) = watch::channel(initial);
        Ok(Self { store, snapshot })
    }

    pub fn observe(&self) -> watch::Receiver<Vec<ExcludedTag>> {
        self.snapshot.subscribe()
    }

    pub async fn list(&self) -> Result<Vec<ExcludedTag>, CoreError> {
        Ok(self.store.list().await?)
    }

    /// The excluded tags as a set, for feeding
    /// [`crate::filters::filter_excluded_tags`].
    pub async fn excluded_set(&self) -> Result<HashSet<String>, CoreError> {
        Ok(self
            .store
            .list()
            .await?
            .into_iter()
            .map(|entry| entry.tag)
            .collect())
    }

    /// Add a tag to the exclusion set (idempotent).
    pub async fn add(&self, tag: &str) -> Result<(), CoreError> {
        let trimmed = tag.trim();
        if trimmed.is_empty() {
            return Err(CoreError::Validation("tag must not be empty".to_string()));
        }
        self.store.add(trimmed, now_ms()).await?;
        self.emit().await
    }

    /// Remove a tag from the exclusion set.
    pub async fn remove(&self, tag: &str) -> Result<(), CoreError> {
        self.store.remove(tag).await?;
        self.emit().await
    }

    async fn emit(&self) -> Result<(), CoreError> {
        let list = self.store.list().await?;
        self.snapshot.send_replace(list);
        Ok(())
    }
}

/// Use cases for the hidden-model set, with live observation.
pub struct HiddenModelsService {
    store: Arc<dyn HiddenModelStore>,
    snapshot: watch::Sender<Vec<HiddenModel>>,
}

impl HiddenModelsService {
    pub async fn new(store: Arc<dyn HiddenModelStore>) -> Result<Self, CoreError> {
        let initial = store.list().await?;
        let (snapshot, _) = watch::channel(initial);
        Ok(Self { store, snapshot })
    }

    pub fn observe(&self) -> watch::Receiver<Vec<HiddenModel>> {
        self.snapshot.subscribe()
    }

    pub async fn list(&self) -> Result<Vec<HiddenModel>, CoreError> {
        Ok(self.store.list().await?)
    }

    /// The hidden ids as a set, for feeding
    /// [`crate::filters::filter_hidden_models`].
    pub async fn hidden_set(&self) -> Result<HashSet<i64>, CoreError> {
        Ok(self
            .store
            .list()
            .await?
            .into_iter()
            .map(|entry| entry.model_id)
            .collect())
    }

    /// Hide a model (idempotent).
    pub async fn hide(&self, model_id: i64) -> Result<(), CoreError> {
        self.store.add(model_id, now_ms()).await?;
        self.emit().await
    }

    /// Unhide a model.
    pub async fn unhide(&self, model_id: i64) -> Result<(), CoreError> {
        self.store.remove(model_id).await?;
        self.emit().await
    }

    async fn emit(&self) -> Result<(), CoreError> {
        let list = self.store.list().await?;
        self.snapshot.send_replace(list);
        Ok(())
    }
}
