//! Favorites service.

use std::sync::Arc;

use tokio::sync::watch;

use super::now_ms;
use crate::domain::{FavoriteModelSummary, Model};
use crate::ports::{CoreError, FavoriteStore};

/// Use cases for favoriting models, with live observation.
///
/// The watch channel is hot and shared: every subscriber sees the latest
/// full snapshot immediately on subscribe and after every mutation.
pub struct FavoritesService {
    store: Arc<dyn FavoriteStore>,
    snapshot: watch::Sender<Vec<FavoriteModelSummary>>,
}

impl FavoritesService {
    /// Build the service, loading the initial snapshot from the store.
    pub async fn new(store: Arc<dyn FavoriteStore>) -> Result<Self, CoreError> {
        let initial = store.list().await?;
        let (snapshot, _) = watch::channel(initial);
        Ok(Self { store, snapshot })
    }

    /// Live view of the favorites list, most recently favorited first.
    pub fn observe(&self) -> watch::Receiver<Vec<FavoriteModelSummary>> {
        self.snapshot.subscribe()
    }

    /// Current favorites list.
    pub async fn list(&self) -> Result<Vec<FavoriteModelSummary>, CoreError> {
        Ok(self.store.list().await?)
    }

    /// Whether a model is currently favorited.
    pub async fn is_favorited(&self, model_id: i64) -> Result<bool, CoreError> {
        Ok(self.store.get(model_id).await?.is_some())
    }

    /// Toggle favorite state: removes when present, otherwise inserts a
    /// snapshot of the model captured now. Returns the new state.
    pub async fn toggle(&self, model: &Model) -> Result<bool, CoreError> {
        let now_favorited = if self.store.get(model.id).await?.is_some() {
            self.store.remove(model.id).await?;
            false
        } else {
            let favorite = FavoriteModelSummary::capture(model, now_ms());
            self.store.insert(&favorite).await?;
            true
        };
        self.emit().await?;
        Ok(now_favorited)
    }

    /// Remove a favorite directly (no-op if absent).
    pub async fn remove(&self, model_id: i64) -> Result<(), CoreError> {
        self.store.remove(model_id).await?;
        self.emit().await
    }

    async fn emit(&self) -> Result<(), CoreError> {
        let list = self.store.list().await?;
        self.snapshot.send_replace(list);
        Ok(())
    }
}
