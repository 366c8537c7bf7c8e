//! Browsing history service.

use std::sync::Arc;

use tokio::sync::watch;

use super::now_ms;
use crate::domain::{BrowsingHistoryEntry, Model};
use crate::ports::{BrowsingHistoryStore, CoreError};

/// How many entries the observation snapshot carries.
const OBSERVE_LIMIT: u32 = 100;

/// Use cases for browsing history, with live observation.
pub struct BrowsingHistoryService {
    store: Arc<dyn BrowsingHistoryStore>,
    snapshot: watch::Sender<Vec<BrowsingHistoryEntry>>,
}

impl BrowsingHistoryService {
    pub async fn new(store: Arc<dyn BrowsingHistoryStore>) -> Result<Self, CoreError> {
        let initial = store.recent(OBSERVE_LIMIT).await?;
        let (snapshot, _) = watch::channel(initial);
        Ok(Self { store, snapshot })
    }

    pub fn observe(&self) -> watch::Receiver<Vec<BrowsingHistoryEntry>> {
        self.snapshot.subscribe()
    }

    /// Record a model-detail visit. A revisit replaces the old entry and
    /// moves the model to the top.
    pub async fn record_view(&self, model: &Model) -> Result<(), CoreError> {
        let entry = BrowsingHistoryEntry::capture(model, now_ms());
        self.store.record(&entry).await?;
        self.emit().await
    }

    /// The most recent entries, newest first.
    pub async fn recent(&self, limit: u32) -> Result<Vec<BrowsingHistoryEntry>, CoreError> {
        Ok(self.store.recent(limit).await?)
    }

    /// Delete all history.
    pub async fn clear(&self) -> Result<(), CoreError> {
        self.store.clear().await?;
        self.emit().await
    }

    async fn emit(&self) -> Result<(), CoreError> {
        let list = self.store.recent(OBSERVE_LIMIT).await?;
        self.snapshot.send_replace(list);
        Ok(())
    }
}
