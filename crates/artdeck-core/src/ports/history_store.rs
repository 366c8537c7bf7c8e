//! Browsing history store trait definition.

use async_trait::async_trait;

use super::RepositoryError;
use crate::domain::BrowsingHistoryEntry;

/// Persistence for model-detail visits.
#[async_trait]
pub trait BrowsingHistoryStore: Send + Sync {
    /// Record a visit (replace-on-conflict, so a revisit moves the entry to
    /// the top).
    async fn record(&self, entry: &BrowsingHistoryEntry) -> Result<(), RepositoryError>;

    /// The most recent entries, newest first.
    async fn recent(&self, limit: u32) -> Result<Vec<BrowsingHistoryEntry>, RepositoryError>;

    /// Delete all history. Returns the number of rows removed.
    async fn clear(&self) -> Result<u64, RepositoryError>;
}
