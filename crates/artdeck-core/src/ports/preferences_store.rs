//! Preferences store trait definition.

use async_trait::async_trait;

use super::RepositoryError;
use crate::domain::UserPreferences;

/// Persistence for the singleton preferences row.
///
/// Exactly one row exists at all times; `save` has upsert semantics and
/// `load` returns defaults if setup has not seeded the row yet.
#[async_trait]
pub trait PreferencesStore: Send + Sync {
    /// Load current preferences.
    async fn load(&self) -> Result<UserPreferences, RepositoryError>;

    /// Persist preferences (upsert on the singleton row).
    async fn save(&self, preferences: &UserPreferences) -> Result<(), RepositoryError>;
}
