//! Preferences service.

use std::sync::Arc;

use tokio::sync::watch;

use crate::domain::{NsfwFilterLevel, PreferencesUpdate, UserPreferences};
use crate::ports::{CoreError, PreferencesStore};

/// Grid column bounds accepted by the UI.
const GRID_COLUMNS_RANGE: std::ops::RangeInclusive<u8> = 1..=6;

fn validate(preferences: &UserPreferences) -> Result<(), CoreError> {
    if !GRID_COLUMNS_RANGE.contains(&preferences.grid_columns) {
        return Err(CoreError::Validation(format!(
            "grid columns must be between {} and {}",
            GRID_COLUMNS_RANGE.start(),
            GRID_COLUMNS_RANGE.end()
        )));
    }
    Ok(())
}

/// Use cases for the singleton preferences row, with live observation.
pub struct PreferencesService {
    store: Arc<dyn PreferencesStore>,
    snapshot: watch::Sender<UserPreferences>,
}

impl PreferencesService {
    /// Build the service, loading the current preferences.
    pub async fn new(store: Arc<dyn PreferencesStore>) -> Result<Self, CoreError> {
        let initial = store.load().await?;
        let (snapshot, _) = watch::channel(initial);
        Ok(Self { store, snapshot })
    }

    /// Live view of the preferences.
    pub fn observe(&self) -> watch::Receiver<UserPreferences> {
        self.snapshot.subscribe()
    }

    /// Current preferences.
    pub async fn get(&self) -> Result<UserPreferences, CoreError> {
        Ok(self.store.load().await?)
    }

    /// Apply a partial update (load, merge, validate, upsert).
    pub async fn update(&self, update: PreferencesUpdate) -> Result<UserPreferences, CoreError> {
        let mut current = self.store.load().await?;
        current.merge(&update);
        validate(&current)?;
        self.store.save(&current).await?;
        self.snapshot.send_replace(current.clone());
        Ok(current)
    }

    /// Set the NSFW filter level.
    pub async fn set_nsfw_filter_level(&self, level: NsfwFilterLevel) -> Result<(), CoreError> {
        self.update(PreferencesUpdate {
            nsfw_filter_level: Some(level),
            ..Default::default()
        })
        .await?;
        Ok(())
    }

    /// Set or clear the catalog API key.
    pub async fn set_api_key(&self, api_key: Option<String>) -> Result<(), CoreError> {
        self.update(PreferencesUpdate {
            api_key: Some(api_key),
            ..Default::default()
        })
        .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::RepositoryError;
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct MemoryPreferences {
        row: Mutex<UserPreferences>,
    }

    impl MemoryPreferences {
        fn new() -> Self {
            Self {
                row: Mutex::new(UserPreferences::with_defaults()),
            }
        }
    }

    #[async_trait]
    impl PreferencesStore for MemoryPreferences {
        async fn load(&self) -> Result<UserPreferences, RepositoryError> {
            Ok(self.row.lock().unwrap().clone())
        }

        async fn save(&self, preferences: &UserPreferences) -> Result<(), RepositoryError> {
            *self.row.lock().unwrap() = preferences.clone();
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_defaults_load() {
        let service = PreferencesService::new(Arc::new(MemoryPreferences::new()))
            .await
            .unwrap();
        let preferences = service.get().await.unwrap();
        assert_eq!(preferences.nsfw_filter_level, NsfwFilterLevel::Off);
        assert_eq!(preferences.grid_columns, 2);
    }

    #[tokio::test]
    async fn test_update_persists_and_notifies() {
        let service = PreferencesService::new(Arc::new(MemoryPreferences::new()))
            .await
            .unwrap();
        let observer = service.observe();

        service
            .set_nsfw_filter_level(NsfwFilterLevel::Soft)
            .await
            .unwrap();

        assert_eq!(
            observer.borrow().nsfw_filter_level,
            NsfwFilterLevel::Soft
        );
        assert_eq!(
            service.get().await.unwrap().nsfw_filter_level,
            NsfwFilterLevel::Soft
        );
    }

    #[tokio::test]
    async fn test_invalid_grid_columns_rejected_without_write() {
        let service = PreferencesService::new(Arc::new(MemoryPreferences::new()))
            .await
            .unwrap();

        let result = service
            .update(PreferencesUpdate {
                grid_columns: Some(0),
                ..Default::default()
            })
            .await;
        assert!(matches!(result, Err(CoreError::Validation(_))));

        // Stored value untouched.
        assert_eq!(service.get().await.unwrap().grid_columns, 2);
    }

    #[tokio::test]
    async fn test_api_key_set_and_clear() {
        let service = PreferencesService::new(Arc::new(MemoryPreferences::new()))
            .await
            .unwrap();

        service
            .set_api_key(Some("key-123".to_string()))
            .await
            .unwrap();
        assert_eq!(service.get().await.unwrap().api_key.as_deref(), Some("key-123"));

        service.set_api_key(None).await.unwrap();
        assert!(service.get().await.unwrap().api_key.is_none());
    }
}
