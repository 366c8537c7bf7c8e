//! Collections service.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use tokio::sync::watch;

use super::now_ms;
use crate::domain::{CollectionModelEntry, Model, ModelCollection};
use crate::ports::{CollectionStore, CoreError};

type MemberSender = Arc<watch::Sender<Vec<CollectionModelEntry>>>;

/// Use cases for collections and their membership, with live observation.
///
/// One watch channel carries the collection list; each observed collection
/// gets its own channel for membership snapshots, created lazily on first
/// subscribe.
pub struct CollectionsService {
    store: Arc<dyn CollectionStore>,
    collections: watch::Sender<Vec<ModelCollection>>,
    members: Mutex<HashMap<i64, MemberSender>>,
}

impl CollectionsService {
    /// Build the service, loading the initial collection list.
    pub async fn new(store: Arc<dyn CollectionStore>) -> Result<Self, CoreError> {
        let initial = store.list().await?;
        let (collections, _) = watch::channel(initial);
        Ok(Self {
            store,
            collections,
            members: Mutex::new(HashMap::new()),
        })
    }

    /// Live view of all collections.
    pub fn observe(&self) -> watch::Receiver<Vec<ModelCollection>> {
        self.collections.subscribe()
    }

    /// Live view of one collection's entries, most recently added first.
    pub async fn observe_models(
        &self,
        collection_id: i64,
    ) -> Result<watch::Receiver<Vec<CollectionModelEntry>>, CoreError> {
        let entries = self.store.models_in(collection_id).await?;
        let sender = {
            let mut members = self.members.lock().unwrap();
            Arc::clone(
                members
                    .entry(collection_id)
                    .or_insert_with(|| Arc::new(watch::channel(Vec::new()).0)),
            )
        };
        sender.send_replace(entries);
        Ok(sender.subscribe())
    }

    /// Current collection list.
    pub async fn list(&self) -> Result<Vec<ModelCollection>, CoreError> {
        Ok(self.store.list().await?)
    }

    /// Create a new collection.
    pub async fn create(&self, name: &str) -> Result<ModelCollection, CoreError> {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(CoreError::Validation(
                "collection name must not be empty".to_string(),
            ));
        }
        let collection = self.store.create(trimmed).await?;
        self.emit_collections().await?;
        Ok(collection)
    }

    /// Rename a collection. The default collection is rejected by the
    /// store before any write.
    pub async fn rename(&self, id: i64, name: &str) -> Result<(), CoreError> {
        self.store.rename(id, name).await?;
        self.emit_collections().await
    }

    /// Delete a collection and its entries. The default collection is
    /// rejected by the store before any write.
    pub async fn delete(&self, id: i64) -> Result<(), CoreError> {
        self.store.delete(id).await?;
        self.emit_collections().await?;
        self.emit_members(id).await
    }

    /// Add a model snapshot to a collection (replace-on-conflict).
    pub async fn add_model(&self, collection_id: i64, model: &Model) -> Result<(), CoreError> {
        let entry = CollectionModelEntry::capture(collection_id, model, now_ms());
        self.store.add_model(&entry).await?;
        self.emit_members(collection_id).await?;
        self.emit_collections().await
    }

    /// Remove a model from a collection.
    pub async fn remove_model(&self, collection_id: i64, model_id: i64) -> Result<(), CoreError> {
        self.store.remove_model(collection_id, model_id).await?;
        self.emit_members(collection_id).await?;
        self.emit_collections().await
    }

    /// Remove several models from a collection atomically.
    pub async fn bulk_remove(
        &self,
        collection_id: i64,
        model_ids: &[i64],
    ) -> Result<(), CoreError> {
        self.store.bulk_remove_models(collection_id, model_ids).await?;
        self.emit_members(collection_id).await?;
        self.emit_collections().await
    }

    /// Move models from one collection to another atomically.
    pub async fn bulk_move(&self, from: i64, to: i64, model_ids: &[i64]) -> Result<(), CoreError> {
        self.store.bulk_move_models(from, to, model_ids).await?;
        self.emit_members(from).await?;
        self.emit_members(to).await?;
        self.emit_collections().await
    }

    async fn emit_collections(&self) -> Result<(), CoreError> {
        let list = self.store.list().await?;
        self.collections.send_replace(list);
        Ok(())
    }

    async fn emit_members(&self, collection_id: i64) -> Result<(), CoreError> {
        let sender = {
            let members = self.members.lock().unwrap();
            members.get(&collection_id).map(Arc::clone)
        };
        if let Some(sender) = sender {
            let entries = self.store.models_in(collection_id).await?;
            sender.send_replace(entries);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ModelStats, ModelType, DEFAULT_COLLECTION_ID, DEFAULT_COLLECTION_NAME};
    use crate::ports::RepositoryError;
    use async_trait::async_trait;

    /// In-memory collection store mirroring the SQLite semantics the port
    /// documents, including default-collection protection.
    struct MemoryCollections {
        collections: Mutex<Vec<ModelCollection>>,
        entries: Mutex<Vec<CollectionModelEntry>>,
        next_id: Mutex<i64>,
    }

    impl MemoryCollections {
        fn seeded() -> Self {
            Self {
                collections: Mutex::new(vec![ModelCollection {
                    id: DEFAULT_COLLECTION_ID,
                    name: DEFAULT_COLLECTION_NAME.to_string(),
                    is_default: true,
                    model_count: 0,
                    thumbnail_url: None,
                    created_at: 0,
                    updated_at: 0,
                }]),
                entries: Mutex::new(Vec::new()),
                next_id: Mutex::new(2),
            }
        }
    }

    #[async_trait]
    impl CollectionStore for MemoryCollections {
        async fn list(&self) -> Result<Vec<ModelCollection>, RepositoryError> {
            let entries = self.entries.lock().unwrap();
            Ok(self
                .collections
                .lock()
                .unwrap()
                .iter()
                .map(|c| {
                    let mut c = c.clone();
                    c.model_count =
                        u32::try_from(entries.iter().filter(|e| e.collection_id == c.id).count())
                            .unwrap_or(u32::MAX);
                    c
                })
                .collect())
        }

        async fn get(&self, id: i64) -> Result<Option<ModelCollection>, RepositoryError> {
            Ok(self
                .collections
                .lock()
                .unwrap()
                .iter()
                .find(|c| c.id == id)
                .cloned())
        }

        async fn create(&self, name: &str) -> Result<ModelCollection, RepositoryError> {
            let mut next_id = self.next_id.lock().unwrap();
            let collection = ModelCollection {
                id: *next_id,
                name: name.to_string(),
                is_default: false,
                model_count: 0,
                thumbnail_url: None,
                created_at: 0,
                updated_at: 0,
            };
            *next_id += 1;
            self.collections.lock().unwrap().push(collection.clone());
            Ok(collection)
        }

        async fn rename(&self, id: i64, name: &str) -> Result<(), RepositoryError> {
            if id == DEFAULT_COLLECTION_ID {
                return Err(RepositoryError::Constraint(
                    "default collection cannot be renamed".to_string(),
                ));
            }
            let mut collections = self.collections.lock().unwrap();
            let collection = collections
                .iter_mut()
                .find(|c| c.id == id)
                .ok_or_else(|| RepositoryError::NotFound(format!("collection {id}")))?;
            collection.name = name.to_string();
            Ok(())
        }

        async fn delete(&self, id: i64) -> Result<(), RepositoryError> {
            if id == DEFAULT_COLLECTION_ID {
                return Err(RepositoryError::Constraint(
                    "default collection cannot be deleted".to_string(),
                ));
            }
            self.collections.lock().unwrap().retain(|c| c.id != id);
            self.entries
                .lock()
                .unwrap()
                .retain(|e| e.collection_id != id);
            Ok(())
        }

        async fn models_in(
            &self,
            collection_id: i64,
        ) -> Result<Vec<CollectionModelEntry>, RepositoryError> {
            let mut rows: Vec<CollectionModelEntry> = self
                .entries
                .lock()
                .unwrap()
                .iter()
                .filter(|e| e.collection_id == collection_id)
                .cloned()
                .collect();
            rows.sort_by_key(|e| std::cmp::Reverse(e.added_at));
            Ok(rows)
        }

        async fn contains(
            &self,
            collection_id: i64,
            model_id: i64,
        ) -> Result<bool, RepositoryError> {
            Ok(self
                .entries
                .lock()
                .unwrap()
                .iter()
                .any(|e| e.collection_id == collection_id && e.model_id == model_id))
        }

        async fn add_model(&self, entry: &CollectionModelEntry) -> Result<(), RepositoryError> {
            let mut entries = self.entries.lock().unwrap();
            entries
                .retain(|e| !(e.collection_id == entry.collection_id && e.model_id == entry.model_id));
            entries.push(entry.clone());
            Ok(())
        }

        async fn remove_model(
            &self,
            collection_id: i64,
            model_id: i64,
        ) -> Result<bool, RepositoryError> {
            let mut entries = self.entries.lock().unwrap();
            let before = entries.len();
            entries.retain(|e| !(e.collection_id == collection_id && e.model_id == model_id));
            Ok(entries.len() != before)
        }

        async fn bulk_remove_models(
            &self,
            collection_id: i64,
            model_ids: &[i64],
        ) -> Result<(), RepositoryError> {
            let mut entries = self.entries.lock().unwrap();
            entries
                .retain(|e| !(e.collection_id == collection_id && model_ids.contains(&e.model_id)));
            Ok(())
        }

        async fn bulk_move_models(
            &self,
            from: i64,
            to: i64,
            model_ids: &[i64],
        ) -> Result<(), RepositoryError> {
            let mut entries = self.entries.lock().unwrap();
            for &model_id in model_ids {
                let moved = entries
                    .iter()
                    .find(|e| e.collection_id == from && e.model_id == model_id)
                    .cloned();
                entries.retain(|e| {
                    !((e.collection_id == from || e.collection_id == to)
                        && e.model_id == model_id)
                });
                if let Some(mut entry) = moved {
                    entry.collection_id = to;
                    entries.push(entry);
                }
            }
            Ok(())
        }
    }

    fn model(id: i64) -> Model {
        Model {
            id,
            name: format!("m{id}"),
            description: None,
            model_type: ModelType::Checkpoint,
            nsfw: false,
            tags: vec![],
            creator: None,
            stats: ModelStats::default(),
            versions: vec![],
        }
    }

    async fn service() -> CollectionsService {
        CollectionsService::new(Arc::new(MemoryCollections::seeded()))
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_default_collection_rename_and_delete_rejected() {
        let service = service().await;

        let rename = service.rename(DEFAULT_COLLECTION_ID, "Mine").await;
        assert!(matches!(
            rename,
            Err(CoreError::Repository(RepositoryError::Constraint(_)))
        ));

        let delete = service.delete(DEFAULT_COLLECTION_ID).await;
        assert!(matches!(
            delete,
            Err(CoreError::Repository(RepositoryError::Constraint(_)))
        ));

        // Still present and untouched.
        let collections = service.list().await.unwrap();
        assert_eq!(collections[0].name, DEFAULT_COLLECTION_NAME);
    }

    #[tokio::test]
    async fn test_bulk_move_results_in_membership_not_accumulation() {
        let service = service().await;
        let portraits = service.create("Portraits").await.unwrap();

        service.add_model(DEFAULT_COLLECTION_ID, &model(7)).await.unwrap();
        service.add_model(DEFAULT_COLLECTION_ID, &model(8)).await.unwrap();
        // 7 is already in the target collection too.
        service.add_model(portraits.id, &model(7)).await.unwrap();

        service
            .bulk_move(DEFAULT_COLLECTION_ID, portraits.id, &[7, 8])
            .await
            .unwrap();

        let source = service.observe_models(DEFAULT_COLLECTION_ID).await.unwrap();
        assert!(source.borrow().is_empty());

        let target = service.observe_models(portraits.id).await.unwrap();
        let mut ids: Vec<i64> = target.borrow().iter().map(|e| e.model_id).collect();
        ids.sort_unstable();
        assert_eq!(ids, vec![7, 8]);
    }

    #[tokio::test]
    async fn test_observers_track_membership_mutations() {
        let service = service().await;
        let observer = service.observe_models(DEFAULT_COLLECTION_ID).await.unwrap();
        assert!(observer.borrow().is_empty());

        service.add_model(DEFAULT_COLLECTION_ID, &model(3)).await.unwrap();
        assert_eq!(observer.borrow().len(), 1);

        service
            .remove_model(DEFAULT_COLLECTION_ID, 3)
            .await
            .unwrap();
        assert!(observer.borrow().is_empty());
    }

    #[tokio::test]
    async fn test_collection_list_carries_derived_counts() {
        let service = service().await;
        let observer = service.observe();

        service.add_model(DEFAULT_COLLECTION_ID, &model(1)).await.unwrap();
        service.add_model(DEFAULT_COLLECTION_ID, &model(2)).await.unwrap();

        let collections = observer.borrow();
        assert_eq!(collections[0].model_count, 2);
    }

    #[tokio::test]
    async fn test_create_rejects_blank_names() {
        let service = service().await;
        assert!(matches!(
            service.create("   ").await,
            Err(CoreError::Validation(_))
        ));
    }
}
