//! Catalog service: cache-or-fetch access to the remote catalog.
//!
//! Composes the HTTP port with the response cache. Every paginated call
//! builds a deterministic cache key, consults the cache within the TTL,
//! falls back to the remote on miss, and persists the raw body
//! asynchronously so the caller never waits on a cache write.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::cache_key;
use crate::domain::{
    Creator, CreatorQuery, Image, ImageQuery, Model, ModelQuery, ModelVersion, PaginatedResult,
    TagInfo, TagQuery,
};
use crate::dto::{
    CreatorsResponseDto, ImagesResponseDto, ModelDto, ModelVersionDto, ModelsResponseDto,
    TagsResponseDto,
};
use crate::mapper;
use crate::ports::{
    catalog_http::CatalogFetchResult, CatalogError, CatalogHttp, ResponseCache, DEFAULT_CACHE_TTL,
};

/// Spawn a background task sweeping expired cache rows every `period`.
///
/// Reads never delete expired entries, so something has to. The returned
/// handle can be aborted at shutdown; sweep failures are logged and the
/// loop keeps going.
pub fn spawn_cache_sweep(
    cache: Arc<dyn ResponseCache>,
    ttl: Duration,
    period: Duration,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(period);
        // The first tick completes immediately; skip it.
        interval.tick().await;
        loop {
            interval.tick().await;
            match cache.clear_expired(ttl).await {
                Ok(0) => {}
                Ok(removed) => debug!(removed, "removed expired cached responses"),
                Err(error) => warn!(%error, "cache sweep failed"),
            }
        }
    })
}

/// Domain-typed access to the catalog, backed by the response cache.
pub struct CatalogService {
    http: Arc<dyn CatalogHttp>,
    cache: Arc<dyn ResponseCache>,
    ttl: Duration,
}

impl CatalogService {
    pub fn new(http: Arc<dyn CatalogHttp>, cache: Arc<dyn ResponseCache>) -> Self {
        Self {
            http,
            cache,
            ttl: DEFAULT_CACHE_TTL,
        }
    }

    /// Override the cache TTL (default 15 minutes).
    pub const fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    /// Cache-or-fetch a response body and deserialize it.
    ///
    /// Cache problems never fail the call: a read error or an undecodable
    /// cached payload falls through to the remote, and the write-back runs
    /// on its own task with failures logged and dropped.
    async fn fetch_cached<T, F, Fut>(&self, key: String, fetch: F) -> Result<T, CatalogError>
    where
        T: DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = CatalogFetchResult>,
    {
        match self.cache.get(&key, self.ttl).await {
            Ok(Some(json)) => match serde_json::from_str::<T>(&json) {
                Ok(value) => {
                    debug!(key = %key, "serving catalog response from cache");
                    return Ok(value);
                }
                Err(error) => {
                    warn!(key = %key, %error, "cached payload undecodable, refetching");
                }
            },
            Ok(None) => debug!(key = %key, "cache miss"),
            Err(error) => warn!(key = %key, %error, "cache read failed, falling back to remote"),
        }

        let body = fetch()
            .await
            .map_err(|error| CatalogError::Fetch(error.to_string()))?;
        let value: T =
            serde_json::from_str(&body).map_err(|error| CatalogError::Decode(error.to_string()))?;

        let cache = Arc::clone(&self.cache);
        tokio::spawn(async move {
            if let Err(error) = cache.put(&key, &body).await {
                warn!(key = %key, %error, "cache write failed");
            }
        });

        Ok(value)
    }

    /// Search models. One page per call; pass the returned cursor to get
    /// the next page.
    pub async fn search_models(
        &self,
        query: &ModelQuery,
    ) -> Result<PaginatedResult<Model>, CatalogError> {
        let key = cache_key::models_key(query);
        let dto: ModelsResponseDto = self
            .fetch_cached(key, || self.http.get_models(query))
            .await?;
        Ok(mapper::map_models_response(dto))
    }

    /// Fetch a single model with all its versions.
    pub async fn get_model(&self, id: i64) -> Result<Model, CatalogError> {
        let key = cache_key::model_key(id);
        let dto: ModelDto = self.fetch_cached(key, || self.http.get_model(id)).await?;
        Ok(mapper::map_model(dto))
    }

    /// Fetch a single model version.
    pub async fn get_model_version(&self, id: i64) -> Result<ModelVersion, CatalogError> {
        let key = cache_key::model_version_key(id);
        let dto: ModelVersionDto = self
            .fetch_cached(key, || self.http.get_model_version(id))
            .await?;
        let parent = dto.model_id.unwrap_or_default();
        Ok(mapper::map_version(dto, parent))
    }

    /// Look up a model version by file hash.
    pub async fn get_model_version_by_hash(
        &self,
        hash: &str,
    ) -> Result<ModelVersion, CatalogError> {
        let key = cache_key::model_version_by_hash_key(hash);
        let dto: ModelVersionDto = self
            .fetch_cached(key, || self.http.get_model_version_by_hash(hash))
            .await?;
        let parent = dto.model_id.unwrap_or_default();
        Ok(mapper::map_version(dto, parent))
    }

    /// Search gallery images.
    pub async fn search_images(
        &self,
        query: &ImageQuery,
    ) -> Result<PaginatedResult<Image>, CatalogError> {
        let key = cache_key::images_key(query);
        let dto: ImagesResponseDto = self
            .fetch_cached(key, || self.http.get_images(query))
            .await?;
        Ok(mapper::map_images_response(dto))
    }

    /// Search creators.
    pub async fn search_creators(
        &self,
        query: &CreatorQuery,
    ) -> Result<PaginatedResult<Creator>, CatalogError> {
        let key = cache_key::creators_key(query);
        let dto: CreatorsResponseDto = self
            .fetch_cached(key, || self.http.get_creators(query))
            .await?;
        Ok(mapper::map_creators_response(dto))
    }

    /// Search tags.
    pub async fn search_tags(
        &self,
        query: &TagQuery,
    ) -> Result<PaginatedResult<TagInfo>, CatalogError> {
        let key = cache_key::tags_key(query);
        let dto: TagsResponseDto = self.fetch_cached(key, || self.http.get_tags(query)).await?;
        Ok(mapper::map_tags_response(dto))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::{CatalogFetchError, RepositoryError};
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    struct FakeHttp {
        body: Result<String, String>,
        calls: AtomicUsize,
    }

    impl FakeHttp {
        fn returning(body: &str) -> Self {
            Self {
                body: Ok(body.to_string()),
                calls: AtomicUsize::new(0),
            }
        }

        fn failing(message: &str) -> Self {
            Self {
                body: Err(message.to_string()),
                calls: AtomicUsize::new(0),
            }
        }

        fn respond(&self) -> CatalogFetchResult {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.body
                .clone()
                .map_err(|message| CatalogFetchError::Network(message))
        }

        fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl CatalogHttp for FakeHttp {
        async fn get_models(&self, _query: &ModelQuery) -> CatalogFetchResult {
            self.respond()
        }
        async fn get_model(&self, _id: i64) -> CatalogFetchResult {
            self.respond()
        }
        async fn get_model_version(&self, _id: i64) -> CatalogFetchResult {
            self.respond()
        }
        async fn get_model_version_by_hash(&self, _hash: &str) -> CatalogFetchResult {
            self.respond()
        }
        async fn get_images(&self, _query: &ImageQuery) -> CatalogFetchResult {
            self.respond()
        }
        async fn get_creators(&self, _query: &CreatorQuery) -> CatalogFetchResult {
            self.respond()
        }
        async fn get_tags(&self, _query: &TagQuery) -> CatalogFetchResult {
            self.respond()
        }
    }

    #[derive(Default)]
    struct MemoryCache {
        entries: Mutex<HashMap<String, String>>,
        broken: bool,
    }

    impl MemoryCache {
        fn contains(&self, key: &str) -> bool {
            self.entries.lock().unwrap().contains_key(key)
        }

        fn seed(&self, key: &str, json: &str) {
            self.entries
                .lock()
                .unwrap()
                .insert(key.to_string(), json.to_string());
        }
    }

    #[async_trait]
    impl ResponseCache for MemoryCache {
        async fn get(&self, key: &str, _ttl: Duration) -> Result<Option<String>, RepositoryError> {
            if self.broken {
                return Err(RepositoryError::Storage("disk full".to_string()));
            }
            Ok(self.entries.lock().unwrap().get(key).cloned())
        }

        async fn put(&self, key: &str, json: &str) -> Result<(), RepositoryError> {
            if self.broken {
                return Err(RepositoryError::Storage("disk full".to_string()));
            }
            self.entries
                .lock()
                .unwrap()
                .insert(key.to_string(), json.to_string());
            Ok(())
        }

        async fn clear_expired(&self, _ttl: Duration) -> Result<u64, RepositoryError> {
            Ok(0)
        }
    }

    const PAGE_JSON: &str = r#"{
        "items": [{"id": 1, "name": "m", "type": "Checkpoint", "modelVersions": []}],
        "metadata": {"nextCursor": "c2"}
    }"#;

    #[tokio::test]
    async fn test_miss_fetches_remote_and_writes_cache() {
        let http = Arc::new(FakeHttp::returning(PAGE_JSON));
        let cache = Arc::new(MemoryCache::default());
        let service = CatalogService::new(http.clone(), cache.clone());

        let query = ModelQuery::new().with_query("m");
        let page = service.search_models(&query).await.unwrap();

        assert_eq!(page.items.len(), 1);
        assert_eq!(page.metadata.next_cursor.as_deref(), Some("c2"));
        assert_eq!(http.call_count(), 1);

        // The write-back runs on a spawned task; let it land.
        tokio::task::yield_now().await;
        assert!(cache.contains(&cache_key::models_key(&query)));
    }

    #[tokio::test]
    async fn test_hit_skips_remote() {
        let http = Arc::new(FakeHttp::returning(PAGE_JSON));
        let cache = Arc::new(MemoryCache::default());
        let query = ModelQuery::new().with_query("m");
        cache.seed(&cache_key::models_key(&query), PAGE_JSON);

        let service = CatalogService::new(http.clone(), cache);
        let page = service.search_models(&query).await.unwrap();

        assert_eq!(page.items.len(), 1);
        assert_eq!(http.call_count(), 0);
    }

    #[tokio::test]
    async fn test_undecodable_cache_entry_falls_back_to_remote() {
        let http = Arc::new(FakeHttp::returning(PAGE_JSON));
        let cache = Arc::new(MemoryCache::default());
        let query = ModelQuery::new();
        cache.seed(&cache_key::models_key(&query), "not json at all");

        let service = CatalogService::new(http.clone(), cache);
        let page = service.search_models(&query).await.unwrap();

        assert_eq!(page.items.len(), 1);
        assert_eq!(http.call_count(), 1);
    }

    #[tokio::test]
    async fn test_broken_cache_never_fails_the_read_path() {
        let http = Arc::new(FakeHttp::returning(PAGE_JSON));
        let cache = Arc::new(MemoryCache {
            broken: true,
            ..Default::default()
        });

        let service = CatalogService::new(http.clone(), cache);
        let page = service.search_models(&ModelQuery::new()).await.unwrap();

        assert_eq!(page.items.len(), 1);
        assert_eq!(http.call_count(), 1);
    }

    #[tokio::test]
    async fn test_fetch_failure_propagates_instead_of_empty_page() {
        let http = Arc::new(FakeHttp::failing("connection refused"));
        let cache = Arc::new(MemoryCache::default());

        let service = CatalogService::new(http, cache);
        let result = service.search_models(&ModelQuery::new()).await;

        match result {
            Err(CatalogError::Fetch(message)) => {
                assert!(message.contains("connection refused"));
            }
            other => panic!("expected fetch error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_undecodable_remote_body_is_a_decode_error() {
        let http = Arc::new(FakeHttp::returning("[1, 2"));
        let cache = Arc::new(MemoryCache::default());

        let service = CatalogService::new(http, cache);
        let result = service.search_models(&ModelQuery::new()).await;

        assert!(matches!(result, Err(CatalogError::Decode(_))));
    }

    #[tokio::test(start_paused = true)]
    async fn test_cache_sweep_runs_periodically() {
        struct CountingCache {
            sweeps: AtomicUsize,
        }

        #[async_trait]
        impl ResponseCache for CountingCache {
            async fn get(
                &self,
                _key: &str,
                _ttl: Duration,
            ) -> Result<Option<String>, RepositoryError> {
                Ok(None)
            }

            async fn put(&self, _key: &str, _json: &str) -> Result<(), RepositoryError> {
                Ok(())
            }

            async fn clear_expired(&self, _ttl: Duration) -> Result<u64, RepositoryError> {
                self.sweeps.fetch_add(1, Ordering::SeqCst);
                Ok(1)
            }
        }

        let cache = Arc::new(CountingCache {
            sweeps: AtomicUsize::new(0),
        });
        let handle = spawn_cache_sweep(
            cache.clone(),
            Duration::from_secs(900),
            Duration::from_secs(60),
        );

        // Paused clock: this advances virtual time through three periods.
        tokio::time::sleep(Duration::from_secs(190)).await;
        handle.abort();

        assert!(cache.sweeps.load(Ordering::SeqCst) >= 3);
    }

    #[tokio::test]
    async fn test_get_model_maps_detail_payload() {
        let http = Arc::new(FakeHttp::returning(
            r#"{"id": 9, "name": "detail", "type": "LORA",
                "modelVersions": [{"id": 91, "name": "v1"}]}"#,
        ));
        let service = CatalogService::new(http, Arc::new(MemoryCache::default()));

        let model = service.get_model(9).await.unwrap();
        assert_eq!(model.id, 9);
        assert_eq!(model.versions.len(), 1);
        assert_eq!(model.versions[0].model_id, 9);
    }
}
