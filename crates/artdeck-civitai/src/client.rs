//! CivitAI client implementing the `CatalogHttp` port.

use async_trait::async_trait;

use artdeck_core::domain::{CreatorQuery, ImageQuery, ModelQuery, TagQuery};
use artdeck_core::ports::{catalog_http::CatalogFetchResult, CatalogHttp};

use crate::config::CivitaiConfig;
use crate::http::{HttpBackend, ReqwestBackend};
use crate::url_builder;

/// The production client type.
pub type DefaultCivitaiClient = CivitaiClient<ReqwestBackend>;

/// CivitAI API client, generic over the HTTP backend for testability.
pub struct CivitaiClient<B: HttpBackend> {
    config: CivitaiConfig,
    backend: B,
}

impl CivitaiClient<ReqwestBackend> {
    /// Create a client with the production reqwest backend.
    pub fn new(config: CivitaiConfig) -> Self {
        let backend = ReqwestBackend::new(&config);
        Self { config, backend }
    }
}

impl<B: HttpBackend> CivitaiClient<B> {
    /// Create a client with a custom backend (used in tests).
    pub fn with_backend(config: CivitaiConfig, backend: B) -> Self {
        Self { config, backend }
    }

    async fn fetch(&self, url: url::Url) -> CatalogFetchResult {
        self.backend.get_text(&url).await.map_err(Into::into)
    }
}

#[async_trait]
impl<B: HttpBackend> CatalogHttp for CivitaiClient<B> {
    async fn get_models(&self, query: &ModelQuery) -> CatalogFetchResult {
        self.fetch(url_builder::build_models_url(&self.config, query))
            .await
    }

    async fn get_model(&self, id: i64) -> CatalogFetchResult {
        self.fetch(url_builder::build_model_url(&self.config, id))
            .await
    }

    async fn get_model_version(&self, id: i64) -> CatalogFetchResult {
        self.fetch(url_builder::build_model_version_url(&self.config, id))
            .await
    }

    async fn get_model_version_by_hash(&self, hash: &str) -> CatalogFetchResult {
        self.fetch(url_builder::build_model_version_by_hash_url(
            &self.config,
            hash,
        ))
        .await
    }

    async fn get_images(&self, query: &ImageQuery) -> CatalogFetchResult {
        self.fetch(url_builder::build_images_url(&self.config, query))
            .await
    }

    async fn get_creators(&self, query: &CreatorQuery) -> CatalogFetchResult {
        self.fetch(url_builder::build_creators_url(&self.config, query))
            .await
    }

    async fn get_tags(&self, query: &TagQuery) -> CatalogFetchResult {
        self.fetch(url_builder::build_tags_url(&self.config, query))
            .await
    }
}
