//! Catalog HTTP port trait.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::{CreatorQuery, ImageQuery, ModelQuery, TagQuery};

/// Result type alias for catalog fetches.
pub type CatalogFetchResult = Result<String, CatalogFetchError>;

/// Errors a catalog fetch can surface after the client has exhausted its
/// retry budget.
#[derive(Debug, Error)]
pub enum CatalogFetchError {
    /// The API answered with a non-success status.
    #[error("Catalog request failed with status {status}: {url}")]
    RequestFailed {
        /// HTTP status code.
        status: u16,
        /// The URL that was requested.
        url: String,
    },

    /// The requested resource does not exist.
    #[error("Not found: {resource}")]
    NotFound {
        /// Description of the missing resource.
        resource: String,
    },

    /// Transport-level failure (DNS, TLS, timeout, connection reset).
    #[error("Network error: {0}")]
    Network(String),
}

/// Port trait for the remote catalog API.
///
/// The implementation lives in `artdeck-civitai`. Every method issues one
/// HTTPS GET (with the client's internal retry policy) and returns the raw
/// JSON body; core deserializes it, so a cached body and a fresh body go
/// through the exact same DTO path.
#[async_trait]
pub trait CatalogHttp: Send + Sync {
    /// Fetch one page of model search results.
    async fn get_models(&self, query: &ModelQuery) -> CatalogFetchResult;

    /// Fetch a single model by id.
    async fn get_model(&self, id: i64) -> CatalogFetchResult;

    /// Fetch a single model version by id.
    async fn get_model_version(&self, id: i64) -> CatalogFetchResult;

    /// Look up a model version by file hash.
    async fn get_model_version_by_hash(&self, hash: &str) -> CatalogFetchResult;

    /// Fetch one page of gallery images.
    async fn get_images(&self, query: &ImageQuery) -> CatalogFetchResult;

    /// Fetch one page of creators.
    async fn get_creators(&self, query: &CreatorQuery) -> CatalogFetchResult;

    /// Fetch one page of tags.
    async fn get_tags(&self, query: &TagQuery) -> CatalogFetchResult;
}
