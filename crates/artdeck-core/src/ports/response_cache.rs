//! Response cache port trait.

use std::time::Duration;

use async_trait::async_trait;

use super::RepositoryError;

/// Default time-to-live for cached API responses.
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(15 * 60);

/// Time-boxed key → JSON cache sitting in front of the remote catalog.
///
/// Keys are built by the repository layer ([`crate::cache_key`]); the cache
/// itself treats them as opaque.
#[async_trait]
pub trait ResponseCache: Send + Sync {
    /// Return the cached payload for `key` if it is younger than `ttl`.
    ///
    /// Expired entries are NOT deleted on read; reads stay cheap and
    /// side-effect-free. Cleanup belongs to [`clear_expired`].
    ///
    /// [`clear_expired`]: ResponseCache::clear_expired
    async fn get(&self, key: &str, ttl: Duration) -> Result<Option<String>, RepositoryError>;

    /// Upsert a payload under `key` (replace-on-conflict), stamping it with
    /// the current time.
    async fn put(&self, key: &str, json: &str) -> Result<(), RepositoryError>;

    /// Delete all entries older than `ttl`. Returns the number of rows
    /// removed. Intended to run periodically, not on every read.
    async fn clear_expired(&self, ttl: Duration) -> Result<u64, RepositoryError>;
}
