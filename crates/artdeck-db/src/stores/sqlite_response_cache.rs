//! `SQLite` implementation of the `ResponseCache` trait.
//!
//! Reads check the TTL but never delete; expired rows are removed by
//! `clear_expired`, intended to run on a periodic sweep.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use sqlx::{Row, SqlitePool};

use artdeck_core::ports::{RepositoryError, ResponseCache};

use super::storage_err;

type Clock = Arc<dyn Fn() -> i64 + Send + Sync>;

/// `SQLite` implementation of the `ResponseCache` trait.
///
/// The clock is injectable so TTL boundaries are testable without sleeping;
/// production uses wall-clock milliseconds.
pub struct SqliteResponseCache {
    pool: SqlitePool,
    now_ms: Clock,
}

impl SqliteResponseCache {
    /// Create a new `SQLite` response cache using the wall clock.
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            pool,
            now_ms: Arc::new(|| chrono::Utc::now().timestamp_millis()),
        }
    }

    /// Create a cache with a custom clock.
    pub fn with_clock(pool: SqlitePool, now_ms: Clock) -> Self {
        Self { pool, now_ms }
    }
}

fn ttl_millis(ttl: Duration) -> i64 {
    i64::try_from(ttl.as_millis()).unwrap_or(i64::MAX)
}

#[async_trait]
impl ResponseCache for SqliteResponseCache {
    async fn get(&self, key: &str, ttl: Duration) -> Result<Option<String>, RepositoryError> {
        let row = sqlx::query(
            "SELECT response_json, cached_at FROM cached_api_responses WHERE cache_key = ?",
        )
        .bind(key)
        .fetch_optional(&self.pool)
        .await
        .map_err(storage_err)?;

        let Some(row) = row else {
            return Ok(None);
        };

        let cached_at: i64 = row.get("cached_at");
        let age = (self.now_ms)() - cached_at;
        if age < ttl_millis(ttl) {
            Ok(Some(row.get("response_json")))
        } else {
            // Stale entries stay on disk until the next sweep.
            Ok(None)
        }
    }

    async fn put(&self, key: &str, json: &str) -> Result<(), RepositoryError> {
        sqlx::query(
            "INSERT OR REPLACE INTO cached_api_responses (cache_key, response_json, cached_at)
             VALUES (?, ?, ?)",
        )
        .bind(key)
        .bind(json)
        .bind((self.now_ms)())
        .execute(&self.pool)
        .await
        .map_err(storage_err)?;

        Ok(())
    }

    async fn clear_expired(&self, ttl: Duration) -> Result<u64, RepositoryError> {
        let cutoff = (self.now_ms)() - ttl_millis(ttl);

        let result = sqlx::query("DELETE FROM cached_api_responses WHERE cached_at < ?")
            .bind(cutoff)
            .execute(&self.pool)
            .await
            .map_err(storage_err)?;

        Ok(result.rows_affected())
    }
}
