//! Database setup and initialization.
//!
//! Provides `setup_database()` for initializing the `SQLite` database with
//! the full schema. Entry points call this with the resolved database path.

use anyhow::Result;
use sqlx::{sqlite::SqliteConnectOptions, SqlitePool};
use std::path::Path;
use tracing::info;

use artdeck_core::domain::{DEFAULT_COLLECTION_ID, DEFAULT_COLLECTION_NAME};

/// Sets up the `SQLite` database connection and ensures the schema exists.
///
/// This function:
/// 1. Establishes a connection to the `SQLite` database file, creating it
///    if missing
/// 2. Creates all tables and indexes
/// 3. Seeds the default "Favorites" collection and the preferences row
///
/// # Errors
///
/// Returns an error if the database file cannot be opened or created, or if
/// schema creation fails.
pub async fn setup_database(db_path: &Path) -> Result<SqlitePool> {
    // Ensure parent directory exists
    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let pool = SqlitePool::connect_with(
        SqliteConnectOptions::new()
            .filename(db_path)
            .create_if_missing(true)
            .foreign_keys(true),
    )
    .await?;

    create_schema(&pool).await?;
    seed_rows(&pool).await?;

    info!(path = %db_path.display(), "database ready");
    Ok(pool)
}

/// Sets up an in-memory `SQLite` database for testing.
///
/// Creates a fresh in-memory database with the full production schema.
#[cfg(any(test, feature = "test-utils"))]
pub async fn setup_test_database() -> Result<SqlitePool> {
    // A `:memory:` database is private to a single connection, so the pool
    // must hold exactly one connection or schema/data would scatter across
    // separate empty databases.
    let pool = sqlx::sqlite::SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(
            SqliteConnectOptions::new()
                .in_memory(true)
                .foreign_keys(true),
        )
        .await?;
    create_schema(&pool).await?;
    seed_rows(&pool).await?;
    Ok(pool)
}

/// Creates the complete database schema.
///
/// Safe to call multiple times as all operations use IF NOT EXISTS.
async fn create_schema(pool: &SqlitePool) -> Result<()> {
    // Denormalized favorite snapshots, keyed by the catalog model id
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS favorite_models (
            model_id INTEGER PRIMARY KEY,
            name TEXT NOT NULL,
            model_type TEXT NOT NULL,
            nsfw INTEGER NOT NULL DEFAULT 0,
            thumbnail_url TEXT,
            creator_name TEXT,
            download_count INTEGER NOT NULL DEFAULT 0,
            favorite_count INTEGER NOT NULL DEFAULT 0,
            rating REAL NOT NULL DEFAULT 0,
            favorited_at INTEGER NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        "CREATE INDEX IF NOT EXISTS idx_favorites_favorited_at ON favorite_models(favorited_at)",
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS collections (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            is_default INTEGER NOT NULL DEFAULT 0,
            created_at INTEGER NOT NULL,
            updated_at INTEGER NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    // Composite key; entries disappear with their collection
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS collection_model_entries (
            collection_id INTEGER NOT NULL,
            model_id INTEGER NOT NULL,
            name TEXT NOT NULL,
            model_type TEXT NOT NULL,
            nsfw INTEGER NOT NULL DEFAULT 0,
            thumbnail_url TEXT,
            creator_name TEXT,
            added_at INTEGER NOT NULL,
            PRIMARY KEY (collection_id, model_id),
            FOREIGN KEY (collection_id) REFERENCES collections(id) ON DELETE CASCADE
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        "CREATE INDEX IF NOT EXISTS idx_entries_added_at
         ON collection_model_entries(collection_id, added_at)",
    )
    .execute(pool)
    .await?;

    // TTL-checked at read time; swept by clear_expired
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS cached_api_responses (
            cache_key TEXT PRIMARY KEY NOT NULL,
            response_json TEXT NOT NULL,
            cached_at INTEGER NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        "CREATE INDEX IF NOT EXISTS idx_cache_cached_at ON cached_api_responses(cached_at)",
    )
    .execute(pool)
    .await?;

    // Singleton row, id pinned to 1
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS user_preferences (
            id INTEGER PRIMARY KEY CHECK (id = 1),
            nsfw_filter_level TEXT NOT NULL DEFAULT 'Off',
            default_sort TEXT NOT NULL DEFAULT 'HighestRated',
            default_period TEXT NOT NULL DEFAULT 'AllTime',
            grid_columns INTEGER NOT NULL DEFAULT 2,
            api_key TEXT
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS excluded_tags (
            tag TEXT PRIMARY KEY NOT NULL,
            added_at INTEGER NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS hidden_models (
            model_id INTEGER PRIMARY KEY,
            added_at INTEGER NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    // One row per model; revisits replace so the model moves to the top
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS browsing_history (
            model_id INTEGER PRIMARY KEY,
            model_name TEXT NOT NULL,
            thumbnail_url TEXT,
            viewed_at INTEGER NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_history_viewed_at ON browsing_history(viewed_at)")
        .execute(pool)
        .await?;

    Ok(())
}

/// Seed the rows the application assumes exist: the default collection and
/// the preferences singleton.
async fn seed_rows(pool: &SqlitePool) -> Result<()> {
    let now = chrono::Utc::now().timestamp_millis();

    sqlx::query(
        "INSERT OR IGNORE INTO collections (id, name, is_default, created_at, updated_at)
         VALUES (?, ?, 1, ?, ?)",
    )
    .bind(DEFAULT_COLLECTION_ID)
    .bind(DEFAULT_COLLECTION_NAME)
    .bind(now)
    .bind(now)
    .execute(pool)
    .await?;

    sqlx::query("INSERT OR IGNORE INTO user_preferences (id) VALUES (1)")
        .execute(pool)
        .await?;

    Ok(())
}
