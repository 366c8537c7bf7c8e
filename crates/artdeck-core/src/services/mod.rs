//! Services orchestrating ports into use cases.
//!
//! Each service owns the observation channel for its slice of local state:
//! mutations go through the service, which re-emits the full current
//! snapshot to every subscriber via a `tokio::sync::watch` channel.

mod catalog;
mod collections;
mod favorites;
mod history;
mod personalization;
mod preferences;

pub use catalog::{spawn_cache_sweep, CatalogService};
pub use collections::CollectionsService;
pub use favorites::FavoritesService;
pub use history::BrowsingHistoryService;
pub use personalization::{ExcludedTagsService, HiddenModelsService};
pub use preferences::PreferencesService;

/// Current wall-clock time in milliseconds since epoch, the unit every
/// persisted timestamp uses.
pub(crate) fn now_ms() -> i64 {
    chrono::Utc::now().timestamp_millis()
}
