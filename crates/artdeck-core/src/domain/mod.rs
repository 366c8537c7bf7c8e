//! Domain types, independent of any infrastructure concerns.

mod catalog;
mod collections;
mod history;
mod preferences;
mod query;

pub use catalog::{
    AspectRatio, Creator, GenerationMeta, Image, ImageStats, Model, ModelFile, ModelImage,
    ModelStats, ModelType, ModelVersion, NsfwLevel, PageMetadata, PaginatedResult, TagInfo,
};
pub use collections::{
    CollectionModelEntry, FavoriteModelSummary, ModelCollection, DEFAULT_COLLECTION_ID,
    DEFAULT_COLLECTION_NAME,
};
pub use history::{BrowsingHistoryEntry, ExcludedTag, HiddenModel};
pub use preferences::{NsfwFilterLevel, PreferencesUpdate, UserPreferences};
pub use query::{CreatorQuery, ImageQuery, ModelQuery, SortOrder, TagQuery, TimePeriod};
