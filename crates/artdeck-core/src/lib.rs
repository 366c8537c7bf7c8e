//! Core domain types, port definitions and services for artdeck.
//!
//! This crate holds everything the adapters agree on: domain entities,
//! wire DTOs and their mapper, the port traits implemented by
//! `artdeck-db` and `artdeck-civitai`, pure filter functions, and the
//! services the presentation layer drives.

pub mod cache_key;
pub mod domain;
pub mod dto;
pub mod feed;
pub mod filters;
pub mod mapper;
pub mod ports;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::{
    AspectRatio, BrowsingHistoryEntry, CollectionModelEntry, Creator, CreatorQuery, ExcludedTag,
    FavoriteModelSummary, GenerationMeta, HiddenModel, Image, ImageQuery, ImageStats, Model,
    ModelCollection, ModelFile, ModelImage, ModelQuery, ModelStats, ModelType, ModelVersion,
    NsfwFilterLevel, NsfwLevel, PageMetadata, PaginatedResult, PreferencesUpdate, SortOrder,
    TagInfo, TagQuery, TimePeriod, UserPreferences, DEFAULT_COLLECTION_ID,
};
pub use feed::{FeedPhase, FeedSnapshot, LoadKind, LoadTicket, PagedFeed};
pub use ports::{
    BrowsingHistoryStore, CatalogError, CatalogFetchError, CatalogHttp, CollectionStore, CoreError,
    ExcludedTagStore, FavoriteStore, HiddenModelStore, PreferencesStore, RepositoryError,
    ResponseCache, Stores, DEFAULT_CACHE_TTL,
};
pub use services::{
    spawn_cache_sweep, BrowsingHistoryService, CatalogService, CollectionsService,
    ExcludedTagsService, FavoritesService, HiddenModelsService, PreferencesService,
};
