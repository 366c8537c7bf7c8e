//! Typed query parameters for the paginated catalog endpoints.
//!
//! Absent optional fields are omitted from the request entirely, never sent
//! as empty or null tokens.

use serde::{Deserialize, Serialize};

use super::catalog::ModelType;

/// Sort order for catalog searches.
///
/// The wire literals differ between the model and image endpoints, so there
/// are two explicit lookup tables on the same enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum SortOrder {
    #[default]
    HighestRated,
    MostDownloaded,
    Newest,
}

impl SortOrder {
    /// Exact literal for the model search endpoint.
    pub const fn as_model_param(self) -> &'static str {
        match self {
            Self::HighestRated => "Highest Rated",
            Self::MostDownloaded => "Most Downloaded",
            Self::Newest => "Newest",
        }
    }

    /// Exact literal for the image search endpoint.
    pub const fn as_image_param(self) -> &'static str {
        match self {
            Self::HighestRated => "Most Reactions",
            Self::MostDownloaded => "Most Comments",
            Self::Newest => "Newest",
        }
    }

    /// Name under which the value is persisted in preferences.
    pub const fn as_stored_name(self) -> &'static str {
        match self {
            Self::HighestRated => "HighestRated",
            Self::MostDownloaded => "MostDownloaded",
            Self::Newest => "Newest",
        }
    }

    /// Parse a persisted name; unknown values fall back to the default.
    pub fn from_stored_name(value: &str) -> Self {
        match value {
            "MostDownloaded" => Self::MostDownloaded,
            "Newest" => Self::Newest,
            _ => Self::HighestRated,
        }
    }
}

/// Time window restricting aggregate stats for a search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum TimePeriod {
    #[default]
    AllTime,
    Year,
    Month,
    Week,
    Day,
}

impl TimePeriod {
    /// Exact literal the remote API expects.
    pub const fn as_api_param(self) -> &'static str {
        match self {
            Self::AllTime => "AllTime",
            Self::Year => "Year",
            Self::Month => "Month",
            Self::Week => "Week",
            Self::Day => "Day",
        }
    }

    /// Parse a persisted name; unknown values fall back to the default.
    pub fn from_stored_name(value: &str) -> Self {
        match value {
            "Year" => Self::Year,
            "Month" => Self::Month,
            "Week" => Self::Week,
            "Day" => Self::Day,
            _ => Self::AllTime,
        }
    }
}

/// Parameters for model search.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ModelQuery {
    /// Free-text search query.
    pub query: Option<String>,
    /// Restrict to models carrying this tag.
    pub tag: Option<String>,
    /// Restrict to models published by this user.
    pub username: Option<String>,
    /// Restrict to these model types (empty = all types).
    pub types: Vec<ModelType>,
    pub sort: Option<SortOrder>,
    pub period: Option<TimePeriod>,
    /// Restrict to versions trained on these base models.
    pub base_models: Vec<String>,
    pub nsfw: Option<bool>,
    pub limit: Option<u32>,
    /// Opaque continuation token from the previous page.
    pub cursor: Option<String>,
}

impl ModelQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = Some(query.into());
        self
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    pub fn with_types(mut self, types: Vec<ModelType>) -> Self {
        self.types = types;
        self
    }

    pub const fn with_sort(mut self, sort: SortOrder) -> Self {
        self.sort = Some(sort);
        self
    }

    pub const fn with_period(mut self, period: TimePeriod) -> Self {
        self.period = Some(period);
        self
    }

    pub const fn with_nsfw(mut self, nsfw: bool) -> Self {
        self.nsfw = Some(nsfw);
        self
    }

    pub const fn with_limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn with_cursor(mut self, cursor: impl Into<String>) -> Self {
        self.cursor = Some(cursor.into());
        self
    }
}

/// Parameters for gallery image search.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ImageQuery {
    /// Restrict to images attached to this model.
    pub model_id: Option<i64>,
    /// Restrict to images attached to this model version.
    pub model_version_id: Option<i64>,
    pub username: Option<String>,
    pub sort: Option<SortOrder>,
    pub period: Option<TimePeriod>,
    pub nsfw: Option<bool>,
    pub limit: Option<u32>,
    pub cursor: Option<String>,
}

impl ImageQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub const fn with_model_id(mut self, model_id: i64) -> Self {
        self.model_id = Some(model_id);
        self
    }

    pub const fn with_model_version_id(mut self, version_id: i64) -> Self {
        self.model_version_id = Some(version_id);
        self
    }

    pub const fn with_sort(mut self, sort: SortOrder) -> Self {
        self.sort = Some(sort);
        self
    }

    pub const fn with_limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn with_cursor(mut self, cursor: impl Into<String>) -> Self {
        self.cursor = Some(cursor.into());
        self
    }
}

/// Parameters for creator search.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CreatorQuery {
    pub query: Option<String>,
    pub limit: Option<u32>,
    pub page: Option<u32>,
}

impl CreatorQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = Some(query.into());
        self
    }

    pub const fn with_limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }
}

/// Parameters for tag search.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TagQuery {
    pub query: Option<String>,
    pub limit: Option<u32>,
    pub page: Option<u32>,
}

impl TagQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = Some(query.into());
        self
    }

    pub const fn with_limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }
}
