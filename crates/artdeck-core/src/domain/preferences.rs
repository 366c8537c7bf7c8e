//! User preferences domain types.

use serde::{Deserialize, Serialize};

use super::query::{SortOrder, TimePeriod};

/// How much NSFW imagery the user has opted into seeing.
///
/// Ordered: `Off < Soft < All`. This gates image [`NsfwLevel`]s: `Off`
/// passes only `None`, `Soft` passes `None` and `Soft`, `All` passes
/// everything.
///
/// [`NsfwLevel`]: super::catalog::NsfwLevel
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
pub enum NsfwFilterLevel {
    #[default]
    Off,
    Soft,
    All,
}

impl NsfwFilterLevel {
    /// Name under which the value is persisted.
    pub const fn as_stored_name(self) -> &'static str {
        match self {
            Self::Off => "Off",
            Self::Soft => "Soft",
            Self::All => "All",
        }
    }

    /// Parse a persisted name; unknown values fall back to `Off`.
    pub fn from_stored_name(value: &str) -> Self {
        match value {
            "Soft" => Self::Soft,
            "All" => Self::All,
            _ => Self::Off,
        }
    }
}

/// The singleton preferences row (id = 1, upsert semantics).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserPreferences {
    pub nsfw_filter_level: NsfwFilterLevel,
    pub default_sort: SortOrder,
    pub default_period: TimePeriod,
    pub grid_columns: u8,
    pub api_key: Option<String>,
}

impl UserPreferences {
    pub fn with_defaults() -> Self {
        Self {
            nsfw_filter_level: NsfwFilterLevel::Off,
            default_sort: SortOrder::HighestRated,
            default_period: TimePeriod::AllTime,
            grid_columns: 2,
            api_key: None,
        }
    }

    /// Apply a partial update.
    pub fn merge(&mut self, update: &PreferencesUpdate) {
        if let Some(level) = update.nsfw_filter_level {
            self.nsfw_filter_level = level;
        }
        if let Some(sort) = update.default_sort {
            self.default_sort = sort;
        }
        if let Some(period) = update.default_period {
            self.default_period = period;
        }
        if let Some(columns) = update.grid_columns {
            self.grid_columns = columns;
        }
        if let Some(ref api_key) = update.api_key {
            self.api_key = api_key.clone();
        }
    }
}

impl Default for UserPreferences {
    fn default() -> Self {
        Self::with_defaults()
    }
}

/// Partial preferences update; `None` fields are left unchanged.
///
/// `api_key` is doubly optional so a caller can distinguish "leave the key
/// alone" (`None`) from "clear the key" (`Some(None)`).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PreferencesUpdate {
    pub nsfw_filter_level: Option<NsfwFilterLevel>,
    pub default_sort: Option<SortOrder>,
    pub default_period: Option<TimePeriod>,
    pub grid_columns: Option<u8>,
    pub api_key: Option<Option<String>>,
}
