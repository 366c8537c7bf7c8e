//! Pure, stateless filters applied to already-fetched domain lists.
//!
//! No I/O happens here; services fetch, then filter.

mod aspect;
mod nsfw;
mod personal;

pub use aspect::{filter_by_aspect, Dimensioned};
pub use nsfw::{filter_images_by_level, filter_models_by_level, is_allowed, NsfwRated};
pub use personal::{filter_excluded_tags, filter_hidden_models};
