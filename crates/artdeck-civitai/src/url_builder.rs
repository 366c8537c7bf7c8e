//! URL construction helpers for the CivitAI API.
//!
//! Pure functions building endpoint URLs from typed queries. Only present
//! optional parameters are appended; absent filters never become empty or
//! null tokens.

use url::Url;

use artdeck_core::domain::{CreatorQuery, ImageQuery, ModelQuery, TagQuery};

use crate::config::CivitaiConfig;

fn endpoint_url(config: &CivitaiConfig, endpoint: &str) -> Url {
    let mut url = config.base_url.clone();
    let base_path = url.path().trim_end_matches('/').to_string();
    url.set_path(&format!("{base_path}/{endpoint}"));
    url
}

/// Drop the dangling `?` left behind when no pairs were appended.
fn tidy(url: &mut Url) {
    if url.query() == Some("") {
        url.set_query(None);
    }
}

fn bool_str(value: bool) -> &'static str {
    if value {
        "true"
    } else {
        "false"
    }
}

/// Build a model search URL.
pub fn build_models_url(config: &CivitaiConfig, query: &ModelQuery) -> Url {
    let mut url = endpoint_url(config, "models");
    {
        let mut pairs = url.query_pairs_mut();
        if let Some(ref q) = query.query {
            pairs.append_pair("query", q);
        }
        if let Some(ref tag) = query.tag {
            pairs.append_pair("tag", tag);
        }
        if let Some(ref username) = query.username {
            pairs.append_pair("username", username);
        }
        for model_type in &query.types {
            pairs.append_pair("types", model_type.as_api_param());
        }
        if let Some(sort) = query.sort {
            pairs.append_pair("sort", sort.as_model_param());
        }
        if let Some(period) = query.period {
            pairs.append_pair("period", period.as_api_param());
        }
        for base_model in &query.base_models {
            pairs.append_pair("baseModels", base_model);
        }
        if let Some(nsfw) = query.nsfw {
            pairs.append_pair("nsfw", bool_str(nsfw));
        }
        if let Some(limit) = query.limit {
            pairs.append_pair("limit", &limit.to_string());
        }
        if let Some(ref cursor) = query.cursor {
            pairs.append_pair("cursor", cursor);
        }
    }
    tidy(&mut url);
    url
}

/// Build a model detail URL.
pub fn build_model_url(config: &CivitaiConfig, id: i64) -> Url {
    endpoint_url(config, &format!("models/{id}"))
}

/// Build a model-version detail URL.
pub fn build_model_version_url(config: &CivitaiConfig, id: i64) -> Url {
    endpoint_url(config, &format!("model-versions/{id}"))
}

/// Build a by-hash model-version lookup URL.
pub fn build_model_version_by_hash_url(config: &CivitaiConfig, hash: &str) -> Url {
    endpoint_url(config, &format!("model-versions/by-hash/{hash}"))
}

/// Build an image search URL.
pub fn build_images_url(config: &CivitaiConfig, query: &ImageQuery) -> Url {
    let mut url = endpoint_url(config, "images");
    {
        let mut pairs = url.query_pairs_mut();
        if let Some(model_id) = query.model_id {
            pairs.append_pair("modelId", &model_id.to_string());
        }
        if let Some(version_id) = query.model_version_id {
            pairs.append_pair("modelVersionId", &version_id.to_string());
        }
        if let Some(ref username) = query.username {
            pairs.append_pair("username", username);
        }
        if let Some(sort) = query.sort {
            pairs.append_pair("sort", sort.as_image_param());
        }
        if let Some(period) = query.period {
            pairs.append_pair("period", period.as_api_param());
        }
        if let Some(nsfw) = query.nsfw {
            pairs.append_pair("nsfw", bool_str(nsfw));
        }
        if let Some(limit) = query.limit {
            pairs.append_pair("limit", &limit.to_string());
        }
        if let Some(ref cursor) = query.cursor {
            pairs.append_pair("cursor", cursor);
        }
    }
    tidy(&mut url);
    url
}

/// Build a creator search URL.
pub fn build_creators_url(config: &CivitaiConfig, query: &CreatorQuery) -> Url {
    let mut url = endpoint_url(config, "creators");
    {
        let mut pairs = url.query_pairs_mut();
        if let Some(ref q) = query.query {
            pairs.append_pair("query", q);
        }
        if let Some(limit) = query.limit {
            pairs.append_pair("limit", &limit.to_string());
        }
        if let Some(page) = query.page {
            pairs.append_pair("page", &page.to_string());
        }
    }
    tidy(&mut url);
    url
}

/// Build a tag search URL.
pub fn build_tags_url(config: &CivitaiConfig, query: &TagQuery) -> Url {
    let mut url = endpoint_url(config, "tags");
    {
        let mut pairs = url.query_pairs_mut();
        if let Some(ref q) = query.query {
            pairs.append_pair("query", q);
        }
        if let Some(limit) = query.limit {
            pairs.append_pair("limit", &limit.to_string());
        }
        if let Some(page) = query.page {
            pairs.append_pair("page", &page.to_string());
        }
    }
    tidy(&mut url);
    url
}
