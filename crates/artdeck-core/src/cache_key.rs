//! Deterministic cache-key construction.
//!
//! A key encodes every request parameter that affects the response, in a
//! fixed field order, with absent parameters omitted. Distinct parameter
//! combinations therefore never collide, and the same logical request
//! always produces the same key.

use crate::domain::{CreatorQuery, ImageQuery, ModelQuery, TagQuery};

fn push(parts: &mut Vec<String>, name: &str, value: Option<&str>) {
    if let Some(v) = value {
        parts.push(format!("{name}={v}"));
    }
}

fn join(endpoint: &str, parts: Vec<String>) -> String {
    if parts.is_empty() {
        endpoint.to_string()
    } else {
        format!("{endpoint}?{}", parts.join("&"))
    }
}

/// Key for a model search page.
pub fn models_key(query: &ModelQuery) -> String {
    let mut parts = Vec::new();
    push(&mut parts, "query", query.query.as_deref());
    push(&mut parts, "tag", query.tag.as_deref());
    push(&mut parts, "username", query.username.as_deref());
    if !query.types.is_empty() {
        let types: Vec<&str> = query.types.iter().map(|t| t.as_api_param()).collect();
        parts.push(format!("types={}", types.join(",")));
    }
    push(&mut parts, "sort", query.sort.map(|s| s.as_model_param()));
    push(&mut parts, "period", query.period.map(|p| p.as_api_param()));
    if !query.base_models.is_empty() {
        parts.push(format!("baseModels={}", query.base_models.join(",")));
    }
    push(&mut parts, "nsfw", query.nsfw.map(|n| if n { "true" } else { "false" }));
    push(&mut parts, "limit", query.limit.map(|l| l.to_string()).as_deref());
    push(&mut parts, "cursor", query.cursor.as_deref());
    join("models", parts)
}

/// Key for a model detail fetch.
pub fn model_key(id: i64) -> String {
    format!("models/{id}")
}

/// Key for a model-version detail fetch.
pub fn model_version_key(id: i64) -> String {
    format!("model-versions/{id}")
}

/// Key for a by-hash model-version lookup.
pub fn model_version_by_hash_key(hash: &str) -> String {
    format!("model-versions/by-hash/{hash}")
}

/// Key for an image search page.
pub fn images_key(query: &ImageQuery) -> String {
    let mut parts = Vec::new();
    push(&mut parts, "modelId", query.model_id.map(|i| i.to_string()).as_deref());
    push(
        &mut parts,
        "modelVersionId",
        query.model_version_id.map(|i| i.to_string()).as_deref(),
    );
    push(&mut parts, "username", query.username.as_deref());
    push(&mut parts, "sort", query.sort.map(|s| s.as_image_param()));
    push(&mut parts, "period", query.period.map(|p| p.as_api_param()));
    push(&mut parts, "nsfw", query.nsfw.map(|n| if n { "true" } else { "false" }));
    push(&mut parts, "limit", query.limit.map(|l| l.to_string()).as_deref());
    push(&mut parts, "cursor", query.cursor.as_deref());
    join("images", parts)
}

/// Key for a creator search page.
pub fn creators_key(query: &CreatorQuery) -> String {
    let mut parts = Vec::new();
    push(&mut parts, "query", query.query.as_deref());
    push(&mut parts, "limit", query.limit.map(|l| l.to_string()).as_deref());
    push(&mut parts, "page", query.page.map(|p| p.to_string()).as_deref());
    join("creators", parts)
}

/// Key for a tag search page.
pub fn tags_key(query: &TagQuery) -> String {
    let mut parts = Vec::new();
    push(&mut parts, "query", query.query.as_deref());
    push(&mut parts, "limit", query.limit.map(|l| l.to_string()).as_deref());
    push(&mut parts, "page", query.page.map(|p| p.to_string()).as_deref());
    join("tags", parts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ModelType, SortOrder, TimePeriod};

    #[test]
    fn test_empty_query_is_bare_endpoint() {
        assert_eq!(models_key(&ModelQuery::new()), "models");
        assert_eq!(images_key(&ImageQuery::new()), "images");
    }

    #[test]
    fn test_key_is_deterministic() {
        let query = ModelQuery::new()
            .with_query("forest")
            .with_sort(SortOrder::Newest)
            .with_limit(20);
        assert_eq!(models_key(&query), models_key(&query.clone()));
    }

    #[test]
    fn test_distinct_parameters_never_collide() {
        let base = ModelQuery::new().with_query("forest");
        let keys = [
            models_key(&base),
            models_key(&base.clone().with_sort(SortOrder::Newest)),
            models_key(&base.clone().with_period(TimePeriod::Week)),
            models_key(&base.clone().with_cursor("c2")),
            models_key(&base.clone().with_limit(10)),
            models_key(&base.clone().with_nsfw(false)),
            models_key(&base.clone().with_types(vec![ModelType::Lora])),
        ];

        for (i, a) in keys.iter().enumerate() {
            for b in keys.iter().skip(i + 1) {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn test_cursor_pages_get_distinct_keys() {
        let p1 = ModelQuery::new().with_query("q");
        let p2 = p1.clone().with_cursor("c2");
        assert_ne!(models_key(&p1), models_key(&p2));
    }

    #[test]
    fn test_full_model_key_shape() {
        let query = ModelQuery {
            query: Some("cat".to_string()),
            tag: Some("animal".to_string()),
            username: None,
            types: vec![ModelType::Checkpoint, ModelType::Lora],
            sort: Some(SortOrder::HighestRated),
            period: Some(TimePeriod::Month),
            base_models: vec!["SD 1.5".to_string()],
            nsfw: Some(false),
            limit: Some(24),
            cursor: Some("abc".to_string()),
        };

        assert_eq!(
            models_key(&query),
            "models?query=cat&tag=animal&types=Checkpoint,LORA&sort=Highest Rated\
             &period=Month&baseModels=SD 1.5&nsfw=false&limit=24&cursor=abc"
        );
    }

    #[test]
    fn test_detail_keys() {
        assert_eq!(model_key(42), "models/42");
        assert_eq!(model_version_key(7), "model-versions/7");
        assert_eq!(
            model_version_by_hash_key("deadbeef"),
            "model-versions/by-hash/deadbeef"
        );
    }
}
