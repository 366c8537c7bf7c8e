//! Wire DTOs for the catalog API.
//!
//! Deserialization is lenient by construction: unknown JSON fields are
//! ignored, missing counts default to zero, missing lists default to empty.
//! These types are the cache payload format as well — a cached response body
//! and a fresh one deserialize through the same structs.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Pagination metadata as returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct PageMetadataDto {
    pub next_cursor: Option<String>,
    pub next_page: Option<String>,
    pub current_page: Option<u32>,
    pub page_size: Option<u32>,
    pub total_items: Option<u64>,
    pub total_pages: Option<u32>,
}

/// Aggregate stats block shared by models and versions.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct StatsDto {
    pub download_count: u64,
    pub favorite_count: u64,
    pub comment_count: u64,
    pub rating: f64,
    pub rating_count: u64,
}

/// Reaction stats for a gallery image.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct ImageStatsDto {
    pub like_count: u64,
    pub heart_count: u64,
    pub laugh_count: u64,
    pub cry_count: u64,
    pub comment_count: u64,
}

/// Creator block attached to a model, and item shape of `/creators`.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct CreatorDto {
    pub username: String,
    pub image: Option<String>,
    pub model_count: Option<u32>,
    pub link: Option<String>,
}

/// Item shape of `/tags`.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct TagDto {
    pub name: String,
    pub model_count: Option<u32>,
    pub link: Option<String>,
}

/// Generation parameters. The API mixes casing conventions here
/// ("cfgScale" but "Model"/"Size"), hence the aliases.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct GenerationMetaDto {
    pub prompt: Option<String>,
    pub negative_prompt: Option<String>,
    pub sampler: Option<String>,
    pub cfg_scale: Option<f64>,
    pub steps: Option<u32>,
    pub seed: Option<i64>,
    #[serde(alias = "Model")]
    pub model: Option<String>,
    #[serde(alias = "Size")]
    pub size: Option<String>,
}

/// Image shape used both inside model versions and as the item shape of
/// `/images`.
///
/// The `nsfw` field has shipped as both a boolean flag and a level string
/// at different times, so it is kept as a raw value and resolved in the
/// mapper together with `nsfwLevel`.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct ImageDto {
    pub id: Option<i64>,
    pub url: String,
    pub hash: Option<String>,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub nsfw: Option<Value>,
    pub nsfw_level: Option<String>,
    pub username: Option<String>,
    pub created_at: Option<String>,
    pub stats: Option<ImageStatsDto>,
    pub meta: Option<GenerationMetaDto>,
}

/// Hash digests attached to a model file.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct FileHashesDto {
    #[serde(rename = "SHA256")]
    pub sha256: Option<String>,
    #[serde(rename = "AutoV2")]
    pub autov2: Option<String>,
}

/// File entry inside a model version.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct ModelFileDto {
    pub name: String,
    #[serde(rename = "sizeKB")]
    pub size_kb: Option<f64>,
    #[serde(rename = "type")]
    pub file_type: Option<String>,
    pub download_url: Option<String>,
    pub hashes: Option<FileHashesDto>,
}

/// Model version, both nested inside `/models` items and as the top-level
/// shape of `/model-versions/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct ModelVersionDto {
    pub id: i64,
    pub model_id: Option<i64>,
    pub name: String,
    pub created_at: Option<String>,
    pub base_model: Option<String>,
    pub trained_words: Vec<String>,
    pub download_url: Option<String>,
    pub files: Vec<ModelFileDto>,
    pub images: Vec<ImageDto>,
    pub stats: Option<StatsDto>,
}

/// Item shape of `/models` and top-level shape of `/models/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct ModelDto {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub model_type: Option<String>,
    pub nsfw: bool,
    pub tags: Vec<String>,
    pub creator: Option<CreatorDto>,
    pub stats: Option<StatsDto>,
    pub model_versions: Vec<ModelVersionDto>,
}

/// Response envelope of `/models`.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ModelsResponseDto {
    pub items: Vec<ModelDto>,
    pub metadata: PageMetadataDto,
}

/// Response envelope of `/images`.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ImagesResponseDto {
    pub items: Vec<ImageDto>,
    pub metadata: PageMetadataDto,
}

/// Response envelope of `/creators`.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct CreatorsResponseDto {
    pub items: Vec<CreatorDto>,
    pub metadata: PageMetadataDto,
}

/// Response envelope of `/tags`.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct TagsResponseDto {
    pub items: Vec<TagDto>,
    pub metadata: PageMetadataDto,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_models_response_tolerates_unknown_fields() {
        let body = json!({
            "items": [{
                "id": 7,
                "name": "Dreamscape",
                "type": "Checkpoint",
                "someFutureField": {"nested": true},
                "modelVersions": []
            }],
            "metadata": {"nextCursor": "abc", "unknownCounter": 3}
        });

        let parsed: ModelsResponseDto = serde_json::from_value(body).unwrap();
        assert_eq!(parsed.items.len(), 1);
        assert_eq!(parsed.items[0].id, 7);
        assert_eq!(parsed.metadata.next_cursor.as_deref(), Some("abc"));
    }

    #[test]
    fn test_missing_counts_default_to_zero() {
        let stats: StatsDto = serde_json::from_value(json!({"rating": 4.2})).unwrap();
        assert_eq!(stats.download_count, 0);
        assert_eq!(stats.favorite_count, 0);
        assert!((stats.rating - 4.2).abs() < f64::EPSILON);
    }

    #[test]
    fn test_missing_lists_default_to_empty() {
        let model: ModelDto = serde_json::from_value(json!({"id": 1, "name": "m"})).unwrap();
        assert!(model.tags.is_empty());
        assert!(model.model_versions.is_empty());
    }

    #[test]
    fn test_image_nsfw_accepts_bool_and_string() {
        let flagged: ImageDto =
            serde_json::from_value(json!({"url": "u", "nsfw": true})).unwrap();
        assert_eq!(flagged.nsfw, Some(Value::Bool(true)));

        let leveled: ImageDto =
            serde_json::from_value(json!({"url": "u", "nsfw": "Mature"})).unwrap();
        assert_eq!(leveled.nsfw, Some(Value::String("Mature".to_string())));
    }

    #[test]
    fn test_generation_meta_mixed_casing() {
        let meta: GenerationMetaDto = serde_json::from_value(json!({
            "prompt": "a forest",
            "cfgScale": 7.5,
            "Model": "dreamscape-v2",
            "Size": "512x768"
        }))
        .unwrap();

        assert_eq!(meta.prompt.as_deref(), Some("a forest"));
        assert_eq!(meta.cfg_scale, Some(7.5));
        assert_eq!(meta.model.as_deref(), Some("dreamscape-v2"));
        assert_eq!(meta.size.as_deref(), Some("512x768"));
    }

    #[test]
    fn test_file_hash_casing() {
        let file: ModelFileDto = serde_json::from_value(json!({
            "name": "model.safetensors",
            "sizeKB": 2048.5,
            "hashes": {"SHA256": "aa", "AutoV2": "bb"}
        }))
        .unwrap();

        let hashes = file.hashes.unwrap();
        assert_eq!(hashes.sha256.as_deref(), Some("aa"));
        assert_eq!(hashes.autov2.as_deref(), Some("bb"));
        assert_eq!(file.size_kb, Some(2048.5));
    }
}
