//! Pure DTO → domain translation.
//!
//! Stateless and total: every DTO maps to a domain value. Unknown model
//! types become [`ModelType::Other`]; an unrecognized image `nsfw` payload
//! resolves to the most restrictive level the flag supports, so nothing
//! unknown leaks past the NSFW filter.

use serde_json::Value;

use crate::domain::{
    Creator, GenerationMeta, Image, ImageStats, Model, ModelFile, ModelImage, ModelStats,
    ModelType, ModelVersion, NsfwLevel, PageMetadata, PaginatedResult, TagInfo,
};
use crate::dto::{
    CreatorDto, CreatorsResponseDto, GenerationMetaDto, ImageDto, ImageStatsDto,
    ImagesResponseDto, ModelDto, ModelFileDto, ModelVersionDto, ModelsResponseDto, PageMetadataDto,
    StatsDto, TagsResponseDto,
};

pub fn map_metadata(dto: PageMetadataDto) -> PageMetadata {
    PageMetadata {
        next_cursor: dto.next_cursor,
        next_page: dto.next_page,
        current_page: dto.current_page,
        page_size: dto.page_size,
        total_items: dto.total_items,
        total_pages: dto.total_pages,
    }
}

pub fn map_stats(dto: Option<StatsDto>) -> ModelStats {
    let dto = dto.unwrap_or_default();
    ModelStats {
        download_count: dto.download_count,
        favorite_count: dto.favorite_count,
        comment_count: dto.comment_count,
        rating: dto.rating,
        rating_count: dto.rating_count,
    }
}

pub fn map_creator(dto: CreatorDto) -> Creator {
    Creator {
        username: dto.username,
        image: dto.image,
        model_count: dto.model_count,
        link: dto.link,
    }
}

pub fn map_tag(dto: crate::dto::TagDto) -> TagInfo {
    TagInfo {
        name: dto.name,
        model_count: dto.model_count,
        link: dto.link,
    }
}

fn map_generation_meta(dto: GenerationMetaDto) -> GenerationMeta {
    GenerationMeta {
        prompt: dto.prompt,
        negative_prompt: dto.negative_prompt,
        sampler: dto.sampler,
        cfg_scale: dto.cfg_scale,
        steps: dto.steps,
        seed: dto.seed,
        model: dto.model,
        size: dto.size,
    }
}

/// Resolve the (flag, level) pair from the two wire fields.
///
/// The `nsfw` field may be a boolean flag or a level string; `nsfwLevel`
/// may be absent. An unrecognized level on a flagged image resolves to `X`.
fn resolve_nsfw(nsfw: Option<&Value>, nsfw_level: Option<&str>) -> (bool, NsfwLevel) {
    let level_from_string = |s: &str, flagged: bool| {
        NsfwLevel::from_api_param(s).unwrap_or(if flagged { NsfwLevel::X } else { NsfwLevel::None })
    };

    match nsfw {
        Some(Value::Bool(flag)) => {
            let level = match nsfw_level {
                Some(s) => level_from_string(s, *flag),
                None if *flag => NsfwLevel::X,
                None => NsfwLevel::None,
            };
            (*flag || level > NsfwLevel::None, level)
        }
        Some(Value::String(s)) => {
            let level = level_from_string(s, true);
            (level > NsfwLevel::None, level)
        }
        _ => match nsfw_level {
            Some(s) => {
                let level = level_from_string(s, false);
                (level > NsfwLevel::None, level)
            }
            None => (false, NsfwLevel::None),
        },
    }
}

pub fn map_model_image(dto: ImageDto) -> ModelImage {
    let (nsfw, nsfw_level) = resolve_nsfw(dto.nsfw.as_ref(), dto.nsfw_level.as_deref());
    ModelImage {
        url: dto.url,
        nsfw,
        nsfw_level,
        width: dto.width.unwrap_or(0),
        height: dto.height.unwrap_or(0),
        hash: dto.hash,
        meta: dto.meta.map(map_generation_meta),
    }
}

fn map_image_stats(dto: Option<ImageStatsDto>) -> ImageStats {
    let dto = dto.unwrap_or_default();
    ImageStats {
        like_count: dto.like_count,
        heart_count: dto.heart_count,
        laugh_count: dto.laugh_count,
        cry_count: dto.cry_count,
        comment_count: dto.comment_count,
    }
}

pub fn map_image(dto: ImageDto) -> Image {
    let (nsfw, nsfw_level) = resolve_nsfw(dto.nsfw.as_ref(), dto.nsfw_level.as_deref());
    Image {
        id: dto.id.unwrap_or(0),
        url: dto.url,
        nsfw,
        nsfw_level,
        width: dto.width.unwrap_or(0),
        height: dto.height.unwrap_or(0),
        hash: dto.hash,
        username: dto.username,
        created_at: dto.created_at,
        stats: map_image_stats(dto.stats),
        meta: dto.meta.map(map_generation_meta),
    }
}

fn map_file(dto: ModelFileDto) -> ModelFile {
    let (sha256, autov2) = dto
        .hashes
        .map_or((None, None), |h| (h.sha256, h.autov2));
    ModelFile {
        name: dto.name,
        size_kb: dto.size_kb,
        file_type: dto.file_type,
        download_url: dto.download_url,
        sha256,
        autov2,
    }
}

/// Map a version, backfilling `model_id` from the parent when the payload
/// omits it.
pub fn map_version(dto: ModelVersionDto, parent_model_id: i64) -> ModelVersion {
    ModelVersion {
        id: dto.id,
        model_id: dto.model_id.unwrap_or(parent_model_id),
        name: dto.name,
        created_at: dto.created_at,
        base_model: dto.base_model,
        trained_words: dto.trained_words,
        download_url: dto.download_url,
        files: dto.files.into_iter().map(map_file).collect(),
        images: dto.images.into_iter().map(map_model_image).collect(),
        stats: dto.stats.map(|s| map_stats(Some(s))),
    }
}

pub fn map_model(dto: ModelDto) -> Model {
    let model_id = dto.id;
    Model {
        id: dto.id,
        name: dto.name,
        description: dto.description,
        model_type: dto
            .model_type
            .as_deref()
            .map_or(ModelType::Other, ModelType::from_api_param),
        nsfw: dto.nsfw,
        tags: dto.tags,
        creator: dto.creator.map(map_creator),
        stats: map_stats(dto.stats),
        versions: dto
            .model_versions
            .into_iter()
            .map(|v| map_version(v, model_id))
            .collect(),
    }
}

pub fn map_models_response(dto: ModelsResponseDto) -> PaginatedResult<Model> {
    PaginatedResult {
        items: dto.items.into_iter().map(map_model).collect(),
        metadata: map_metadata(dto.metadata),
    }
}

pub fn map_images_response(dto: ImagesResponseDto) -> PaginatedResult<Image> {
    PaginatedResult {
        items: dto.items.into_iter().map(map_image).collect(),
        metadata: map_metadata(dto.metadata),
    }
}

pub fn map_creators_response(dto: CreatorsResponseDto) -> PaginatedResult<Creator> {
    PaginatedResult {
        items: dto.items.into_iter().map(map_creator).collect(),
        metadata: map_metadata(dto.metadata),
    }
}

pub fn map_tags_response(dto: TagsResponseDto) -> PaginatedResult<TagInfo> {
    PaginatedResult {
        items: dto.items.into_iter().map(map_tag).collect(),
        metadata: map_metadata(dto.metadata),
    }
}
