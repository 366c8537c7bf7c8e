//! Catalog domain types.
//!
//! These types represent models, versions, images, creators and tags as the
//! rest of the system sees them, independent of the wire format.

use serde::{Deserialize, Serialize};

// ─────────────────────────────────────────────────────────────────────────────
// Enums
// ─────────────────────────────────────────────────────────────────────────────

/// Kind of a catalog model.
///
/// Closed enum: wire values the client does not recognize map to `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ModelType {
    Checkpoint,
    TextualInversion,
    Hypernetwork,
    AestheticGradient,
    Lora,
    LoCon,
    Controlnet,
    Upscaler,
    MotionModule,
    Vae,
    Poses,
    Wildcards,
    Workflows,
    #[default]
    Other,
}

impl ModelType {
    /// Exact literal the remote API uses for this type.
    ///
    /// Fixed lookup table; never derived from the variant identifier.
    pub const fn as_api_param(self) -> &'static str {
        match self {
            Self::Checkpoint => "Checkpoint",
            Self::TextualInversion => "TextualInversion",
            Self::Hypernetwork => "Hypernetwork",
            Self::AestheticGradient => "AestheticGradient",
            Self::Lora => "LORA",
            Self::LoCon => "LoCon",
            Self::Controlnet => "Controlnet",
            Self::Upscaler => "Upscaler",
            Self::MotionModule => "MotionModule",
            Self::Vae => "VAE",
            Self::Poses => "Poses",
            Self::Wildcards => "Wildcards",
            Self::Workflows => "Workflows",
            Self::Other => "Other",
        }
    }

    /// Parse a wire value. Unknown strings map to `Other`.
    pub fn from_api_param(value: &str) -> Self {
        match value {
            "Checkpoint" => Self::Checkpoint,
            "TextualInversion" => Self::TextualInversion,
            "Hypernetwork" => Self::Hypernetwork,
            "AestheticGradient" => Self::AestheticGradient,
            "LORA" => Self::Lora,
            "LoCon" => Self::LoCon,
            "Controlnet" => Self::Controlnet,
            "Upscaler" => Self::Upscaler,
            "MotionModule" => Self::MotionModule,
            "VAE" => Self::Vae,
            "Poses" => Self::Poses,
            "Wildcards" => Self::Wildcards,
            "Workflows" => Self::Workflows,
            _ => Self::Other,
        }
    }
}

/// Content-maturity classification attached to images.
///
/// Ordered: `None < Soft < Mature < X`. Distinct from the boolean `nsfw`
/// flag carried by models and images.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
pub enum NsfwLevel {
    #[default]
    None,
    Soft,
    Mature,
    X,
}

impl NsfwLevel {
    /// Exact literal the remote API uses for this level.
    pub const fn as_api_param(self) -> &'static str {
        match self {
            Self::None => "None",
            Self::Soft => "Soft",
            Self::Mature => "Mature",
            Self::X => "X",
        }
    }

    /// Parse a wire value. Returns `None` for unrecognized strings so the
    /// caller can decide how conservative to be.
    pub fn from_api_param(value: &str) -> Option<Self> {
        match value {
            "None" => Some(Self::None),
            "Soft" => Some(Self::Soft),
            "Mature" => Some(Self::Mature),
            "X" => Some(Self::X),
            _ => Option::None,
        }
    }
}

/// Shape classification of an image, by raw pixel dimensions.
///
/// `width == height` is square; there is no tolerance band for near-square
/// ratios.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AspectRatio {
    Portrait,
    Landscape,
    Square,
}

impl AspectRatio {
    /// Classify a width/height pair.
    pub const fn classify(width: u32, height: u32) -> Self {
        if width == height {
            Self::Square
        } else if width > height {
            Self::Landscape
        } else {
            Self::Portrait
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Entities
// ─────────────────────────────────────────────────────────────────────────────

/// Aggregate statistics for a model or model version.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ModelStats {
    pub download_count: u64,
    pub favorite_count: u64,
    pub comment_count: u64,
    pub rating: f64,
    pub rating_count: u64,
}

/// The account that published a model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Creator {
    pub username: String,
    /// Avatar image URL.
    pub image: Option<String>,
    pub model_count: Option<u32>,
    pub link: Option<String>,
}

/// A tag with catalog-wide usage counts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TagInfo {
    pub name: String,
    pub model_count: Option<u32>,
    pub link: Option<String>,
}

/// Generation parameters attached to an image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct GenerationMeta {
    pub prompt: Option<String>,
    pub negative_prompt: Option<String>,
    pub sampler: Option<String>,
    pub cfg_scale: Option<f64>,
    pub steps: Option<u32>,
    pub seed: Option<i64>,
    /// Name of the model the image was generated with.
    pub model: Option<String>,
    /// Size string as reported by the generator (e.g. "512x768").
    pub size: Option<String>,
}

/// An image attached to a model version.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelImage {
    pub url: String,
    pub nsfw: bool,
    pub nsfw_level: NsfwLevel,
    pub width: u32,
    pub height: u32,
    /// Content hash, when the source provides one.
    pub hash: Option<String>,
    pub meta: Option<GenerationMeta>,
}

/// Reaction counts for a gallery image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ImageStats {
    pub like_count: u64,
    pub heart_count: u64,
    pub laugh_count: u64,
    pub cry_count: u64,
    pub comment_count: u64,
}

/// A standalone gallery image from the image search endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Image {
    pub id: i64,
    pub url: String,
    pub nsfw: bool,
    pub nsfw_level: NsfwLevel,
    pub width: u32,
    pub height: u32,
    pub hash: Option<String>,
    pub username: Option<String>,
    pub created_at: Option<String>,
    pub stats: ImageStats,
    pub meta: Option<GenerationMeta>,
}

/// A downloadable file belonging to a model version.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelFile {
    pub name: String,
    pub size_kb: Option<f64>,
    pub file_type: Option<String>,
    pub download_url: Option<String>,
    pub sha256: Option<String>,
    pub autov2: Option<String>,
}

/// A published version of a model.
///
/// Belongs to exactly one [`Model`]; `model_id` is backfilled from the
/// parent when the wire payload omits it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelVersion {
    pub id: i64,
    pub model_id: i64,
    pub name: String,
    pub created_at: Option<String>,
    pub base_model: Option<String>,
    pub trained_words: Vec<String>,
    pub download_url: Option<String>,
    pub files: Vec<ModelFile>,
    pub images: Vec<ModelImage>,
    pub stats: Option<ModelStats>,
}

/// A catalog model with its versions, ordered newest-first as returned by
/// the source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Model {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub model_type: ModelType,
    pub nsfw: bool,
    pub tags: Vec<String>,
    pub creator: Option<Creator>,
    pub stats: ModelStats,
    pub versions: Vec<ModelVersion>,
}

impl Model {
    /// URL of the first image of the newest version, used as the thumbnail
    /// for favorites, collections and history snapshots.
    pub fn thumbnail_url(&self) -> Option<&str> {
        self.versions
            .iter()
            .flat_map(|v| v.images.iter())
            .map(|i| i.url.as_str())
            .next()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Pagination
// ─────────────────────────────────────────────────────────────────────────────

/// Continuation metadata returned alongside a page of results.
///
/// The cursor is an opaque token; absence of `next_cursor` signals the
/// terminal page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct PageMetadata {
    pub next_cursor: Option<String>,
    pub next_page: Option<String>,
    pub total_items: Option<u64>,
    pub current_page: Option<u32>,
    pub page_size: Option<u32>,
    pub total_pages: Option<u32>,
}

impl PageMetadata {
    /// Whether another page can be requested.
    pub const fn has_more(&self) -> bool {
        self.next_cursor.is_some()
    }
}

/// One page of domain items plus its continuation metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaginatedResult<T> {
    pub items: Vec<T>,
    pub metadata: PageMetadata,
}

impl<T> PaginatedResult<T> {
    /// A terminal page with no items.
    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            metadata: PageMetadata::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_type_round_trip() {
        for t in [
            ModelType::Checkpoint,
            ModelType::Lora,
            ModelType::Vae,
            ModelType::Other,
        ] {
            assert_eq!(ModelType::from_api_param(t.as_api_param()), t);
        }
    }

    #[test]
    fn test_model_type_unknown_maps_to_other() {
        assert_eq!(ModelType::from_api_param("SomeFutureType"), ModelType::Other);
        assert_eq!(ModelType::from_api_param(""), ModelType::Other);
    }

    #[test]
    fn test_model_type_wire_names_are_exact() {
        assert_eq!(ModelType::Lora.as_api_param(), "LORA");
        assert_eq!(ModelType::Vae.as_api_param(), "VAE");
        assert_eq!(ModelType::TextualInversion.as_api_param(), "TextualInversion");
    }

    #[test]
    fn test_nsfw_level_ordering() {
        assert!(NsfwLevel::None < NsfwLevel::Soft);
        assert!(NsfwLevel::Soft < NsfwLevel::Mature);
        assert!(NsfwLevel::Mature < NsfwLevel::X);
    }

    #[test]
    fn test_nsfw_level_parse() {
        assert_eq!(NsfwLevel::from_api_param("Soft"), Some(NsfwLevel::Soft));
        assert_eq!(NsfwLevel::from_api_param("Extreme"), None);
    }

    #[test]
    fn test_aspect_ratio_classify() {
        assert_eq!(AspectRatio::classify(512, 512), AspectRatio::Square);
        assert_eq!(AspectRatio::classify(768, 512), AspectRatio::Landscape);
        assert_eq!(AspectRatio::classify(512, 768), AspectRatio::Portrait);
    }

    #[test]
    fn test_page_metadata_has_more() {
        let terminal = PageMetadata::default();
        assert!(!terminal.has_more());

        let more = PageMetadata {
            next_cursor: Some("abc".to_string()),
            ..Default::default()
        };
        assert!(more.has_more());
    }

    #[test]
    fn test_thumbnail_url_takes_first_image_of_newest_version() {
        let model = Model {
            id: 1,
            name: "m".to_string(),
            description: None,
            model_type: ModelType::Checkpoint,
            nsfw: false,
            tags: vec![],
            creator: None,
            stats: ModelStats::default(),
            versions: vec![
                ModelVersion {
                    id: 10,
                    model_id: 1,
                    name: "v2".to_string(),
                    created_at: None,
                    base_model: None,
                    trained_words: vec![],
                    download_url: None,
                    files: vec![],
                    images: vec![ModelImage {
                        url: "https://img/newest.png".to_string(),
                        nsfw: false,
                        nsfw_level: NsfwLevel::None,
                        width: 512,
                        height: 512,
                        hash: None,
                        meta: None,
                    }],
                    stats: None,
                },
                ModelVersion {
                    id: 9,
                    model_id: 1,
                    name: "v1".to_string(),
                    created_at: None,
                    base_model: None,
                    trained_words: vec![],
                    download_url: None,
                    files: vec![],
                    images: vec![],
                    stats: None,
                },
            ],
        };

        assert_eq!(model.thumbnail_url(), Some("https://img/newest.png"));
    }
}
