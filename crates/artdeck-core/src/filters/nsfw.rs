//! NSFW gating of images and models.

use crate::domain::{Image, Model, ModelImage, NsfwFilterLevel, NsfwLevel};

/// Anything carrying an NSFW maturity level.
pub trait NsfwRated {
    fn nsfw_level(&self) -> NsfwLevel;
}

impl NsfwRated for ModelImage {
    fn nsfw_level(&self) -> NsfwLevel {
        self.nsfw_level
    }
}

impl NsfwRated for Image {
    fn nsfw_level(&self) -> NsfwLevel {
        self.nsfw_level
    }
}

/// Whether an image at `level` passes `filter`.
///
/// `Off` passes only `None`; `Soft` passes `None` and `Soft`; `All` passes
/// everything. Levels above `Soft` (Mature, X) are only reachable with
/// `All`.
pub const fn is_allowed(level: NsfwLevel, filter: NsfwFilterLevel) -> bool {
    match filter {
        NsfwFilterLevel::Off => matches!(level, NsfwLevel::None),
        NsfwFilterLevel::Soft => matches!(level, NsfwLevel::None | NsfwLevel::Soft),
        NsfwFilterLevel::All => true,
    }
}

/// Retain only images passing `filter`, preserving order.
///
/// `All` returns the input unchanged.
pub fn filter_images_by_level<T: NsfwRated>(images: Vec<T>, filter: NsfwFilterLevel) -> Vec<T> {
    if filter == NsfwFilterLevel::All {
        return images;
    }
    images
        .into_iter()
        .filter(|image| is_allowed(image.nsfw_level(), filter))
        .collect()
}

/// Filter every version's image list; drop models left with no imagery.
///
/// A model whose versions all end up imageless is not shown at all, even if
/// its metadata would otherwise match the search. Order of surviving models
/// is preserved. `All` returns the input unchanged.
pub fn filter_models_by_level(models: Vec<Model>, filter: NsfwFilterLevel) -> Vec<Model> {
    if filter == NsfwFilterLevel::All {
        return models;
    }
    models
        .into_iter()
        .filter_map(|mut model| {
            for version in &mut model.versions {
                let images = std::mem::take(&mut version.images);
                version.images = filter_images_by_level(images, filter);
            }
            let any_images = model.versions.iter().any(|v| !v.images.is_empty());
            any_images.then_some(model)
        })
        .collect()
}
