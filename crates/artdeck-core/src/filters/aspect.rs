//! Aspect-ratio classification of images.

use crate::domain::{AspectRatio, Image, ModelImage};

/// Anything with pixel dimensions.
pub trait Dimensioned {
    fn width(&self) -> u32;
    fn height(&self) -> u32;
}

impl Dimensioned for ModelImage {
    fn width(&self) -> u32 {
        self.width
    }
    fn height(&self) -> u32 {
        self.height
    }
}

impl Dimensioned for Image {
    fn width(&self) -> u32 {
        self.width
    }
    fn height(&self) -> u32 {
        self.height
    }
}

/// Retain only images matching `aspect`, preserving order.
pub fn filter_by_aspect<T: Dimensioned>(images: Vec<T>, aspect: AspectRatio) -> Vec<T> {
    images
        .into_iter()
        .filter(|image| AspectRatio::classify(image.width(), image.height()) == aspect)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::NsfwLevel;

    fn image(url: &str, width: u32, height: u32) -> ModelImage {
        ModelImage {
            url: url.to_string(),
            nsfw: false,
            nsfw_level: NsfwLevel::None,
            width,
            height,
            hash: None,
            meta: None,
        }
    }

    #[test]
    fn test_filter_by_aspect() {
        let images = vec![
            image("p", 512, 768),
            image("l", 768, 512),
            image("s", 640, 640),
            image("p2", 100, 101),
        ];

        let portraits = filter_by_aspect(images.clone(), AspectRatio::Portrait);
        let urls: Vec<&str> = portraits.iter().map(|i| i.url.as_str()).collect();
        assert_eq!(urls, vec!["p", "p2"]);

        let squares = filter_by_aspect(images.clone(), AspectRatio::Square);
        assert_eq!(squares.len(), 1);
        assert_eq!(squares[0].url, "s");

        let landscapes = filter_by_aspect(images, AspectRatio::Landscape);
        assert_eq!(landscapes.len(), 1);
        assert_eq!(landscapes[0].url, "l");
    }

    #[test]
    fn test_exact_equality_is_square() {
        // One pixel off is not square; there is no tolerance band.
        assert_eq!(AspectRatio::classify(513, 512), AspectRatio::Landscape);
        assert_eq!(AspectRatio::classify(512, 513), AspectRatio::Portrait);
    }
}
