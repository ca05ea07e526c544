//! Screenshots and their images

use super::enums::{ImageKind, ScreenshotKind};
use super::TranslatedString;

/// A single image belonging to a screenshot
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Image {
    /// Where the image can be fetched from
    pub url: String,
    /// Source image or thumbnail
    pub kind: ImageKind,
    /// Width in pixels, 0 when unspecified
    pub width: u32,
    /// Height in pixels, 0 when unspecified
    pub height: u32,
}

impl Image {
    /// Create a new image pointing at the given URL
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }
}

/// A screenshot of a component
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Screenshot {
    /// Whether this is the default screenshot
    pub kind: ScreenshotKind,
    /// Caption text per locale
    pub caption: TranslatedString,
    /// Images in document order, usually one source plus thumbnails
    pub images: Vec<Image>,
}

impl Screenshot {
    /// Create a new screenshot
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the caption for a locale
    pub fn set_caption(&mut self, caption: impl Into<String>, locale: impl Into<String>) {
        self.caption.insert(locale.into(), caption.into());
    }

    /// Add an image
    pub fn add_image(&mut self, image: Image) {
        self.images.push(image);
    }

    /// A screenshot is only useful if it carries at least one image
    pub fn is_valid(&self) -> bool {
        !self.images.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_screenshot_validity() {
        let mut sshot = Screenshot::new();
        assert!(!sshot.is_valid());

        sshot.add_image(Image::new("https://example.org/shot.png"));
        assert!(sshot.is_valid());
    }

    #[test]
    fn test_image_defaults() {
        let img = Image::new("https://example.org/a.png");
        assert_eq!(img.kind, ImageKind::Source);
        assert_eq!(img.width, 0);
        assert_eq!(img.height, 0);
    }
}
