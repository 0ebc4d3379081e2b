/// Photo records and geometry helpers
///
/// These structs are the data model that flows between the data source
/// and the layout engine. The field set (id, pixel dimensions, the
/// multi-resolution `src` block, photographer, alt text, average color)
/// is the externally meaningful schema: any replacement data source must
/// preserve it field-for-field.

use serde::{Deserialize, Serialize};

/// Image URLs for a single photo at different resolutions.
///
/// `original` is the full-resolution asset; the remaining tiers are
/// pre-scaled variants the presentation layer picks from based on the
/// rendered column width.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct PhotoSrc {
    pub original: String,
    pub large: String,
    pub medium: String,
    pub small: String,
    pub tiny: String,
}

/// A single photo in the gallery.
///
/// Immutable once loaded. `width` and `height` are the pixel dimensions
/// of the original asset and should both be strictly positive; records
/// that violate this are still carried (the layout engine substitutes a
/// safe aspect ratio) but are reported as a data-quality issue.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Photo {
    /// Unique identifier within a loaded collection
    pub id: u64,
    /// Pixel width of the original asset
    pub width: u32,
    /// Pixel height of the original asset
    pub height: u32,
    /// Image URLs at multiple resolutions
    pub src: PhotoSrc,
    /// Name of the photographer
    pub photographer: String,
    /// Accessible description of the photo
    pub alt: String,
    /// Dominant color as a CSS hex string (e.g. "#6e7a52")
    pub avg_color: String,
}

impl Photo {
    /// Width-over-height aspect ratio.
    ///
    /// Returns `None` for degenerate geometry (zero width or height) so
    /// callers can substitute a safe default instead of dividing by zero.
    pub fn aspect_ratio(&self) -> Option<f32> {
        if self.width == 0 || self.height == 0 {
            return None;
        }
        let ratio = self.width as f32 / self.height as f32;
        ratio.is_finite().then_some(ratio)
    }
}

/// Build a placeholder photo for unit tests.
#[cfg(test)]
pub(crate) fn sample_photo(id: u64, width: u32, height: u32) -> Photo {
    Photo {
        id,
        width,
        height,
        src: PhotoSrc {
            original: format!("https://photos.test/{id}/original.jpg"),
            large: format!("https://photos.test/{id}/large.jpg"),
            medium: format!("https://photos.test/{id}/medium.jpg"),
            small: format!("https://photos.test/{id}/small.jpg"),
            tiny: format!("https://photos.test/{id}/tiny.jpg"),
        },
        photographer: "Test Photographer".to_string(),
        alt: format!("Sample photo {id}"),
        avg_color: "#808080".to_string(),
    }
}
