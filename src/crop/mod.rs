//! Crop box model: a percentage-space rectangle over the natural image,
//! aspect-ratio presets, and the clamping rules every edit passes through.

pub mod drag;
pub mod resize;
pub mod snap;

pub use drag::moved_box;
pub use resize::{resized_box, AspectLock, Handle};
pub use snap::SnapPolicy;

use serde::{Deserialize, Serialize};

use crate::geometry::NaturalSize;

/// Smallest crop extent on either axis, in percent of the natural image.
pub const CROP_MIN_PERCENT: f64 = 10.0;

/// Aspect-ratio presets offered by the post editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AspectPreset {
    #[serde(rename = "free")]
    Free,
    #[serde(rename = "1:1")]
    Square,
    #[serde(rename = "4:5")]
    Portrait4x5,
    #[serde(rename = "16:9")]
    Landscape16x9,
    #[serde(rename = "9:16")]
    Story9x16,
}

impl AspectPreset {
    pub const ALL: [AspectPreset; 5] = [
        Self::Free,
        Self::Square,
        Self::Portrait4x5,
        Self::Landscape16x9,
        Self::Story9x16,
    ];

    pub const fn is_free(self) -> bool {
        matches!(self, Self::Free)
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Free => "Free",
            Self::Square => "1:1",
            Self::Portrait4x5 => "4:5",
            Self::Landscape16x9 => "16:9",
            Self::Story9x16 => "9:16",
        }
    }

    /// Target width/height ratio, or `None` for free-form cropping.
    pub fn ratio(self) -> Option<f64> {
        match self {
            Self::Free => None,
            Self::Square => Some(1.0),
            Self::Portrait4x5 => Some(4.0 / 5.0),
            Self::Landscape16x9 => Some(16.0 / 9.0),
            Self::Story9x16 => Some(9.0 / 16.0),
        }
    }
}

impl Default for AspectPreset {
    fn default() -> Self {
        Self::Free
    }
}

/// Crop rectangle in percentage units (0-100) of the natural image.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CropBox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl CropBox {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// The whole frame, the state every edit session starts from.
    pub const fn full_frame() -> Self {
        Self::new(0.0, 0.0, 100.0, 100.0)
    }

    /// Largest centered crop matching an aspect preset.
    ///
    /// A `Free` preset resets to the full frame. A fixed ratio is compared
    /// against the image's own ratio: wider targets are constrained by full
    /// width, narrower ones by full height, and the result is centered.
    pub fn from_aspect_preset(preset: AspectPreset, natural: NaturalSize) -> Self {
        let Some(target_ratio) = preset.ratio() else {
            return Self::full_frame();
        };

        let image_ratio = natural.aspect_ratio();
        let (width, height) = if target_ratio > image_ratio {
            (100.0, 100.0 * image_ratio / target_ratio)
        } else {
            (100.0 * target_ratio / image_ratio, 100.0)
        };

        Self {
            x: (100.0 - width) / 2.0,
            y: (100.0 - height) / 2.0,
            width,
            height,
        }
    }

    /// Enforces the box invariants: size within `[min, 100]`, origin within
    /// the frame. Size is kept intact where possible by sliding the origin;
    /// only a box larger than the frame has its size capped.
    pub fn clamped(self, min_percent: f64) -> Self {
        let width = self.width.clamp(min_percent, 100.0);
        let height = self.height.clamp(min_percent, 100.0);
        Self {
            x: self.x.clamp(0.0, 100.0 - width),
            y: self.y.clamp(0.0, 100.0 - height),
            width,
            height,
        }
    }

    /// Pixel aspect ratio of the cropped region against a natural size.
    pub fn pixel_ratio(self, natural: NaturalSize) -> f64 {
        let width_px = self.width / 100.0 * f64::from(natural.width);
        let height_px = self.height / 100.0 * f64::from(natural.height);
        width_px / height_px.max(f64::MIN_POSITIVE)
    }
}

impl Default for CropBox {
    fn default() -> Self {
        Self::full_frame()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preset_labels_and_ratios_are_consistent() {
        assert_eq!(AspectPreset::Free.ratio(), None);
        assert_eq!(AspectPreset::Square.ratio(), Some(1.0));
        assert_eq!(AspectPreset::Free.label(), "Free");
        assert_eq!(AspectPreset::Portrait4x5.label(), "4:5");
    }

    #[test]
    fn all_contains_every_unique_variant() {
        for (i, a) in AspectPreset::ALL.iter().enumerate() {
            for (j, b) in AspectPreset::ALL.iter().enumerate() {
                if i != j {
                    assert_ne!(a, b, "ALL has duplicate at indices {i} and {j}");
                }
            }
        }
    }

    #[test]
    fn preset_serializes_to_backend_id() {
        let json = serde_json::to_string(&AspectPreset::Portrait4x5).expect("serialize preset");
        assert_eq!(json, "\"4:5\"");
        let back: AspectPreset = serde_json::from_str("\"9:16\"").expect("deserialize preset");
        assert_eq!(back, AspectPreset::Story9x16);
    }

    #[test]
    fn free_preset_resets_to_full_frame() {
        let natural = NaturalSize::new(1000, 1000);
        assert_eq!(
            CropBox::from_aspect_preset(AspectPreset::Free, natural),
            CropBox::full_frame()
        );
    }

    #[test]
    fn portrait_preset_on_square_image_is_height_constrained() {
        // 4:5 target (0.8) is narrower than a square image (1.0), so the
        // crop spans full height and is centered horizontally.
        let crop = CropBox::from_aspect_preset(AspectPreset::Portrait4x5, NaturalSize::new(1000, 1000));
        assert_eq!(crop, CropBox::new(10.0, 0.0, 80.0, 100.0));
    }

    #[test]
    fn landscape_preset_on_square_image_is_width_constrained() {
        let crop =
            CropBox::from_aspect_preset(AspectPreset::Landscape16x9, NaturalSize::new(1000, 1000));
        assert!((crop.width - 100.0).abs() < 1e-9);
        assert!((crop.height - 56.25).abs() < 1e-9);
        assert!((crop.y - 21.875).abs() < 1e-9);
    }

    #[test]
    fn clamped_slides_origin_before_shrinking_size() {
        let crop = CropBox::new(40.0, -10.0, 80.0, 50.0).clamped(CROP_MIN_PERCENT);
        assert_eq!(crop, CropBox::new(20.0, 0.0, 80.0, 50.0));
    }

    #[test]
    fn clamped_caps_oversized_box_to_frame() {
        let crop = CropBox::new(-5.0, 0.0, 140.0, 130.0).clamped(CROP_MIN_PERCENT);
        assert_eq!(crop, CropBox::new(0.0, 0.0, 100.0, 100.0));
    }

    #[test]
    fn clamped_grows_box_below_minimum_size() {
        let crop = CropBox::new(95.0, 95.0, 2.0, 2.0).clamped(CROP_MIN_PERCENT);
        assert!((crop.width - CROP_MIN_PERCENT).abs() < 1e-9);
        assert!((crop.height - CROP_MIN_PERCENT).abs() < 1e-9);
        assert!(crop.x + crop.width <= 100.0 + 1e-9);
        assert!(crop.y + crop.height <= 100.0 + 1e-9);
    }
}
