//! Whole-image transform state: scale, rotation, flips, brightness and
//! contrast. All fields are orthogonal multipliers interpreted against the
//! untouched original at composite time.

use serde::{Deserialize, Serialize};

use crate::crop::AspectPreset;

pub const SCALE_MIN_PERCENT: u16 = 25;
pub const SCALE_MAX_PERCENT: u16 = 200;
pub const FILTER_MIN_PERCENT: u16 = 50;
pub const FILTER_MAX_PERCENT: u16 = 150;

/// Quarter-turn rotation, clockwise degrees.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u16", into = "u16")]
pub enum Rotation {
    Deg0,
    Deg90,
    Deg180,
    Deg270,
}

impl Rotation {
    pub const fn degrees(self) -> u16 {
        match self {
            Self::Deg0 => 0,
            Self::Deg90 => 90,
            Self::Deg180 => 180,
            Self::Deg270 => 270,
        }
    }

    pub const fn rotated_cw(self) -> Self {
        match self {
            Self::Deg0 => Self::Deg90,
            Self::Deg90 => Self::Deg180,
            Self::Deg180 => Self::Deg270,
            Self::Deg270 => Self::Deg0,
        }
    }

    pub const fn rotated_ccw(self) -> Self {
        match self {
            Self::Deg0 => Self::Deg270,
            Self::Deg90 => Self::Deg0,
            Self::Deg180 => Self::Deg90,
            Self::Deg270 => Self::Deg180,
        }
    }

    /// A quarter turn swaps the output canvas axes.
    pub const fn swaps_axes(self) -> bool {
        matches!(self, Self::Deg90 | Self::Deg270)
    }
}

impl Default for Rotation {
    fn default() -> Self {
        Self::Deg0
    }
}

impl From<Rotation> for u16 {
    fn from(rotation: Rotation) -> Self {
        rotation.degrees()
    }
}

impl TryFrom<u16> for Rotation {
    type Error = String;

    fn try_from(degrees: u16) -> Result<Self, Self::Error> {
        match degrees {
            0 => Ok(Self::Deg0),
            90 => Ok(Self::Deg90),
            180 => Ok(Self::Deg180),
            270 => Ok(Self::Deg270),
            other => Err(format!("rotation must be a quarter turn, got {other}")),
        }
    }
}

/// Per-session transform settings, persisted inside `editSettings`.
///
/// Out-of-range values handed to the setters (or restored from an old
/// record) are clamped into their valid range rather than rejected, and
/// fields absent from an old record deserialize to their defaults.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TransformState {
    pub scale: u16,
    pub rotation: Rotation,
    pub flip_h: bool,
    pub flip_v: bool,
    pub brightness: u16,
    pub contrast: u16,
    pub crop_aspect: AspectPreset,
}

impl TransformState {
    pub fn set_scale(&mut self, scale: u16) {
        self.scale = scale.clamp(SCALE_MIN_PERCENT, SCALE_MAX_PERCENT);
    }

    pub fn set_brightness(&mut self, brightness: u16) {
        self.brightness = brightness.clamp(FILTER_MIN_PERCENT, FILTER_MAX_PERCENT);
    }

    pub fn set_contrast(&mut self, contrast: u16) {
        self.contrast = contrast.clamp(FILTER_MIN_PERCENT, FILTER_MAX_PERCENT);
    }

    pub fn rotate_cw(&mut self) {
        self.rotation = self.rotation.rotated_cw();
    }

    pub fn rotate_ccw(&mut self) {
        self.rotation = self.rotation.rotated_ccw();
    }

    pub fn toggle_flip_h(&mut self) {
        self.flip_h = !self.flip_h;
    }

    pub fn toggle_flip_v(&mut self) {
        self.flip_v = !self.flip_v;
    }

    /// Re-clamps every field into its valid range. Used when restoring a
    /// record written by an older build.
    pub fn normalized(mut self) -> Self {
        self.set_scale(self.scale);
        self.set_brightness(self.brightness);
        self.set_contrast(self.contrast);
        self
    }
}

impl Default for TransformState {
    fn default() -> Self {
        Self {
            scale: 100,
            rotation: Rotation::default(),
            flip_h: false,
            flip_v: false,
            brightness: 100,
            contrast: 100,
            crop_aspect: AspectPreset::default(),
        }
    }
}
