//! Handle-driven crop resizing.
//!
//! Each of the eight handles is described by which edges it moves; a single
//! solver derives the new box from that description instead of one branch
//! per handle. The edge opposite a moved edge stays anchored.

use crate::geometry::{NaturalSize, PercentDelta};

use super::snap::SnapPolicy;
use super::{AspectPreset, CropBox};

/// The eight interactive crop handles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Handle {
    NorthWest,
    North,
    NorthEast,
    East,
    SouthEast,
    South,
    SouthWest,
    West,
}

/// Which side of an axis a handle drags. `Near` is the left/top edge, so
/// the origin shifts to keep the far edge anchored; `Far` is the
/// right/bottom edge and leaves the origin alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DraggedEdge {
    Near,
    Far,
}

#[derive(Debug, Clone, Copy)]
struct HandleSpec {
    horizontal: Option<DraggedEdge>,
    vertical: Option<DraggedEdge>,
}

impl Handle {
    pub const ALL: [Handle; 8] = [
        Self::NorthWest,
        Self::North,
        Self::NorthEast,
        Self::East,
        Self::SouthEast,
        Self::South,
        Self::SouthWest,
        Self::West,
    ];

    pub const fn is_corner(self) -> bool {
        matches!(
            self,
            Self::NorthWest | Self::NorthEast | Self::SouthEast | Self::SouthWest
        )
    }

    pub const fn is_edge(self) -> bool {
        !self.is_corner()
    }

    /// Whether this handle does anything under the given preset.
    ///
    /// A locked ratio needs both dimensions, so the top/bottom edge handles
    /// are inert (they stay visible in the UI but their drags are no-ops).
    pub fn enabled_for(self, preset: AspectPreset) -> bool {
        preset.is_free() || !matches!(self, Self::North | Self::South)
    }

    const fn spec(self) -> HandleSpec {
        use DraggedEdge::{Far, Near};
        match self {
            Self::NorthWest => HandleSpec {
                horizontal: Some(Near),
                vertical: Some(Near),
            },
            Self::North => HandleSpec {
                horizontal: None,
                vertical: Some(Near),
            },
            Self::NorthEast => HandleSpec {
                horizontal: Some(Far),
                vertical: Some(Near),
            },
            Self::East => HandleSpec {
                horizontal: Some(Far),
                vertical: None,
            },
            Self::SouthEast => HandleSpec {
                horizontal: Some(Far),
                vertical: Some(Far),
            },
            Self::South => HandleSpec {
                horizontal: None,
                vertical: Some(Far),
            },
            Self::SouthWest => HandleSpec {
                horizontal: Some(Near),
                vertical: Some(Far),
            },
            Self::West => HandleSpec {
                horizontal: Some(Near),
                vertical: None,
            },
        }
    }
}

/// A locked aspect ratio for resizing.
///
/// The target is a pixel-space width/height ratio; converting between the
/// crop box's percent axes requires the image's own pixel ratio, since one
/// percent of width and one percent of height span different pixel counts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AspectLock {
    target_ratio: f64,
    image_ratio: f64,
}

impl AspectLock {
    pub const fn new(target_ratio: f64, image_ratio: f64) -> Self {
        Self {
            target_ratio,
            image_ratio,
        }
    }

    /// Lock for a preset against a natural image, `None` when free.
    pub fn for_preset(preset: AspectPreset, natural: NaturalSize) -> Option<Self> {
        preset
            .ratio()
            .map(|target| Self::new(target, natural.aspect_ratio()))
    }

    pub const fn target_ratio(&self) -> f64 {
        self.target_ratio
    }

    /// Percent height matching a percent width at the locked pixel ratio.
    pub fn height_for_width(&self, width_percent: f64) -> f64 {
        width_percent * self.image_ratio / self.target_ratio
    }

    pub fn width_for_height(&self, height_percent: f64) -> f64 {
        height_percent * self.target_ratio / self.image_ratio
    }
}

/// Derives the crop box for a handle dragged by `delta` percent from the
/// box captured at gesture start, then snaps and clamps the result.
///
/// The minimum size is enforced on the raw solution before snapping, and
/// clamping runs last because snapping can push an edge out of the frame.
pub fn resized_box(
    start: CropBox,
    handle: Handle,
    delta: PercentDelta,
    lock: Option<AspectLock>,
    snap: SnapPolicy,
    min_percent: f64,
) -> CropBox {
    let spec = handle.spec();

    // Edge handles along the locked axis pair cannot hold the ratio.
    if lock.is_some() && spec.horizontal.is_none() {
        return start;
    }

    let mut width = start.width;
    let mut height = start.height;

    match spec.horizontal {
        Some(DraggedEdge::Far) => width = (start.width + delta.dx).max(min_percent),
        Some(DraggedEdge::Near) => width = (start.width - delta.dx).max(min_percent),
        None => {}
    }

    if let Some(lock) = lock {
        height = lock.height_for_width(width).max(min_percent);
    } else {
        match spec.vertical {
            Some(DraggedEdge::Far) => height = (start.height + delta.dy).max(min_percent),
            Some(DraggedEdge::Near) => height = (start.height - delta.dy).max(min_percent),
            None => {}
        }
    }

    let mut x = start.x;
    let mut y = start.y;
    if spec.horizontal == Some(DraggedEdge::Near) {
        x = start.x + (start.width - width);
    }
    if spec.vertical == Some(DraggedEdge::Near) {
        y = start.y + (start.height - height);
    }

    CropBox {
        x: snap.apply(x),
        y: snap.apply(y),
        width: snap.apply(width),
        height: snap.apply(height),
    }
    .clamped(min_percent)
}
