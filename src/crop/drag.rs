//! Translating the crop box without changing its size.

use crate::geometry::PercentDelta;

use super::snap::SnapPolicy;
use super::CropBox;

/// Moves the box captured at gesture start by `delta` percent, snapping the
/// origin and keeping the whole box inside the frame. Width and height are
/// never altered by a move gesture.
pub fn moved_box(start: CropBox, delta: PercentDelta, snap: SnapPolicy) -> CropBox {
    let x = snap.apply(start.x + delta.dx);
    let y = snap.apply(start.y + delta.dy);
    CropBox {
        x: x.clamp(0.0, 100.0 - start.width),
        y: y.clamp(0.0, 100.0 - start.height),
        ..start
    }
}
