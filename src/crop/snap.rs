//! Grid snapping applied to every move/resize result before clamping.

/// Quantization policy for crop edits.
///
/// `free` corresponds to a held modifier key: while active, values pass
/// through with sub-percent precision. Snapping runs before clamping since
/// rounding can push a box edge out of the frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SnapPolicy {
    pub step: f64,
    pub free: bool,
}

pub const DEFAULT_SNAP_STEP_PERCENT: f64 = 5.0;

impl SnapPolicy {
    pub const fn new(step: f64, free: bool) -> Self {
        Self { step, free }
    }

    /// Rounds to the nearest multiple of `step`, unless free movement is
    /// active or the step is non-positive.
    pub fn apply(self, value: f64) -> f64 {
        if self.free || self.step <= 0.0 {
            return value;
        }
        (value / self.step).round() * self.step
    }
}

impl Default for SnapPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_SNAP_STEP_PERCENT, false)
    }
}
