/// Shared geometric primitives used across the viewport, crop, and session modules.

/// Pixel dimensions of the full-resolution source image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NaturalSize {
    pub width: u32,
    pub height: u32,
}

impl NaturalSize {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub const fn is_ready(self) -> bool {
        self.width > 0 && self.height > 0
    }

    pub fn aspect_ratio(self) -> f64 {
        f64::from(self.width.max(1)) / f64::from(self.height.max(1))
    }
}

/// Pixel dimensions of the viewport the image is rendered into.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContainerSize {
    pub width: f64,
    pub height: f64,
}

impl ContainerSize {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn is_ready(self) -> bool {
        self.width > 0.0 && self.height > 0.0
    }

    pub fn aspect_ratio(self) -> f64 {
        self.width / self.height.max(f64::MIN_POSITIVE)
    }
}

/// Pointer movement in viewport pixels since the gesture started.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PixelDelta {
    pub dx: f64,
    pub dy: f64,
}

impl PixelDelta {
    pub const fn new(dx: f64, dy: f64) -> Self {
        Self { dx, dy }
    }
}

/// Pointer movement expressed in percentage units of the natural image.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PercentDelta {
    pub dx: f64,
    pub dy: f64,
}

impl PercentDelta {
    pub const fn new(dx: f64, dy: f64) -> Self {
        Self { dx, dy }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn natural_size_readiness_requires_both_dimensions() {
        assert!(NaturalSize::new(800, 600).is_ready());
        assert!(!NaturalSize::new(0, 600).is_ready());
        assert!(!NaturalSize::new(800, 0).is_ready());
    }

    #[test]
    fn aspect_ratio_matches_width_over_height() {
        let size = NaturalSize::new(1600, 900);
        assert!((size.aspect_ratio() - 16.0 / 9.0).abs() < 1e-9);
    }
}
