//! Contain-fit mapping between the natural image and its on-screen viewport.

use crate::geometry::{ContainerSize, NaturalSize, PercentDelta, PixelDelta};

/// Rendered rectangle of the image inside a fixed-size viewport under
/// "contain" fitting, in viewport pixels.
///
/// The rendered box keeps the natural aspect ratio and is centered along
/// the axis that does not fill the container (letterbox or pillarbox).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImageBounds {
    pub offset_x: f64,
    pub offset_y: f64,
    pub rendered_width: f64,
    pub rendered_height: f64,
    pub container_width: f64,
    pub container_height: f64,
}

impl ImageBounds {
    /// Computes the contain-fit bounds, or `None` when either size has a
    /// zero dimension (image not decoded yet, container not laid out).
    /// Callers must not run resize/move math against stale or absent bounds.
    pub fn resolve(natural: NaturalSize, container: ContainerSize) -> Option<Self> {
        if !natural.is_ready() || !container.is_ready() {
            return None;
        }

        let image_aspect = natural.aspect_ratio();
        let container_aspect = container.aspect_ratio();

        let (rendered_width, rendered_height) = if image_aspect > container_aspect {
            // Image relatively wider: fit to container width, letterbox.
            (container.width, container.width / image_aspect)
        } else {
            // Fit to container height, pillarbox.
            (container.height * image_aspect, container.height)
        };

        Some(Self {
            offset_x: (container.width - rendered_width) / 2.0,
            offset_y: (container.height - rendered_height) / 2.0,
            rendered_width,
            rendered_height,
            container_width: container.width,
            container_height: container.height,
        })
    }

    /// Converts a pointer delta in viewport pixels into percentage units of
    /// the natural image, which is the space all crop math runs in.
    pub fn to_percent_delta(&self, delta: PixelDelta) -> PercentDelta {
        PercentDelta::new(
            delta.dx / self.rendered_width * 100.0,
            delta.dy / self.rendered_height * 100.0,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn wide_image_fits_container_width_with_letterbox() {
        let bounds = ImageBounds::resolve(
            NaturalSize::new(2000, 1000),
            ContainerSize::new(400.0, 400.0),
        )
        .expect("bounds should resolve");

        assert_close(bounds.rendered_width, 400.0);
        assert_close(bounds.rendered_height, 200.0);
        assert_close(bounds.offset_x, 0.0);
        assert_close(bounds.offset_y, 100.0);
    }

    #[test]
    fn tall_image_fits_container_height_with_pillarbox() {
        let bounds = ImageBounds::resolve(
            NaturalSize::new(500, 1000),
            ContainerSize::new(400.0, 400.0),
        )
        .expect("bounds should resolve");

        assert_close(bounds.rendered_width, 200.0);
        assert_close(bounds.rendered_height, 400.0);
        assert_close(bounds.offset_x, 100.0);
        assert_close(bounds.offset_y, 0.0);
    }

    #[test]
    fn rendered_box_preserves_natural_aspect_ratio() {
        let natural = NaturalSize::new(1234, 567);
        let bounds = ImageBounds::resolve(natural, ContainerSize::new(300.0, 500.0))
            .expect("bounds should resolve");
        assert_close(
            bounds.rendered_width / bounds.rendered_height,
            natural.aspect_ratio(),
        );
    }

    #[test]
    fn zero_dimensions_report_not_ready() {
        assert_eq!(
            ImageBounds::resolve(NaturalSize::new(0, 0), ContainerSize::new(400.0, 400.0)),
            None
        );
        assert_eq!(
            ImageBounds::resolve(NaturalSize::new(800, 600), ContainerSize::new(0.0, 400.0)),
            None
        );
    }

    #[test]
    fn pixel_delta_converts_to_percent_of_rendered_size() {
        let bounds = ImageBounds::resolve(
            NaturalSize::new(1000, 1000),
            ContainerSize::new(500.0, 500.0),
        )
        .expect("bounds should resolve");

        let percent = bounds.to_percent_delta(PixelDelta::new(50.0, -125.0));
        assert_close(percent.dx, 10.0);
        assert_close(percent.dy, -25.0);
    }
}
