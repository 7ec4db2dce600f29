//! Renders the final raster from the original image, the crop box, and the
//! transform state. The original is never written to; every save composites
//! from scratch so edits stay reversible.

use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::{DynamicImage, GenericImageView, RgbaImage};
use thiserror::Error;

use crate::crop::CropBox;
use crate::transform::{Rotation, TransformState};

/// Encode quality for the persisted raster.
pub const JPEG_QUALITY: u8 = 92;

pub type CompositeResult<T> = std::result::Result<T, CompositeError>;

#[derive(Debug, Error)]
pub enum CompositeError {
    #[error("source image failed to decode: {0}")]
    Decode(#[source] image::ImageError),
    #[error("source image has zero dimensions")]
    EmptySource,
    #[error("encoding output failed: {0}")]
    Encode(#[source] image::ImageError),
}

/// Decodes an encoded source raster, rejecting empty images.
pub fn decode_source(bytes: &[u8]) -> CompositeResult<DynamicImage> {
    let image = image::load_from_memory(bytes).map_err(CompositeError::Decode)?;
    let (width, height) = image.dimensions();
    if width == 0 || height == 0 {
        return Err(CompositeError::EmptySource);
    }
    Ok(image)
}

/// Source pixel rectangle for a crop box, clamped to the image frame.
fn source_rect(crop: CropBox, width: u32, height: u32) -> (u32, u32, u32, u32) {
    let src_x = (crop.x / 100.0 * f64::from(width)).round() as u32;
    let src_y = (crop.y / 100.0 * f64::from(height)).round() as u32;
    let src_x = src_x.min(width.saturating_sub(1));
    let src_y = src_y.min(height.saturating_sub(1));
    let src_w = ((crop.width / 100.0 * f64::from(width)).round() as u32)
        .clamp(1, width - src_x);
    let src_h = ((crop.height / 100.0 * f64::from(height)).round() as u32)
        .clamp(1, height - src_y);
    (src_x, src_y, src_w, src_h)
}

/// Composites crop, scale, rotation, flips, and brightness/contrast into a
/// single output raster read entirely from `source`.
pub fn composite(
    source: &DynamicImage,
    crop: CropBox,
    transform: &TransformState,
) -> CompositeResult<RgbaImage> {
    let (width, height) = source.dimensions();
    if width == 0 || height == 0 {
        return Err(CompositeError::EmptySource);
    }

    let (src_x, src_y, src_w, src_h) = source_rect(crop, width, height);
    let cropped = source.crop_imm(src_x, src_y, src_w, src_h);

    let scale = f64::from(transform.scale) / 100.0;
    let out_w = ((f64::from(src_w) * scale).round() as u32).max(1);
    let out_h = ((f64::from(src_h) * scale).round() as u32).max(1);
    let scaled = if (out_w, out_h) == (src_w, src_h) {
        cropped
    } else {
        cropped.resize_exact(out_w, out_h, FilterType::Lanczos3)
    };

    // Flips mirror the source frame and only then the quarter turn is
    // applied, matching a canvas that draws through negative scale factors
    // before rotating.
    let flipped = match (transform.flip_h, transform.flip_v) {
        (false, false) => scaled,
        (true, false) => scaled.fliph(),
        (false, true) => scaled.flipv(),
        (true, true) => scaled.fliph().flipv(),
    };

    // rotate90/rotate270 swap the canvas axes, so a quarter turn is never
    // clipped by the pre-rotation frame.
    let rotated = match transform.rotation {
        Rotation::Deg0 => flipped,
        Rotation::Deg90 => flipped.rotate90(),
        Rotation::Deg180 => flipped.rotate180(),
        Rotation::Deg270 => flipped.rotate270(),
    };

    let mut output = rotated.into_rgba8();
    apply_brightness_contrast(&mut output, transform.brightness, transform.contrast);
    Ok(output)
}

/// Percentage-multiplier brightness and contrast, 100 = identity.
///
/// Brightness multiplies each channel; contrast re-spreads values around
/// mid-gray. Matches the CSS `brightness()`/`contrast()` filter semantics.
fn apply_brightness_contrast(image: &mut RgbaImage, brightness: u16, contrast: u16) {
    if brightness == 100 && contrast == 100 {
        return;
    }

    let brightness = f32::from(brightness) / 100.0;
    let contrast = f32::from(contrast) / 100.0;
    let mut lut = [0_u8; 256];
    for (value, slot) in lut.iter_mut().enumerate() {
        let normalized = value as f32 / 255.0;
        let adjusted = (normalized * brightness - 0.5) * contrast + 0.5;
        *slot = (adjusted * 255.0).round().clamp(0.0, 255.0) as u8;
    }

    for pixel in image.pixels_mut() {
        pixel.0[0] = lut[usize::from(pixel.0[0])];
        pixel.0[1] = lut[usize::from(pixel.0[1])];
        pixel.0[2] = lut[usize::from(pixel.0[2])];
    }
}

/// Encodes the composited raster as JPEG at the persisted quality.
pub fn encode_jpeg(image: &RgbaImage, quality: u8) -> CompositeResult<Vec<u8>> {
    let rgb = DynamicImage::ImageRgba8(image.clone()).into_rgb8();
    let mut bytes = Vec::new();
    JpegEncoder::new_with_quality(&mut bytes, quality)
        .encode(
            rgb.as_raw(),
            rgb.width(),
            rgb.height(),
            image::ExtendedColorType::Rgb8,
        )
        .map_err(CompositeError::Encode)?;
    Ok(bytes)
}
