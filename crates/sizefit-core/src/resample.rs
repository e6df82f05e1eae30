//! Raster resampling for resolution descent.
//!
//! Provides the pixel-count lever of the size search. All functions return new
//! `RasterImage` instances without modifying the input.

use crate::decode::{FilterType, RasterImage};
use crate::encode::EncodeError;

/// Absorbs representation error in decimal scales such as `0.7`, so that
/// `1000 * 0.7` lands on 700 rather than 699.
const DIMENSION_EPSILON: f64 = 1e-6;

/// Resample a raster to exact dimensions.
///
/// # Arguments
///
/// * `image` - The source raster
/// * `width` - Target width in pixels
/// * `height` - Target height in pixels
/// * `filter` - Interpolation filter to use
///
/// # Errors
///
/// Returns `EncodeError::InvalidDimensions` if either target dimension is zero
/// and `EncodeError::InvalidPixelData` if the source buffer does not match its
/// own dimensions.
pub fn resample(
    image: &RasterImage,
    width: u32,
    height: u32,
    filter: FilterType,
) -> Result<RasterImage, EncodeError> {
    if width == 0 || height == 0 {
        return Err(EncodeError::InvalidDimensions { width, height });
    }

    // Fast path: if dimensions match, just clone
    if image.width == width && image.height == height {
        return Ok(image.clone());
    }

    let view = image.as_rgba_view().ok_or(EncodeError::InvalidPixelData {
        expected: RasterImage::expected_len(image.width, image.height),
        actual: image.pixels.len(),
    })?;

    let resized = image::imageops::resize(&view, width, height, filter.to_image_filter());

    Ok(RasterImage::from_rgba_image(resized))
}

/// Dimensions of a raster drawn at `scale`: `floor(width * scale)` by
/// `floor(height * scale)`, never smaller than one pixel.
pub fn scaled_dimensions(width: u32, height: u32, scale: f64) -> (u32, u32) {
    (scale_edge(width, scale), scale_edge(height, scale))
}

fn scale_edge(length: u32, scale: f64) -> u32 {
    let scaled = (length as f64 * scale + DIMENSION_EPSILON).floor();
    (scaled as u32).max(1)
}
