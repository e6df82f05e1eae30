//! JPEG output.
//!
//! JPEG has no alpha channel. Like a canvas export, transparent pixels are
//! composited onto black before encoding.

use image::codecs::jpeg::JpegEncoder;
use image::ExtendedColorType;
use image::ImageEncoder;

use super::{check_layout, EncodeError, EncodeFormat};
use crate::decode::RasterImage;

/// Encode a raster to JPEG bytes.
///
/// # Arguments
///
/// * `image` - RGBA raster to encode
/// * `quality` - JPEG quality (1-100, where 100 is highest quality)
///
/// # Errors
///
/// Returns an error if the raster has a zero dimension, a buffer that does
/// not match its dimensions, or if the encoder fails.
pub fn encode_jpeg(image: &RasterImage, quality: u8) -> Result<Vec<u8>, EncodeError> {
    check_layout(image)?;

    let quality = quality.clamp(1, 100);
    let rgb = flatten_onto_black(&image.pixels);

    let mut buffer = Vec::new();
    JpegEncoder::new_with_quality(&mut buffer, quality)
        .write_image(&rgb, image.width, image.height, ExtendedColorType::Rgb8)
        .map_err(|e| EncodeError::EncodingFailed {
            format: EncodeFormat::Jpeg,
            reason: e.to_string(),
        })?;

    Ok(buffer)
}

/// Drop the alpha channel, premultiplying each color against black.
fn flatten_onto_black(rgba: &[u8]) -> Vec<u8> {
    let mut rgb = Vec::with_capacity(rgba.len() / 4 * 3);
    for px in rgba.chunks_exact(4) {
        let alpha = px[3] as u16;
        for &channel in &px[..3] {
            rgb.push(((channel as u16 * alpha + 127) / 255) as u8);
        }
    }
    rgb
}
