//! PNG output.

use image::codecs::png::PngEncoder;
use image::ExtendedColorType;
use image::ImageEncoder;

use super::{check_layout, EncodeError, EncodeFormat};
use crate::decode::RasterImage;

/// Encode a raster to PNG bytes.
///
/// Fully opaque rasters are written as RGB, which saves a quarter of the
/// uncompressed payload; anything with transparency keeps its alpha channel.
pub fn encode_png(image: &RasterImage) -> Result<Vec<u8>, EncodeError> {
    check_layout(image)?;

    let mut buffer = Vec::new();
    let encoder = PngEncoder::new(&mut buffer);

    let result = if image.has_transparency() {
        encoder.write_image(
            &image.pixels,
            image.width,
            image.height,
            ExtendedColorType::Rgba8,
        )
    } else {
        let rgb: Vec<u8> = image
            .pixels
            .chunks_exact(4)
            .flat_map(|px| [px[0], px[1], px[2]])
            .collect();
        encoder.write_image(&rgb, image.width, image.height, ExtendedColorType::Rgb8)
    };

    result.map_err(|e| EncodeError::EncodingFailed {
        format: EncodeFormat::Png,
        reason: e.to_string(),
    })?;

    Ok(buffer)
}
