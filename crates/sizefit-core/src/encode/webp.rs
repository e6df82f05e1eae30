//! Lossy WebP output through libwebp.
//!
//! The `image` crate only writes lossless WebP, so lossy output needs the
//! `webp` feature. Builds without it (notably wasm32) report the format as
//! unsupported instead of silently falling back to another codec.

use super::{check_layout, EncodeError, EncodeFormat};
use crate::decode::RasterImage;

/// Encode a raster to lossy WebP bytes.
///
/// `quality` is on libwebp's 0-100 scale.
#[cfg(feature = "webp")]
pub fn encode_webp(image: &RasterImage, quality: f32) -> Result<Vec<u8>, EncodeError> {
    check_layout(image)?;

    let encoder = webp::Encoder::from_rgba(&image.pixels, image.width, image.height);
    let memory = encoder
        .encode_simple(false, quality.clamp(0.0, 100.0))
        .map_err(|e| EncodeError::EncodingFailed {
            format: EncodeFormat::Webp,
            reason: format!("{e:?}"),
        })?;

    Ok(memory.to_vec())
}

#[cfg(not(feature = "webp"))]
pub fn encode_webp(image: &RasterImage, _quality: f32) -> Result<Vec<u8>, EncodeError> {
    check_layout(image)?;
    Err(EncodeError::UnsupportedFormat(format!(
        "{} output requires the `webp` feature",
        EncodeFormat::Webp
    )))
}

#[cfg(all(test, feature = "webp"))]
mod tests {
    use super::*;

    fn riff_webp(bytes: &[u8]) -> bool {
        bytes.len() > 12 && &bytes[0..4] == b"RIFF" && &bytes[8..12] == b"WEBP"
    }

    fn textured(width: u32, height: u32) -> RasterImage {
        let mut pixels = Vec::with_capacity(RasterImage::expected_len(width, height));
        for y in 0..height {
            for x in 0..width {
                pixels.extend_from_slice(&[(x * y % 256) as u8, (x * 3) as u8, (y * 5) as u8, 255]);
            }
        }
        RasterImage::new(width, height, pixels)
    }

    #[test]
    fn test_encode_webp_container() {
        let webp = encode_webp(&RasterImage::filled(16, 16, [0, 128, 255, 255]), 80.0).unwrap();
        assert!(riff_webp(&webp));
    }

    #[test]
    fn test_encode_webp_quality_affects_size() {
        let img = textured(96, 96);
        let low = encode_webp(&img, 5.0).unwrap();
        let high = encode_webp(&img, 95.0).unwrap();
        assert!(high.len() > low.len());
    }

    #[test]
    fn test_encode_webp_decodes_back() {
        let img = textured(20, 10);
        let decoded = crate::decode::decode_image(&encode_webp(&img, 90.0).unwrap()).unwrap();
        assert_eq!((decoded.width, decoded.height), (20, 10));
    }
}
