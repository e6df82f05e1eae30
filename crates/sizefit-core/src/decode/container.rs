//! Container sniffing and decoding with EXIF orientation handling.

use std::io::Cursor;

use exif::{In, Reader, Tag};
use image::{DynamicImage, ImageFormat, ImageReader};

use super::{DecodeError, Orientation, RasterImage};
use crate::encode::EncodeFormat;

/// Identify the container of an encoded image from its leading bytes.
///
/// Only the formats the compressor can also write are recognized.
pub fn detect_format(bytes: &[u8]) -> Option<EncodeFormat> {
    match image::guess_format(bytes).ok()? {
        ImageFormat::Png => Some(EncodeFormat::Png),
        ImageFormat::Jpeg => Some(EncodeFormat::Jpeg),
        ImageFormat::WebP => Some(EncodeFormat::Webp),
        _ => None,
    }
}

/// Decode a PNG, JPEG or WebP file into an RGBA raster.
///
/// EXIF orientation is applied so the raster matches what a browser would
/// draw for the same file.
///
/// # Errors
///
/// Returns `DecodeError::EmptyInput` for an empty slice,
/// `DecodeError::UnsupportedFormat` for any other container, and
/// `DecodeError::CorruptedFile` when the decoder rejects the data.
pub fn decode_image(bytes: &[u8]) -> Result<RasterImage, DecodeError> {
    if bytes.is_empty() {
        return Err(DecodeError::EmptyInput);
    }

    let format = image::guess_format(bytes)
        .map_err(|e| DecodeError::UnsupportedFormat(e.to_string()))?;
    if !matches!(
        format,
        ImageFormat::Png | ImageFormat::Jpeg | ImageFormat::WebP
    ) {
        return Err(DecodeError::UnsupportedFormat(format!("{format:?}")));
    }

    let orientation = extract_orientation(bytes);

    let img = ImageReader::with_format(Cursor::new(bytes), format)
        .decode()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))?;

    let oriented = apply_orientation(img, orientation);
    Ok(RasterImage::from_rgba_image(oriented.into_rgba8()))
}

/// Read the EXIF orientation tag, defaulting to `Normal`.
fn extract_orientation(bytes: &[u8]) -> Orientation {
    let mut cursor = Cursor::new(bytes);
    let Ok(exif) = Reader::new().read_from_container(&mut cursor) else {
        return Orientation::Normal;
    };

    exif.get_field(Tag::Orientation, In::PRIMARY)
        .and_then(|field| field.value.get_uint(0))
        .map(Orientation::from)
        .unwrap_or_default()
}

fn apply_orientation(img: DynamicImage, orientation: Orientation) -> DynamicImage {
    match orientation {
        Orientation::Normal => img,
        Orientation::FlipHorizontal => img.fliph(),
        Orientation::Rotate180 => img.rotate180(),
        Orientation::FlipVertical => img.flipv(),
        Orientation::Transpose => img.rotate90().fliph(),
        Orientation::Rotate90CW => img.rotate90(),
        Orientation::Transverse => img.rotate270().fliph(),
        Orientation::Rotate270CW => img.rotate270(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageEncoder, RgbaImage};

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let img = RgbaImage::from_fn(width, height, |x, y| {
            image::Rgba([(x % 256) as u8, (y % 256) as u8, 128, 200])
        });
        let mut buffer = Vec::new();
        image::codecs::png::PngEncoder::new(&mut buffer)
            .write_image(img.as_raw(), width, height, image::ExtendedColorType::Rgba8)
            .unwrap();
        buffer
    }

    fn jpeg_bytes(width: u32, height: u32) -> Vec<u8> {
        let pixels = vec![90u8; (width * height * 3) as usize];
        let mut buffer = Vec::new();
        image::codecs::jpeg::JpegEncoder::new_with_quality(&mut buffer, 90)
            .write_image(&pixels, width, height, image::ExtendedColorType::Rgb8)
            .unwrap();
        buffer
    }

    /// Splice an APP1 segment carrying a big-endian EXIF IFD0 with a single
    /// Orientation entry right after the SOI marker.
    fn with_exif_orientation(jpeg: &[u8], orientation: u16) -> Vec<u8> {
        let mut tiff = Vec::new();
        tiff.extend_from_slice(b"MM\x00\x2A\x00\x00\x00\x08");
        tiff.extend_from_slice(&1u16.to_be_bytes());
        tiff.extend_from_slice(&0x0112u16.to_be_bytes()); // Orientation
        tiff.extend_from_slice(&3u16.to_be_bytes()); // SHORT
        tiff.extend_from_slice(&1u32.to_be_bytes());
        tiff.extend_from_slice(&orientation.to_be_bytes());
        tiff.extend_from_slice(&[0, 0]);
        tiff.extend_from_slice(&0u32.to_be_bytes());

        let payload_len = (2 + 6 + tiff.len()) as u16;
        let mut out = jpeg[..2].to_vec();
        out.extend_from_slice(&[0xFF, 0xE1]);
        out.extend_from_slice(&payload_len.to_be_bytes());
        out.extend_from_slice(b"Exif\x00\x00");
        out.extend_from_slice(&tiff);
        out.extend_from_slice(&jpeg[2..]);
        out
    }

    /// Left half red, right half blue.
    fn split_jpeg(width: u32, height: u32) -> Vec<u8> {
        let mut pixels = Vec::with_capacity((width * height * 3) as usize);
        for _ in 0..height {
            for x in 0..width {
                let rgb = if x < width / 2 { [230, 20, 20] } else { [20, 20, 230] };
                pixels.extend_from_slice(&rgb);
            }
        }
        let mut buffer = Vec::new();
        image::codecs::jpeg::JpegEncoder::new_with_quality(&mut buffer, 95)
            .write_image(&pixels, width, height, image::ExtendedColorType::Rgb8)
            .unwrap();
        buffer
    }

    #[test]
    fn test_detect_format() {
        assert_eq!(detect_format(&png_bytes(2, 2)), Some(EncodeFormat::Png));
        assert_eq!(detect_format(&jpeg_bytes(8, 8)), Some(EncodeFormat::Jpeg));
        assert_eq!(detect_format(b"RIFF\0\0\0\0WEBPVP8 "), Some(EncodeFormat::Webp));
        assert_eq!(detect_format(b"GIF89a......"), None);
        assert_eq!(detect_format(&[]), None);
    }

    #[test]
    fn test_decode_png_keeps_alpha() {
        let raster = decode_image(&png_bytes(16, 8)).unwrap();

        assert_eq!(raster.width, 16);
        assert_eq!(raster.height, 8);
        assert!(raster.has_valid_layout());
        assert_eq!(raster.pixels[3], 200);
    }

    #[test]
    fn test_decode_jpeg_is_opaque() {
        let raster = decode_image(&jpeg_bytes(32, 16)).unwrap();

        assert_eq!((raster.width, raster.height), (32, 16));
        assert!(!raster.has_transparency());
    }

    #[test]
    fn test_decode_empty_input() {
        assert!(matches!(decode_image(&[]), Err(DecodeError::EmptyInput)));
    }

    #[test]
    fn test_decode_unsupported_format() {
        let gif_header = b"GIF89a\x01\x00\x01\x00\x00\x00\x00";
        assert!(matches!(
            decode_image(gif_header),
            Err(DecodeError::UnsupportedFormat(_))
        ));
        assert!(matches!(
            decode_image(&[0u8, 1, 2, 3, 4, 5, 6, 7]),
            Err(DecodeError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn test_decode_truncated_png() {
        let bytes = png_bytes(16, 16);
        let truncated = &bytes[..bytes.len() / 2];
        assert!(matches!(
            decode_image(truncated),
            Err(DecodeError::CorruptedFile(_))
        ));
    }

    #[test]
    fn test_extract_orientation_without_exif() {
        assert_eq!(extract_orientation(&png_bytes(2, 2)), Orientation::Normal);
        assert_eq!(extract_orientation(b"not an image"), Orientation::Normal);
    }

    #[test]
    fn test_extract_orientation_from_exif() {
        let bytes = with_exif_orientation(&jpeg_bytes(16, 8), 6);
        assert_eq!(extract_orientation(&bytes), Orientation::Rotate90CW);

        let bytes = with_exif_orientation(&jpeg_bytes(16, 8), 3);
        assert_eq!(extract_orientation(&bytes), Orientation::Rotate180);
    }

    #[test]
    fn test_decode_jpeg_applies_exif_rotation() {
        let bytes = with_exif_orientation(&split_jpeg(32, 16), 6);
        let raster = decode_image(&bytes).unwrap();

        assert_eq!((raster.width, raster.height), (16, 32));
        // A clockwise turn moves the red left half to the top.
        let top_left = &raster.pixels[0..3];
        let bottom_left = &raster.pixels[raster.pixels.len() - 4 * 16..][0..3];
        assert!(top_left[0] > 150 && top_left[2] < 100);
        assert!(bottom_left[2] > 150 && bottom_left[0] < 100);
    }

    #[test]
    fn test_apply_orientation_swaps_dimensions() {
        let img = DynamicImage::ImageRgba8(RgbaImage::new(6, 4));

        let rotated = apply_orientation(img.clone(), Orientation::Rotate90CW);
        assert_eq!((rotated.width(), rotated.height()), (4, 6));

        let flipped = apply_orientation(img, Orientation::FlipHorizontal);
        assert_eq!((flipped.width(), flipped.height()), (6, 4));
    }
}
