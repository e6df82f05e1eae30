//! Image decoding WASM bindings.
//!
//! # Functions
//!
//! - [`decode_image`] - Decode a PNG, JPEG or WebP file into an RGBA raster
//! - [`is_supported_mime_type`] - Check a dropped file's MIME type
//! - [`detect_mime_type`] - Sniff the MIME type from file bytes
//!
//! # Example
//!
//! ```typescript
//! import { decode_image, is_supported_mime_type } from '@sizefit/wasm';
//!
//! for (const file of files) {
//!   if (!is_supported_mime_type(file.type)) continue;
//!   const raster = decode_image(new Uint8Array(await file.arrayBuffer()));
//!   console.log(`Decoded ${raster.width}x${raster.height}`);
//! }
//! ```

use crate::types::JsRasterImage;
use sizefit_core::decode;
use sizefit_core::encode;
use wasm_bindgen::prelude::*;

/// Decode a PNG, JPEG or WebP file into an RGBA raster.
///
/// EXIF orientation is applied, matching how the browser displays the file.
///
/// # Errors
///
/// Returns an error if the bytes are empty, not one of the supported
/// containers, or corrupted.
#[wasm_bindgen]
pub fn decode_image(bytes: &[u8]) -> Result<JsRasterImage, JsValue> {
    decode::decode_image(bytes)
        .map(JsRasterImage::from_raster)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Whether files of this MIME type (`File.type`) can be compressed.
///
/// Accepts exactly `image/png`, `image/jpeg` and `image/webp`.
#[wasm_bindgen]
pub fn is_supported_mime_type(mime: &str) -> bool {
    encode::is_supported_mime_type(mime)
}

/// Sniff the MIME type of an encoded image, or `undefined` if it is not one
/// of the supported formats. Useful when `File.type` is empty.
#[wasm_bindgen]
pub fn detect_mime_type(bytes: &[u8]) -> Option<String> {
    decode::detect_format(bytes).map(|format| format.mime_type().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_supported_mime_type() {
        assert!(is_supported_mime_type("image/png"));
        assert!(is_supported_mime_type("image/jpeg"));
        assert!(is_supported_mime_type("image/webp"));
        assert!(!is_supported_mime_type("image/gif"));
        assert!(!is_supported_mime_type("application/pdf"));
    }

    #[test]
    fn test_detect_mime_type() {
        let png = sizefit_core::encode::encode_png(&sizefit_core::RasterImage::filled(
            2,
            2,
            [0, 0, 0, 255],
        ))
        .unwrap();
        assert_eq!(detect_mime_type(&png).as_deref(), Some("image/png"));
        assert_eq!(detect_mime_type(b"plain text"), None);
    }
}
