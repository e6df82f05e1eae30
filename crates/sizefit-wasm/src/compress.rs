//! Size-targeting compression WASM bindings.
//!
//! # Functions
//!
//! - [`compress_image`] - Decode a file and fit it under a size in KB
//! - [`compress_image_with_config`] - Same, with search constants from JS
//! - [`compress_raster`] - Fit an already decoded raster under a byte budget
//!
//! # Example
//!
//! ```typescript
//! import { compress_image, format_size } from '@sizefit/wasm';
//!
//! const bytes = new Uint8Array(await file.arrayBuffer());
//! const result = compress_image(bytes, 200, 'image/webp');
//! const blob = new Blob([result.bytes()], { type: result.mime_type });
//! console.log(`${format_size(result.size)} at quality ${result.quality}`);
//! ```
//!
//! Each call runs the whole search synchronously. PNG and JPEG can run in a
//! Web Worker to keep the page responsive. WebP is encoded by the browser's
//! canvas (see [`crate::canvas`]) and needs the page thread.

use crate::canvas::CanvasCodec;
use crate::types::{JsEncodeResult, JsRasterImage};
use sizefit_core::compress::{SearchConfig, SizeTargetingEncoder, TargetSpec};
use sizefit_core::encode::EncodeFormat;
use wasm_bindgen::prelude::*;

/// Decode `bytes` and re-encode them as `mime_type`, aiming at or below
/// `target_kb` kilobytes (1 KB = 1024 bytes).
///
/// # Errors
///
/// Returns an error if the MIME type is not `image/png`, `image/jpeg` or
/// `image/webp`, if `target_kb` is not positive, or if decoding or encoding
/// fails.
#[wasm_bindgen]
pub fn compress_image(
    bytes: &[u8],
    target_kb: i32,
    mime_type: &str,
) -> Result<JsEncodeResult, JsValue> {
    run(bytes, target_kb, mime_type, SearchConfig::default())
}

/// Like [`compress_image`], with search constants passed as a plain object.
///
/// Missing fields keep their defaults, e.g.
/// `{ toleranceRatio: 0.02, filter: "lanczos3" }`.
#[wasm_bindgen]
pub fn compress_image_with_config(
    bytes: &[u8],
    target_kb: i32,
    mime_type: &str,
    config: JsValue,
) -> Result<JsEncodeResult, JsValue> {
    let config: SearchConfig = serde_wasm_bindgen::from_value(config)
        .map_err(|e| JsValue::from_str(&format!("Invalid search config: {}", e)))?;
    run(bytes, target_kb, mime_type, config)
}

/// Fit a decoded raster under `target_bytes` bytes.
#[wasm_bindgen]
pub fn compress_raster(
    image: &JsRasterImage,
    target_bytes: f64,
    mime_type: &str,
) -> Result<JsEncodeResult, JsValue> {
    let format = parse_format(mime_type).map_err(|e| JsValue::from_str(&e))?;
    let spec = TargetSpec::new(target_bytes as i64, format)
        .map_err(|e| JsValue::from_str(&e.to_string()))?;

    SizeTargetingEncoder::with_codec(CanvasCodec::default())
        .compress(image.as_raster(), &spec)
        .map(|result| JsEncodeResult::new(result, spec.target_bytes()))
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

fn run(
    bytes: &[u8],
    target_kb: i32,
    mime_type: &str,
    config: SearchConfig,
) -> Result<JsEncodeResult, JsValue> {
    compress_file(bytes, target_kb, mime_type, config).map_err(|e| JsValue::from_str(&e))
}

/// JS-independent body of the file bindings, so it can be tested natively.
pub(crate) fn compress_file(
    bytes: &[u8],
    target_kb: i32,
    mime_type: &str,
    config: SearchConfig,
) -> Result<JsEncodeResult, String> {
    let format = parse_format(mime_type)?;
    let spec = TargetSpec::from_kilobytes(target_kb as i64, format).map_err(|e| e.to_string())?;
    let result = SizeTargetingEncoder::with_codec(CanvasCodec::default())
        .with_config(config)
        .compress_bytes(bytes, &spec)
        .map_err(|e| e.to_string())?;
    Ok(JsEncodeResult::new(result, spec.target_bytes()))
}

fn parse_format(mime_type: &str) -> Result<EncodeFormat, String> {
    EncodeFormat::from_mime_type(mime_type)
        .ok_or_else(|| format!("Unsupported output format: {}", mime_type))
}


#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn png_file() -> Vec<u8> {
        sizefit_core::encode::encode_png(&sizefit_core::RasterImage::filled(
            40,
            40,
            [120, 30, 200, 255],
        ))
        .unwrap()
    }

    #[wasm_bindgen_test]
    fn test_compress_image_jpeg() {
        let result = compress_image(&png_file(), 50, "image/jpeg").unwrap();
        assert!(result.fits_target());
        assert_eq!(result.bytes().length() as f64, result.size());
    }

    #[wasm_bindgen_test]
    fn test_compress_image_webp() {
        let result = compress_image(&png_file(), 50, "image/webp").unwrap();
        let bytes = result.bytes().to_vec();

        assert!(result.fits_target());
        assert_eq!(result.mime_type(), "image/webp");
        assert_eq!(result.quality(), Some(0.9));
        assert_eq!(&bytes[0..4], b"RIFF");
        assert_eq!(&bytes[8..12], b"WEBP");
    }

    #[wasm_bindgen_test]
    fn test_compress_raster_webp_descends_for_tiny_target() {
        let raster = JsRasterImage::new(64, 64, (0..64 * 64 * 4).map(|i| (i * 7) as u8).collect());
        let result = compress_raster(&raster, 30.0, "image/webp").unwrap();
        assert_eq!(result.mime_type(), "image/webp");
        assert!(result.scale() < 1.0);
    }

    #[wasm_bindgen_test]
    fn test_compress_image_with_config() {
        let config = js_sys::Object::new();
        js_sys::Reflect::set(&config, &"scaleStep".into(), &JsValue::from_f64(0.5)).unwrap();
        let result =
            compress_image_with_config(&png_file(), 1, "image/png", config.into()).unwrap();
        assert!(result.scale() == 1.0 || result.scale() == 0.5);
    }

    #[wasm_bindgen_test]
    fn test_compress_image_with_bad_config() {
        let config = JsValue::from_f64(3.0);
        let result = compress_image_with_config(&png_file(), 1, "image/png", config);
        assert!(result.is_err());
    }

    #[wasm_bindgen_test]
    fn test_compress_raster() {
        let raster = JsRasterImage::new(10, 10, vec![200u8; 400]);
        let result = compress_raster(&raster, 100_000.0, "image/png").unwrap();
        assert_eq!(result.scale(), 1.0);
        assert!(compress_raster(&raster, 0.0, "image/png").is_err());
    }
}
