//! Result display WASM bindings.
//!
//! Strings for the result list: download file name, human-readable sizes and
//! the percentage saved.

use crate::types::JsEncodeResult;
use sizefit_core::encode::EncodeFormat;
use sizefit_core::report::{self, CompressionReport};
use wasm_bindgen::prelude::*;

/// Format a byte count as `"512 B"`, `"180.3 KB"` or `"1.25 MB"`.
#[wasm_bindgen]
pub fn format_size(bytes: f64) -> String {
    report::format_size(bytes.max(0.0) as u64)
}

/// Download name for `name` re-encoded as `mime_type`, e.g.
/// `output_file_name("cat.png", "image/webp") === "cat.webp"`.
///
/// Unknown MIME types leave the name unchanged.
#[wasm_bindgen]
pub fn output_file_name(name: &str, mime_type: &str) -> String {
    match EncodeFormat::from_mime_type(mime_type) {
        Some(format) => report::output_file_name(name, format),
        None => name.to_string(),
    }
}

/// Full summary of a result as a plain object:
/// `{ fileName, originalSize, compressedSize, reductionPercent, qualityUsed,
/// scaleUsed, width, height }`.
#[wasm_bindgen]
pub fn compression_report(
    original_name: &str,
    original_size: f64,
    result: &JsEncodeResult,
) -> Result<JsValue, JsValue> {
    let report = build_report(original_name, original_size, result);
    serde_wasm_bindgen::to_value(&report).map_err(|e| JsValue::from_str(&e.to_string()))
}

fn build_report(
    original_name: &str,
    original_size: f64,
    result: &JsEncodeResult,
) -> CompressionReport {
    CompressionReport::new(original_name, original_size.max(0.0) as u64, result.inner())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(100.0), "100 B");
        assert_eq!(format_size(2048.0), "2.0 KB");
        assert_eq!(format_size(3.0 * 1024.0 * 1024.0), "3.00 MB");
        assert_eq!(format_size(-1.0), "0 B");
    }

    #[test]
    fn test_output_file_name() {
        assert_eq!(output_file_name("cat.png", "image/webp"), "cat.webp");
        assert_eq!(output_file_name("cat.webp", "image/jpeg"), "cat.jpeg");
        assert_eq!(output_file_name("cat.png", "image/gif"), "cat.png");
    }

    #[test]
    fn test_build_report() {
        let png = sizefit_core::encode::encode_png(&sizefit_core::RasterImage::filled(
            16,
            16,
            [1, 2, 3, 255],
        ))
        .unwrap();
        let result = crate::compress::compress_file(
            &png,
            10,
            "image/jpeg",
            sizefit_core::SearchConfig::default(),
        )
        .unwrap();

        let report = build_report("dot.png", 20_480.0, &result);
        assert_eq!(report.file_name, "dot.jpeg");
        assert_eq!(report.original_size, 20_480);
        assert!(report.reduction_percent > 0.0);
    }
}
