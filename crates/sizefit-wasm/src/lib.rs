//! SizeFit WASM - WebAssembly bindings for SizeFit
//!
//! This crate exposes the sizefit-core compressor to the browser page that
//! collects dropped or selected files.
//!
//! # Module Structure
//!
//! - `types` - WASM-compatible wrappers for rasters and results
//! - `decode` - Decoding and MIME-type filtering
//! - `compress` - Size-targeting compression
//! - `canvas` - Lossy WebP through the browser's canvas encoder
//! - `report` - File names and size strings for the result list
//! - `logging` - `tracing` to browser console bridge
//!
//! # Usage
//!
//! ```typescript
//! import init, { compress_image, is_supported_mime_type, output_file_name } from '@sizefit/wasm';
//!
//! await init();
//!
//! for (const file of files) {
//!   if (!is_supported_mime_type(file.type)) continue;
//!   const bytes = new Uint8Array(await file.arrayBuffer());
//!   const result = compress_image(bytes, 200, 'image/jpeg');
//!   const name = output_file_name(file.name, result.mime_type);
//! }
//! ```

use wasm_bindgen::prelude::*;

mod canvas;
mod compress;
mod decode;
mod logging;
mod report;
mod types;

// Re-export public types
pub use canvas::CanvasCodec;
pub use compress::{compress_image, compress_image_with_config, compress_raster};
pub use decode::{decode_image, detect_mime_type, is_supported_mime_type};
pub use logging::init_logging;
pub use report::{compression_report, format_size, output_file_name};
pub use types::{JsEncodeResult, JsRasterImage};

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!version().is_empty());
    }
}
