//! WASM-compatible wrapper types.
//!
//! This module provides JavaScript-friendly types that wrap the core SizeFit
//! types, handling the conversion between Rust and JavaScript data
//! representations.

use sizefit_core::compress::EncodeResult;
use sizefit_core::decode::RasterImage;
use wasm_bindgen::prelude::*;

/// A decoded RGBA raster for JavaScript.
///
/// Pixel data stays in WASM memory. `pixels()` copies it out, which is also
/// the layout `ImageData` expects, so a preview can be drawn directly.
#[wasm_bindgen]
pub struct JsRasterImage {
    inner: RasterImage,
}

#[wasm_bindgen]
impl JsRasterImage {
    /// Create a raster from dimensions and RGBA pixel data (4 bytes per pixel).
    #[wasm_bindgen(constructor)]
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> JsRasterImage {
        JsRasterImage {
            inner: RasterImage {
                width,
                height,
                pixels,
            },
        }
    }

    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.inner.width
    }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.inner.height
    }

    /// Number of bytes in the pixel buffer (width * height * 4)
    #[wasm_bindgen(getter)]
    pub fn byte_length(&self) -> usize {
        self.inner.pixels.len()
    }

    /// Returns RGBA pixel data as a Uint8Array copy.
    pub fn pixels(&self) -> Vec<u8> {
        self.inner.pixels.clone()
    }

    /// Explicitly free WASM memory.
    ///
    /// This is optional - wasm-bindgen's finalizer will handle cleanup automatically.
    pub fn free(self) {
        // Dropping self releases the memory
    }
}

impl JsRasterImage {
    pub(crate) fn from_raster(inner: RasterImage) -> Self {
        Self { inner }
    }

    pub(crate) fn as_raster(&self) -> &RasterImage {
        &self.inner
    }
}

/// Outcome of a compression, as seen from JavaScript.
#[wasm_bindgen]
pub struct JsEncodeResult {
    inner: EncodeResult,
    target_bytes: u64,
}

#[wasm_bindgen]
impl JsEncodeResult {
    /// The encoded file as a Uint8Array, ready to wrap in a `Blob`.
    pub fn bytes(&self) -> js_sys::Uint8Array {
        js_sys::Uint8Array::from(self.inner.bytes())
    }

    /// Encoded size in bytes.
    #[wasm_bindgen(getter)]
    pub fn size(&self) -> f64 {
        self.inner.size_bytes() as f64
    }

    /// Target the search aimed for, in bytes.
    #[wasm_bindgen(getter)]
    pub fn target(&self) -> f64 {
        self.target_bytes as f64
    }

    /// Whether the size is within the target. The search is best effort, so
    /// this can be `false`.
    #[wasm_bindgen(getter)]
    pub fn fits_target(&self) -> bool {
        self.inner.fits(self.target_bytes)
    }

    /// Quality used (0-1), or `undefined` for PNG.
    #[wasm_bindgen(getter)]
    pub fn quality(&self) -> Option<f64> {
        self.inner.quality_used()
    }

    /// Scale applied to the source dimensions, in (0, 1].
    #[wasm_bindgen(getter)]
    pub fn scale(&self) -> f64 {
        self.inner.scale_used()
    }

    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.inner.width()
    }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.inner.height()
    }

    /// MIME type of the output, e.g. `image/webp`.
    #[wasm_bindgen(getter)]
    pub fn mime_type(&self) -> String {
        self.inner.format().mime_type().to_string()
    }

    pub fn free(self) {}
}

impl JsEncodeResult {
    pub(crate) fn new(inner: EncodeResult, target_bytes: u64) -> Self {
        Self {
            inner,
            target_bytes,
        }
    }

    pub(crate) fn inner(&self) -> &EncodeResult {
        &self.inner
    }
}
