//! Image encoding for SizeFit.
//!
//! This module provides:
//! - The output formats the compressor can target ([`EncodeFormat`])
//! - Per-format encoders for PNG, JPEG and lossy WebP
//! - The [`ImageEncoder`] / [`Resampler`] capabilities the size search consumes,
//!   with [`ImageCodec`] as the default implementation
//!
//! # Architecture
//!
//! The encoders are designed to be used from Web Workers via WASM bindings.
//! All operations are synchronous and single-threaded within WASM.
//!
//! # Examples
//!
//! ```ignore
//! use sizefit_core::decode::RasterImage;
//! use sizefit_core::encode::{EncodeFormat, ImageCodec, ImageEncoder};
//!
//! let raster = RasterImage::filled(100, 100, [128, 128, 128, 255]);
//! let jpeg = ImageCodec::new().encode(&raster, EncodeFormat::Jpeg, Some(0.8)).unwrap();
//! println!("Encoded {} bytes", jpeg.len());
//! ```

mod codec;
mod jpeg;
mod png;
mod types;
mod webp;

pub use codec::{ImageCodec, ImageEncoder, Resampler};
pub use jpeg::encode_jpeg;
pub use png::encode_png;
pub use types::{
    is_supported_mime_type, quality_to_percent, validate_quality, EncodeError, EncodeFormat,
    DEFAULT_LOSSY_QUALITY,
};
pub use self::webp::encode_webp;

use crate::decode::RasterImage;

/// Reject rasters no codec can write.
fn check_layout(image: &RasterImage) -> Result<(), EncodeError> {
    if image.width == 0 || image.height == 0 {
        return Err(EncodeError::InvalidDimensions {
            width: image.width,
            height: image.height,
        });
    }
    if !image.has_valid_layout() {
        return Err(EncodeError::InvalidPixelData {
            expected: RasterImage::expected_len(image.width, image.height),
            actual: image.pixels.len(),
        });
    }
    Ok(())
}
