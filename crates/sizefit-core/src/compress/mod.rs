//! Size-targeting compression.
//!
//! Given a decoded raster and a [`TargetSpec`], [`SizeTargetingEncoder`]
//! searches for the encode parameters that bring the output at or under the
//! byte budget with as little loss as possible:
//!
//! - **Lossy formats** (JPEG, WebP): try quality 0.9 at full size, then bisect
//!   quality over [0.01, 0.9] for up to 10 steps, then fall back to shrinking
//!   the raster at a fixed quality of 0.8.
//! - **Lossless formats** (PNG): shrink the raster in steps of 0.1 until the
//!   output fits or the next step would reach scale 0.1.
//!
//! The result is best effort. It is always the last attempt made, so a caller
//! that needs a hard limit must check [`EncodeResult::fits`].
//!
//! # Examples
//!
//! ```ignore
//! use sizefit_core::compress::{compress, TargetSpec};
//! use sizefit_core::decode::decode_image;
//! use sizefit_core::encode::EncodeFormat;
//!
//! let raster = decode_image(&std::fs::read("photo.png").unwrap()).unwrap();
//! let spec = TargetSpec::from_kilobytes(200, EncodeFormat::Jpeg).unwrap();
//! let result = compress(&raster, &spec).unwrap();
//! println!("{} bytes at quality {:?}", result.size_bytes(), result.quality_used());
//! ```

mod search;
mod types;

#[cfg(test)]
pub(crate) mod test_support;

pub use search::{compress, compress_bytes, SizeTargetingEncoder};
pub use types::{CompressError, EncodeResult, SearchConfig, TargetSpec};
