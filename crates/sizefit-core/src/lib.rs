//! SizeFit Core - size-targeting image re-encoder
//!
//! This crate re-encodes an image so that it fits under a byte budget. It
//! trades encoder quality (JPEG, WebP) or pixel dimensions (PNG, and lossy
//! formats as a last resort) to get there, and reports the parameters it used.
//!
//! - [`decode`] - PNG/JPEG/WebP decoding into an RGBA [`RasterImage`]
//! - [`encode`] - output formats, codecs and the encode/resample capabilities
//! - [`resample`] - raster shrinking for resolution descent
//! - [`compress`] - the size-targeting search
//! - [`report`] - file names and size strings for finished results

pub mod compress;
pub mod decode;
pub mod encode;
pub mod report;
pub mod resample;

pub use compress::{
    compress, compress_bytes, CompressError, EncodeResult, SearchConfig, SizeTargetingEncoder,
    TargetSpec,
};
pub use decode::{decode_image, RasterImage};
pub use encode::{EncodeFormat, ImageCodec, ImageEncoder, Resampler};
pub use report::{format_size, output_file_name, CompressionReport};
