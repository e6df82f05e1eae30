//! Encode and resample capabilities consumed by the size search.
//!
//! The search in [`crate::compress`] never touches a codec directly. It asks an
//! [`ImageEncoder`] for bytes and a [`Resampler`] for smaller rasters, so tests
//! (and hosts with their own codecs) can plug in anything that implements
//! these traits. [`ImageCodec`] is the default implementation.

use super::{encode_jpeg, encode_png, encode_webp, quality_to_percent, validate_quality};
use super::{EncodeError, EncodeFormat, DEFAULT_LOSSY_QUALITY};
use crate::decode::{FilterType, RasterImage};
use crate::resample::resample;

/// Pixel-to-bytes capability.
pub trait ImageEncoder {
    /// Encode `image` as `format`.
    ///
    /// `quality` is a normalized value in [0, 1]. Lossless formats ignore it;
    /// lossy formats use [`DEFAULT_LOSSY_QUALITY`] when it is `None`.
    fn encode(
        &self,
        image: &RasterImage,
        format: EncodeFormat,
        quality: Option<f64>,
    ) -> Result<Vec<u8>, EncodeError>;
}

/// Raster rescaling capability.
pub trait Resampler {
    /// Produce a new raster of exactly `width` x `height`.
    ///
    /// Zero dimensions are rejected with `EncodeError::InvalidDimensions`.
    fn resample(
        &self,
        image: &RasterImage,
        width: u32,
        height: u32,
    ) -> Result<RasterImage, EncodeError>;

    /// Adopt the filter named by a search configuration. Resamplers without
    /// a filter choice ignore it.
    fn set_filter(&mut self, _filter: FilterType) {}
}

/// Codec backed by the `image` crate (PNG, JPEG, resampling) and libwebp
/// (lossy WebP, `webp` feature).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImageCodec {
    filter: FilterType,
}

impl ImageCodec {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use `filter` when shrinking rasters.
    pub fn with_filter(filter: FilterType) -> Self {
        Self { filter }
    }

    pub fn filter(&self) -> FilterType {
        self.filter
    }
}

impl ImageEncoder for ImageCodec {
    fn encode(
        &self,
        image: &RasterImage,
        format: EncodeFormat,
        quality: Option<f64>,
    ) -> Result<Vec<u8>, EncodeError> {
        let lossy_quality = || validate_quality(quality.unwrap_or(DEFAULT_LOSSY_QUALITY));

        match format {
            EncodeFormat::Png => encode_png(image),
            EncodeFormat::Jpeg => encode_jpeg(image, quality_to_percent(lossy_quality()?)),
            EncodeFormat::Webp => encode_webp(image, (lossy_quality()? * 100.0) as f32),
        }
    }
}

impl Resampler for ImageCodec {
    fn resample(
        &self,
        image: &RasterImage,
        width: u32,
        height: u32,
    ) -> Result<RasterImage, EncodeError> {
        resample(image, width, height, self.filter)
    }

    fn set_filter(&mut self, filter: FilterType) {
        self.filter = filter;
    }
}
