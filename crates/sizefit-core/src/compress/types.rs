//! Inputs, outputs and tuning of a compression run.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::decode::{DecodeError, FilterType};
use crate::encode::{EncodeError, EncodeFormat};

/// Errors surfaced by a compression run. A run yields either a complete
/// [`EncodeResult`] or one of these, never a partial result.
#[derive(Debug, Error)]
pub enum CompressError {
    /// Malformed target, raster dimensions or search configuration
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The encode or resample capability failed; the search was aborted
    #[error("Encoding error: {0}")]
    Encoding(#[from] EncodeError),

    /// The source file could not be decoded
    #[error("Decoding error: {0}")]
    Decode(#[from] DecodeError),
}

/// Byte budget and output format for one image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TargetSpec {
    target_bytes: u64,
    format: EncodeFormat,
}

impl TargetSpec {
    /// Create a target of `target_bytes` bytes.
    ///
    /// # Errors
    ///
    /// Returns `CompressError::InvalidInput` when `target_bytes <= 0`.
    pub fn new(target_bytes: i64, format: EncodeFormat) -> Result<Self, CompressError> {
        if target_bytes <= 0 {
            return Err(CompressError::InvalidInput(format!(
                "target size must be positive, got {target_bytes} bytes"
            )));
        }
        Ok(Self {
            target_bytes: target_bytes as u64,
            format,
        })
    }

    /// Create a target from a size in kilobytes (1 KB = 1024 bytes), the unit
    /// the size field of the UI uses.
    pub fn from_kilobytes(kilobytes: i64, format: EncodeFormat) -> Result<Self, CompressError> {
        let bytes = kilobytes.checked_mul(1024).ok_or_else(|| {
            CompressError::InvalidInput(format!("target size of {kilobytes} KB is too large"))
        })?;
        Self::new(bytes, format)
    }

    pub fn target_bytes(&self) -> u64 {
        self.target_bytes
    }

    pub fn format(&self) -> EncodeFormat {
        self.format
    }
}

/// Outcome of a compression run.
///
/// The bytes are whatever the last encode attempt produced. The search is
/// best effort, so callers that need a hard limit must check
/// [`EncodeResult::fits`] themselves.
#[derive(Debug, Clone, PartialEq)]
pub struct EncodeResult {
    bytes: Vec<u8>,
    format: EncodeFormat,
    quality_used: Option<f64>,
    scale_used: f64,
    width: u32,
    height: u32,
}

impl EncodeResult {
    pub(crate) fn new(
        bytes: Vec<u8>,
        format: EncodeFormat,
        quality_used: Option<f64>,
        scale_used: f64,
        width: u32,
        height: u32,
    ) -> Self {
        Self {
            bytes,
            format,
            quality_used,
            scale_used,
            width,
            height,
        }
    }

    /// The encoded file.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    pub fn size_bytes(&self) -> u64 {
        self.bytes.len() as u64
    }

    pub fn format(&self) -> EncodeFormat {
        self.format
    }

    /// Quality that produced the bytes; `None` for lossless output.
    pub fn quality_used(&self) -> Option<f64> {
        self.quality_used
    }

    /// Fraction of the source dimensions that was encoded, in (0, 1].
    pub fn scale_used(&self) -> f64 {
        self.scale_used
    }

    /// Output width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Output height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Whether the output is within `target_bytes`.
    pub fn fits(&self, target_bytes: u64) -> bool {
        self.size_bytes() <= target_bytes
    }
}

/// Constants that drive the size search.
///
/// The defaults reproduce the reference behavior exactly; other values are
/// meant for experimentation and tests.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SearchConfig {
    /// Quality of the first lossy attempt at full size.
    pub initial_quality: f64,
    /// Lower bound of the bisection interval.
    pub min_quality: f64,
    /// Upper bound of the bisection interval.
    pub max_quality: f64,
    /// Bisection iteration cap.
    pub max_iterations: u32,
    /// Bisection stops once `|size - target| < tolerance_ratio * target`.
    pub tolerance_ratio: f64,
    /// Scale decrement per resolution-descent step.
    pub scale_step: f64,
    /// Exclusive scale floor; no step at or below it is attempted.
    pub min_scale: f64,
    /// Quality used for every step of the lossy resolution descent.
    pub fallback_quality: f64,
    /// Filter used when shrinking the raster.
    pub filter: FilterType,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            initial_quality: 0.9,
            min_quality: 0.01,
            max_quality: 0.9,
            max_iterations: 10,
            tolerance_ratio: 0.05,
            scale_step: 0.1,
            min_scale: 0.1,
            fallback_quality: 0.8,
            filter: FilterType::Bilinear,
        }
    }
}

/// Decimal places kept on descent scales, so that `1.0 - 8 * 0.1` reads 0.2.
const SCALE_PRECISION: f64 = 1e6;

impl SearchConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check the configuration for values the search cannot work with.
    pub fn validate(&self) -> Result<(), CompressError> {
        let unit = |name: &str, value: f64| {
            if value.is_finite() && (0.0..=1.0).contains(&value) {
                Ok(())
            } else {
                Err(CompressError::InvalidInput(format!(
                    "{name} must be between 0 and 1, got {value}"
                )))
            }
        };

        unit("initialQuality", self.initial_quality)?;
        unit("minQuality", self.min_quality)?;
        unit("maxQuality", self.max_quality)?;
        unit("fallbackQuality", self.fallback_quality)?;
        unit("minScale", self.min_scale)?;

        if self.min_quality > self.max_quality {
            return Err(CompressError::InvalidInput(format!(
                "minQuality ({}) exceeds maxQuality ({})",
                self.min_quality, self.max_quality
            )));
        }
        if !(self.tolerance_ratio.is_finite() && self.tolerance_ratio >= 0.0) {
            return Err(CompressError::InvalidInput(format!(
                "toleranceRatio must be a non-negative number, got {}",
                self.tolerance_ratio
            )));
        }
        if !(self.scale_step > 0.0 && self.scale_step < 1.0) {
            return Err(CompressError::InvalidInput(format!(
                "scaleStep must be strictly between 0 and 1, got {}",
                self.scale_step
            )));
        }
        if self.min_scale >= 1.0 {
            return Err(CompressError::InvalidInput(format!(
                "minScale must be below 1, got {}",
                self.min_scale
            )));
        }
        Ok(())
    }

    /// Scales tried by the resolution descent, after the full-size attempt.
    ///
    /// Each scale is `1.0 - k * scale_step` for `k = 1, 2, ...`, computed from
    /// the step counter rather than by repeated subtraction, and the sequence
    /// ends before the first scale at or below `min_scale`. With the defaults
    /// this is `0.9, 0.8, ..., 0.2`.
    pub fn descent_scales(&self) -> impl Iterator<Item = f64> {
        let step = self.scale_step;
        let floor = self.min_scale;
        (1u32..)
            .map(move |k| ((1.0 - k as f64 * step) * SCALE_PRECISION).round() / SCALE_PRECISION)
            .take_while(move |scale| *scale > floor)
    }
}
