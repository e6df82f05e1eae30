//! Output formats, quality handling and encode errors.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Quality a lossy encoder uses when the caller supplies none.
///
/// Matches the default of a browser canvas `toBlob` call.
pub const DEFAULT_LOSSY_QUALITY: f64 = 0.92;

/// Errors that can occur while encoding a raster.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// Pixel data length doesn't match expected dimensions
    #[error("Invalid pixel data: expected {expected} bytes (width * height * 4), got {actual}")]
    InvalidPixelData { expected: usize, actual: usize },

    /// Width or height is zero
    #[error("Invalid dimensions: width ({width}) and height ({height}) must be non-zero")]
    InvalidDimensions { width: u32, height: u32 },

    /// Quality outside [0, 1] or not a finite number
    #[error("Invalid quality {0}: must be a finite value between 0 and 1")]
    InvalidQuality(f64),

    /// The requested output format cannot be produced by this build
    #[error("Unsupported output format: {0}")]
    UnsupportedFormat(String),

    /// The underlying codec rejected the image
    #[error("{format} encoding failed: {reason}")]
    EncodingFailed { format: EncodeFormat, reason: String },
}

/// Output format of a compression run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EncodeFormat {
    /// Lossless; the only size lever is pixel count.
    Png,
    /// Lossy with a quality parameter in [0, 1].
    Jpeg,
    /// Lossy with a quality parameter in [0, 1].
    Webp,
}

impl EncodeFormat {
    pub const ALL: [EncodeFormat; 3] = [EncodeFormat::Png, EncodeFormat::Jpeg, EncodeFormat::Webp];

    /// Whether the format has a continuous quality knob.
    pub fn is_lossy(self) -> bool {
        !matches!(self, EncodeFormat::Png)
    }

    /// MIME type, e.g. `image/jpeg`.
    pub fn mime_type(self) -> &'static str {
        match self {
            EncodeFormat::Png => "image/png",
            EncodeFormat::Jpeg => "image/jpeg",
            EncodeFormat::Webp => "image/webp",
        }
    }

    /// File extension without the dot, taken from the MIME subtype.
    pub fn extension(self) -> &'static str {
        match self {
            EncodeFormat::Png => "png",
            EncodeFormat::Jpeg => "jpeg",
            EncodeFormat::Webp => "webp",
        }
    }

    /// Parse one of the accepted MIME types. Matching is exact, as with the
    /// `^image/(png|jpeg|webp)$` filter on dropped files.
    pub fn from_mime_type(mime: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|format| format.mime_type() == mime)
    }
}

impl fmt::Display for EncodeFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EncodeFormat::Png => "PNG",
            EncodeFormat::Jpeg => "JPEG",
            EncodeFormat::Webp => "WebP",
        };
        f.write_str(name)
    }
}

/// Whether files of this MIME type are accepted for compression.
pub fn is_supported_mime_type(mime: &str) -> bool {
    EncodeFormat::from_mime_type(mime).is_some()
}

/// Check that a normalized quality is usable.
pub fn validate_quality(quality: f64) -> Result<f64, EncodeError> {
    if quality.is_finite() && (0.0..=1.0).contains(&quality) {
        Ok(quality)
    } else {
        Err(EncodeError::InvalidQuality(quality))
    }
}

/// Map a normalized quality in [0, 1] to the 1-100 scale codecs use.
pub fn quality_to_percent(quality: f64) -> u8 {
    (quality * 100.0).round().clamp(1.0, 100.0) as u8
}
