//! Display helpers for a finished compression.
//!
//! These produce the strings shown next to each result: the output file name,
//! human-readable sizes and the size reduction.

use serde::Serialize;

use crate::compress::EncodeResult;
use crate::encode::EncodeFormat;

const KIB: u64 = 1024;
const MIB: u64 = 1024 * 1024;

/// Summary of one compressed file.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompressionReport {
    /// Download name, with the extension of the output format.
    pub file_name: String,
    pub original_size: u64,
    pub compressed_size: u64,
    /// Percentage saved; negative when the output is larger.
    pub reduction_percent: f64,
    pub quality_used: Option<f64>,
    pub scale_used: f64,
    pub width: u32,
    pub height: u32,
}

impl CompressionReport {
    pub fn new(original_name: &str, original_size: u64, result: &EncodeResult) -> Self {
        Self {
            file_name: output_file_name(original_name, result.format()),
            original_size,
            compressed_size: result.size_bytes(),
            reduction_percent: reduction_percent(original_size, result.size_bytes()),
            quality_used: result.quality_used(),
            scale_used: result.scale_used(),
            width: result.width(),
            height: result.height(),
        }
    }

    /// "1.2 MB → 180.3 KB" style summary.
    pub fn size_line(&self) -> String {
        format!(
            "{} → {}",
            format_size(self.original_size),
            format_size(self.compressed_size)
        )
    }

    /// Reduction with one decimal, e.g. `"62.5"`.
    pub fn reduction_label(&self) -> String {
        format!("{:.1}", self.reduction_percent)
    }
}

/// Format a byte count as `B`, `KB` (one decimal) or `MB` (two decimals).
pub fn format_size(bytes: u64) -> String {
    if bytes < KIB {
        format!("{bytes} B")
    } else if bytes < MIB {
        format!("{:.1} KB", bytes as f64 / KIB as f64)
    } else {
        format!("{:.2} MB", bytes as f64 / MIB as f64)
    }
}

/// `(1 - compressed / original) * 100`; 0 when the original size is unknown.
pub fn reduction_percent(original_size: u64, compressed_size: u64) -> f64 {
    if original_size == 0 {
        return 0.0;
    }
    (1.0 - compressed_size as f64 / original_size as f64) * 100.0
}

/// Replace the last extension of `name` with the one for `format`.
///
/// Only a dot followed by at least one character counts as an extension, so
/// `"photo"` and `"photo."` come back unchanged.
pub fn output_file_name(name: &str, format: EncodeFormat) -> String {
    match name.rfind('.') {
        Some(dot) if dot + 1 < name.len() => {
            format!("{}.{}", &name[..dot], format.extension())
        }
        _ => name.to_string(),
    }
}
