//! Image decoding for SizeFit.
//!
//! This module turns the bytes of a user-selected file into a [`RasterImage`],
//! the RGBA raster the size-targeting search operates on. Only the formats the
//! compressor can also write (PNG, JPEG, WebP) are accepted; anything else is
//! rejected up front, the same way the browser tool filters by MIME type.
//!
//! # Examples
//!
//! ```ignore
//! use sizefit_core::decode::decode_image;
//!
//! let bytes = std::fs::read("photo.jpg").unwrap();
//! let raster = decode_image(&bytes).unwrap();
//! println!("Decoded {}x{} image", raster.width, raster.height);
//! ```

mod container;
mod types;

pub use container::{decode_image, detect_format};
pub use types::{DecodeError, FilterType, Orientation, RasterImage};
