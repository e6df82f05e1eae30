//! Lossy WebP through the browser's canvas encoder.
//!
//! libwebp does not build for `wasm32-unknown-unknown`, so sizefit-core is
//! compiled here without its `webp` feature. Browsers ship their own WebP
//! encoder behind `HTMLCanvasElement.toDataURL`, and [`CanvasCodec`] routes
//! WebP requests there. PNG, JPEG and resampling stay on the core codec.
//!
//! `toDataURL` needs a `document`, so WebP output is only available on the
//! page thread. In a worker it reports the format as unsupported.

use sizefit_core::decode::{FilterType, RasterImage};
use sizefit_core::encode::{
    validate_quality, EncodeError, EncodeFormat, ImageCodec, ImageEncoder, Resampler,
    DEFAULT_LOSSY_QUALITY,
};
use wasm_bindgen::{Clamped, JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, ImageData, Window};

const WEBP_DATA_URL_PREFIX: &str = "data:image/webp;base64,";

/// Core codec with WebP handed to the browser.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CanvasCodec {
    inner: ImageCodec,
}

impl CanvasCodec {
    pub fn new(inner: ImageCodec) -> Self {
        Self { inner }
    }

    pub fn inner(&self) -> &ImageCodec {
        &self.inner
    }
}

impl ImageEncoder for CanvasCodec {
    fn encode(
        &self,
        image: &RasterImage,
        format: EncodeFormat,
        quality: Option<f64>,
    ) -> Result<Vec<u8>, EncodeError> {
        match format {
            EncodeFormat::Webp => {
                let quality = validate_quality(quality.unwrap_or(DEFAULT_LOSSY_QUALITY))?;
                encode_webp_canvas(image, quality)
            }
            EncodeFormat::Png | EncodeFormat::Jpeg => self.inner.encode(image, format, quality),
        }
    }
}

impl Resampler for CanvasCodec {
    fn resample(
        &self,
        image: &RasterImage,
        width: u32,
        height: u32,
    ) -> Result<RasterImage, EncodeError> {
        self.inner.resample(image, width, height)
    }

    fn set_filter(&mut self, filter: FilterType) {
        self.inner.set_filter(filter);
    }
}

/// Encode `image` as lossy WebP at `quality` (0-1) with a throwaway canvas.
pub(crate) fn encode_webp_canvas(
    image: &RasterImage,
    quality: f64,
) -> Result<Vec<u8>, EncodeError> {
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

    let window = web_sys::window().ok_or_else(no_document)?;
    let canvas = create_canvas(&window, image.width, image.height)?;
    let context = canvas
        .get_context("2d")
        .map_err(js_failure)?
        .ok_or_else(|| failure("2d context unavailable".to_string()))?
        .dyn_into::<CanvasRenderingContext2d>()
        .map_err(|_| failure("unexpected context type".to_string()))?;

    let data = ImageData::new_with_u8_clamped_array_and_sh(
        Clamped(image.pixels.as_slice()),
        image.width,
        image.height,
    )
    .map_err(js_failure)?;
    context.put_image_data(&data, 0.0, 0.0).map_err(js_failure)?;

    let url = canvas
        .to_data_url_with_type_and_encoder_options("image/webp", &JsValue::from_f64(quality))
        .map_err(js_failure)?;

    // Browsers without a WebP encoder silently fall back to PNG.
    let payload = url.strip_prefix(WEBP_DATA_URL_PREFIX).ok_or_else(|| {
        EncodeError::UnsupportedFormat(format!(
            "this browser cannot encode {}",
            EncodeFormat::Webp
        ))
    })?;

    let binary = window.atob(payload).map_err(js_failure)?;
    Ok(latin1_bytes(&binary))
}

fn create_canvas(
    window: &Window,
    width: u32,
    height: u32,
) -> Result<HtmlCanvasElement, EncodeError> {
    let document = window.document().ok_or_else(no_document)?;
    let canvas = document
        .create_element("canvas")
        .map_err(js_failure)?
        .dyn_into::<HtmlCanvasElement>()
        .map_err(|_| failure("not a canvas element".to_string()))?;
    canvas.set_width(width);
    canvas.set_height(height);
    Ok(canvas)
}

/// `atob` yields one char per byte, all in U+0000..=U+00FF.
fn latin1_bytes(binary: &str) -> Vec<u8> {
    binary.chars().map(|c| c as u32 as u8).collect()
}

fn no_document() -> EncodeError {
    EncodeError::UnsupportedFormat(format!(
        "{} output needs a document (not available in workers)",
        EncodeFormat::Webp
    ))
}

fn failure(reason: String) -> EncodeError {
    EncodeError::EncodingFailed {
        format: EncodeFormat::Webp,
        reason,
    }
}

fn js_failure(err: JsValue) -> EncodeError {
    failure(err.as_string().unwrap_or_else(|| format!("{err:?}")))
}
