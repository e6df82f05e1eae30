//! Recording stub codec for exercising the search without real encoders.

use std::cell::RefCell;

use crate::decode::RasterImage;
use crate::encode::{EncodeError, EncodeFormat, ImageEncoder, Resampler};

/// One encode call seen by [`StubCodec`].
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Attempt {
    pub quality: Option<f64>,
    pub width: u32,
    pub height: u32,
    pub size: usize,
}

/// Codec whose output length is a function of the attempt.
///
/// Resampling is free: it returns a raster with the requested dimensions and
/// no pixel data, which the stub encoder never reads.
pub(crate) struct StubCodec {
    size_of: Box<dyn Fn(&Attempt) -> usize>,
    attempts: RefCell<Vec<Attempt>>,
    fail_after: Option<usize>,
    fail_resample: bool,
}

impl StubCodec {
    pub fn new(size_of: impl Fn(&Attempt) -> usize + 'static) -> Self {
        Self {
            size_of: Box::new(size_of),
            attempts: RefCell::new(Vec::new()),
            fail_after: None,
            fail_resample: false,
        }
    }

    /// Fail every encode after the first `successes`.
    pub fn failing_after(mut self, successes: usize) -> Self {
        self.fail_after = Some(successes);
        self
    }

    pub fn failing_resample(mut self) -> Self {
        self.fail_resample = true;
        self
    }

    /// Successful encode calls, in order.
    pub fn attempts(&self) -> std::cell::Ref<'_, Vec<Attempt>> {
        self.attempts.borrow()
    }
}

impl ImageEncoder for StubCodec {
    fn encode(
        &self,
        image: &RasterImage,
        format: EncodeFormat,
        quality: Option<f64>,
    ) -> Result<Vec<u8>, EncodeError> {
        if self
            .fail_after
            .is_some_and(|limit| self.attempts.borrow().len() >= limit)
        {
            return Err(EncodeError::EncodingFailed {
                format,
                reason: "stub failure".to_string(),
            });
        }

        let mut attempt = Attempt {
            quality,
            width: image.width,
            height: image.height,
            size: 0,
        };
        attempt.size = (self.size_of)(&attempt);
        let bytes = vec![0u8; attempt.size];
        self.attempts.borrow_mut().push(attempt);
        Ok(bytes)
    }
}

impl Resampler for StubCodec {
    fn resample(
        &self,
        _image: &RasterImage,
        width: u32,
        height: u32,
    ) -> Result<RasterImage, EncodeError> {
        if self.fail_resample || width == 0 || height == 0 {
            return Err(EncodeError::InvalidDimensions { width, height });
        }
        Ok(RasterImage {
            width,
            height,
            pixels: Vec::new(),
        })
    }
}
