//! Frame compression abstraction
//!
//! Compression is a collaborator behind the [`FrameEncoder`] trait: one call
//! turns a raw RGB frame into an opaque compressed byte buffer. The shipped
//! implementation produces baseline JPEG at a fixed quality.

use crate::camera::Frame;
use crate::error::{Error, Result};
use image::codecs::jpeg::JpegEncoder;
use image::ExtendedColorType;

/// Frame compression trait
pub trait FrameEncoder: Send {
    /// Compress one frame to an opaque byte buffer
    fn encode(&self, frame: &Frame) -> Result<Vec<u8>>;
}

/// JPEG encoder at a fixed quality setting
pub struct JpegFrameEncoder {
    quality: u8,
}

impl JpegFrameEncoder {
    /// Create an encoder with the given JPEG quality (clamped to 1-100)
    pub fn new(quality: u8) -> Self {
        Self {
            quality: quality.clamp(1, 100),
        }
    }
}

impl FrameEncoder for JpegFrameEncoder {
    fn encode(&self, frame: &Frame) -> Result<Vec<u8>> {
        // The underlying encoder asserts on a size mismatch instead of
        // returning an error
        let expected = frame.width as usize * frame.height as usize * 3;
        if frame.pixels.len() != expected {
            return Err(Error::Encode(format!(
                "pixel buffer is {} bytes, expected {} for {}x{} RGB",
                frame.pixels.len(),
                expected,
                frame.width,
                frame.height
            )));
        }

        let mut out = Vec::new();
        let mut encoder = JpegEncoder::new_with_quality(&mut out, self.quality);
        encoder
            .encode(
                &frame.pixels,
                frame.width,
                frame.height,
                ExtendedColorType::Rgb8,
            )
            .map_err(|e| Error::Encode(e.to_string()))?;
        Ok(out)
    }
}
