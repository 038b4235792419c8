//! Camera capture abstraction
//!
//! The daemon treats the camera as an external collaborator behind the
//! [`FrameSource`] trait: one call produces one raw RGB frame. The shipped
//! [`SyntheticCamera`] renders a moving test pattern for hardware-free
//! operation and testing; a hardware camera driver plugs in at this trait.

use crate::config::{CameraConfig, VideoConfig};
use crate::error::{Error, Result};

pub mod synthetic;

pub use synthetic::SyntheticCamera;

/// A single captured frame in packed RGB8 layout
#[derive(Debug, Clone)]
pub struct Frame {
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
    /// Packed RGB8 pixel data, `width * height * 3` bytes
    pub pixels: Vec<u8>,
}

impl Frame {
    /// Whether this frame carries no usable image data
    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty() || self.width == 0 || self.height == 0
    }
}

/// Frame capture trait for camera drivers
pub trait FrameSource: Send {
    /// Capture one frame
    fn capture(&mut self) -> Result<Frame>;

    /// Drain startup frames so exposure can settle
    ///
    /// Called once before streaming begins. Default is a no-op; hardware
    /// drivers override this to discard the first frames after power-up.
    fn warm_up(&mut self) -> Result<()> {
        Ok(())
    }

    /// Human-readable description for startup logs
    fn describe(&self) -> String;
}

/// Create a camera driver from configuration
pub fn create_camera(
    camera: &CameraConfig,
    video: &VideoConfig,
) -> Result<Box<dyn FrameSource>> {
    match camera.camera_type.as_str() {
        "synthetic" => Ok(Box::new(SyntheticCamera::new(video.width, video.height))),
        other => Err(Error::Camera(format!("unknown camera type: {}", other))),
    }
}
