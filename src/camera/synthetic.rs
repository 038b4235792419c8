//! Synthetic test-pattern camera for hardware-free operation
//!
//! Renders a color gradient with a moving vertical bar so that consecutive
//! frames differ and the JPEG stream shows visible motion at the viewer.

use super::{Frame, FrameSource};
use crate::error::Result;

/// Hardware-free camera producing a deterministic moving test pattern
pub struct SyntheticCamera {
    width: u32,
    height: u32,
    tick: u64,
}

impl SyntheticCamera {
    /// Create a synthetic camera at the given resolution
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            tick: 0,
        }
    }
}

impl FrameSource for SyntheticCamera {
    fn capture(&mut self) -> Result<Frame> {
        let w = self.width as usize;
        let h = self.height as usize;
        let mut pixels = vec![0u8; w * h * 3];

        // Moving bar: 10% of the width, advancing a few pixels per frame
        let bar_width = (w / 10).max(1);
        let bar_x = (self.tick as usize * 4) % w;

        for y in 0..h {
            for x in 0..w {
                let i = (y * w + x) * 3;
                let in_bar = {
                    let dx = (x + w - bar_x) % w;
                    dx < bar_width
                };
                if in_bar {
                    pixels[i] = 255;
                    pixels[i + 1] = 255;
                    pixels[i + 2] = 255;
                } else {
                    pixels[i] = (x * 255 / w) as u8;
                    pixels[i + 1] = (y * 255 / h) as u8;
                    pixels[i + 2] = 64;
                }
            }
        }

        self.tick = self.tick.wrapping_add(1);
        Ok(Frame {
            width: self.width,
            height: self.height,
            pixels,
        })
    }

    fn describe(&self) -> String {
        format!("synthetic {}x{}", self.width, self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capture_dimensions() {
        let mut camera = SyntheticCamera::new(320, 240);
        let frame = camera.capture().unwrap();
        assert_eq!(frame.width, 320);
        assert_eq!(frame.height, 240);
        assert_eq!(frame.pixels.len(), 320 * 240 * 3);
        assert!(!frame.is_empty());
    }

    #[test]
    fn test_consecutive_frames_differ() {
        let mut camera = SyntheticCamera::new(64, 48);
        let first = camera.capture().unwrap();
        let second = camera.capture().unwrap();
        assert_ne!(first.pixels, second.pixels);
    }
}
