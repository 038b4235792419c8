//! DrishtiIO - Video streaming daemon for robot teleoperation
//!
//! Streams MJPEG video from the robot's camera to a dynamically discovered
//! viewer over UDP, while concurrently accepting operator commands:
//!
//! - **UDP subscribe port (5007)**: viewers register as the video
//!   destination, optionally naming the delivery port (default 5600)
//! - **UDP command port (5005)**: operator commands update the shared
//!   command state; the first commander also seeds the video destination
//!   if no viewer has subscribed yet
//! - **Video datagrams**: each compressed frame is fragmented into
//!   datagrams of at most 1300 payload bytes behind a 24-byte header
//!   (see [`video::protocol`]), fire-and-forget to a single destination
//!
//! Three loops run for the process lifetime: the two listeners and the
//! paced streaming loop, coordinated only through the two shared state
//! cells in [`state`].

pub mod camera;
pub mod codec;
pub mod config;
pub mod control;
pub mod error;
pub mod state;
pub mod video;

pub use config::AppConfig;
pub use error::{Error, Result};
