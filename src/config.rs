//! Configuration for the DrishtiIO daemon
//!
//! Loads configuration from a TOML file with the small set of parameters
//! the daemon needs: control ports, video capture parameters, and logging.

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Top-level application configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    pub network: NetworkConfig,
    pub video: VideoConfig,
    pub camera: CameraConfig,
    pub logging: LoggingConfig,
}

/// UDP control-plane and video delivery ports
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct NetworkConfig {
    /// UDP port for inbound subscribe requests
    pub subscribe_port: u16,
    /// UDP port for inbound operator commands
    pub command_port: u16,
    /// Video delivery port used when a subscriber does not request one
    pub default_video_port: u16,
}

/// Video capture and compression parameters
///
/// These are fixed at process start; changing them does not affect the
/// wire protocol, only the content of the compressed frames.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct VideoConfig {
    /// Capture width in pixels
    pub width: u32,
    /// Capture height in pixels
    pub height: u32,
    /// Target frame rate (frames per second)
    pub fps: u32,
    /// JPEG quality (1-100)
    pub jpeg_quality: u8,
}

/// Camera source selection
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CameraConfig {
    /// Camera driver type ("synthetic")
    #[serde(rename = "type")]
    pub camera_type: String,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,
}

impl AppConfig {
    /// Load configuration from TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let config: AppConfig = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Built-in defaults
    ///
    /// Suitable for running the daemon without a configuration file.
    pub fn defaults() -> Self {
        Self {
            network: NetworkConfig {
                subscribe_port: 5007,
                command_port: 5005,
                default_video_port: 5600,
            },
            video: VideoConfig {
                width: 640,
                height: 480,
                fps: 30,
                jpeg_quality: 80,
            },
            camera: CameraConfig {
                camera_type: "synthetic".to_string(),
            },
            logging: LoggingConfig {
                level: "info".to_string(),
            },
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::defaults()
    }
}
