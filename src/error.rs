//! Error types for DrishtiIO

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// DrishtiIO error types
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration parse error
    #[error("Config error: {0}")]
    Config(#[from] toml::de::Error),

    /// Camera capture failure
    #[error("Camera error: {0}")]
    Camera(String),

    /// Frame compression failure
    #[error("Encode error: {0}")]
    Encode(String),

    /// Invalid packet or header
    #[error("Invalid packet: {0}")]
    InvalidPacket(String),

    /// Generic error with message
    #[error("{0}")]
    Other(String),
}
