//! # Error Types
//!
//! Custom error types for Wing Link using `thiserror`.
//!
//! Only ambient failures (configuration, serial I/O) are errors. Protocol
//! rejects such as a bad frame checksum or a wrong-length radio payload are
//! normal outcomes handled in place, never error values.

use thiserror::Error;

/// Main error type for Wing Link
#[derive(Debug, Error)]
pub enum WingLinkError {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] toml::de::Error),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serial port errors
    #[error("Serial error: {0}")]
    Serial(String),

    /// No usable serial device among the candidate paths
    #[error("No serial device found at: {0}")]
    SerialPortNotFound(String),
}

/// Result type alias for Wing Link
pub type Result<T> = std::result::Result<T, WingLinkError>;
