//! # Error Types
//!
//! Custom error types for Sysinfo Display using `thiserror`.

use thiserror::Error;

/// Main error type for Sysinfo Display
#[derive(Debug, Error)]
pub enum SysinfoDisplayError {
    /// Serial port errors
    #[error("Serial error: {0}")]
    Serial(String),

    /// None of the candidate serial ports could be opened
    #[error("No serial port could be opened (tried: {0})")]
    SerialPortNotFound(String),

    /// No input device exposes the configured button keys
    #[error("No button input device found with the configured keys")]
    ButtonDeviceNotFound,

    /// Button input errors
    #[error("Button input error: {0}")]
    Buttons(String),

    /// Display surface errors
    #[error("Display error: {0}")]
    Display(std::io::Error),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] toml::de::Error),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for Sysinfo Display
pub type Result<T> = std::result::Result<T, SysinfoDisplayError>;

/// Reasons a telemetry line is rejected.
///
/// All of these are recoverable: the line is dropped and the loop carries on
/// with the last good telemetry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// Trimmed line is shorter than the minimum plausible record
    #[error("line too short ({0} chars)")]
    TooShort(usize),

    /// Line is not a JSON object
    #[error("malformed payload: {0}")]
    MalformedPayload(String),

    /// Required key absent or not a number
    #[error("missing or non-numeric field `{0}`")]
    MissingField(&'static str),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_messages() {
        assert_eq!(ParseError::TooShort(3).to_string(), "line too short (3 chars)");
        assert_eq!(
            ParseError::MissingField("GpuPowerWatts").to_string(),
            "missing or non-numeric field `GpuPowerWatts`"
        );
    }

    #[test]
    fn test_io_error_converts() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: SysinfoDisplayError = io.into();
        assert!(matches!(err, SysinfoDisplayError::Io(_)));
        assert!(err.to_string().starts_with("I/O error"));
    }
}
