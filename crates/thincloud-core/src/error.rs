//! Shared error type across ThinCloud crates.

use thiserror::Error;

/// Stable error codes surfaced in logs and diagnostics (stable API).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// A required identifier or field was empty.
    MissingValue,
    /// Inbound payload was not syntactically valid JSON.
    Parse,
    /// Destination buffer cannot hold the result.
    BufferTooSmall,
    /// Configuration was unreadable or failed validation.
    Config,
    /// The underlying MQTT client rejected an action.
    Transport,
}

impl ErrorCode {
    /// String representation used in logs and test assertions.
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorCode::MissingValue => "MISSING_VALUE",
            ErrorCode::Parse => "PARSE_ERROR",
            ErrorCode::BufferTooSmall => "BUFFER_TOO_SMALL",
            ErrorCode::Config => "CONFIG_INVALID",
            ErrorCode::Transport => "TRANSPORT_FAILURE",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, ThinCloudError>;

/// Unified error type used by the core codec and the client layer.
///
/// On any error, output buffers passed to the failing operation hold
/// unspecified bytes and must not be used.
#[derive(Debug, Error)]
pub enum ThinCloudError {
    #[error("missing value: {0}")]
    MissingValue(&'static str),
    #[error("parse error: {0}")]
    Parse(String),
    #[error("buffer too small: need {needed} bytes, capacity {capacity}")]
    BufferTooSmall { needed: usize, capacity: usize },
    #[error("invalid config: {0}")]
    Config(String),
    #[error("transport failure: {0}")]
    Transport(String),
}

impl ThinCloudError {
    /// Map to a stable code.
    pub fn code(&self) -> ErrorCode {
        match self {
            ThinCloudError::MissingValue(_) => ErrorCode::MissingValue,
            ThinCloudError::Parse(_) => ErrorCode::Parse,
            ThinCloudError::BufferTooSmall { .. } => ErrorCode::BufferTooSmall,
            ThinCloudError::Config(_) => ErrorCode::Config,
            ThinCloudError::Transport(_) => ErrorCode::Transport,
        }
    }
}
