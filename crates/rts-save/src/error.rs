//! Error types for rts-save

use thiserror::Error;

/// Save-game error type
#[derive(Debug, Error)]
pub enum Error {
    /// Save written by a newer format
    #[error("Unsupported save version {found} (supported up to {supported})")]
    UnsupportedVersion { found: u32, supported: u32 },

    /// Binary payload that does not decode
    #[error("Corrupt save data: {0}")]
    Corrupt(String),

    /// Text encoding or decoding failed
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Encoding not compiled in
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for save-game operations
pub type Result<T> = std::result::Result<T, Error>;
