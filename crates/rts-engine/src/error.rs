//! Error types for rts-engine

use thiserror::Error;

/// Result type for rts-engine operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in rts-engine
#[derive(Debug, Error)]
pub enum Error {
    /// Script compilation or loading failed
    #[error("script error: {0}")]
    Script(#[from] rts_script::Error),

    /// Save or restore failed
    #[error("save error: {0}")]
    Save(#[from] rts_save::Error),

    /// Invalid configuration
    #[error("config error: {0}")]
    Config(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
