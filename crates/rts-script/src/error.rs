//! Error types for rts-script

use rts_core::SourceLocation;
use thiserror::Error;

/// Script compile error type
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A fatal compile error, with the offending line
    #[error("{file}:{line}: {message}\n  > {text}")]
    Parse {
        file: String,
        line: usize,
        text: String,
        message: String,
    },
}

impl Error {
    /// Build a parse error at a source location
    pub fn parse(at: &SourceLocation, text: &str, message: impl Into<String>) -> Self {
        Error::Parse {
            file: at.file.clone(),
            line: at.line,
            text: text.to_string(),
            message: message.into(),
        }
    }

    /// Line number of a parse error
    pub fn line(&self) -> Option<usize> {
        match self {
            Error::Parse { line, .. } => Some(*line),
            Error::Io(_) => None,
        }
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;
