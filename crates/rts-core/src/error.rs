//! Error types for rts-core

use thiserror::Error;

/// Core error type
#[derive(Error, Debug)]
pub enum Error {
    #[error("Script not found: {0}")]
    ScriptNotFound(String),

    #[error("Label not found: {label} in script {script}")]
    LabelNotFound { script: String, label: String },

    #[error("Invalid state index {index} for script {script} ({len} states)")]
    InvalidState {
        script: String,
        index: usize,
        len: usize,
    },
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;
