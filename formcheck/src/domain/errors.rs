//! Structured error types for formcheck
//!
//! Using thiserror for automatic Display implementation and error chaining.
//! The analysis engine itself never fails; these cover the I/O around it.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SourceError {
    #[error("Failed to open recording {path}: {source}")]
    RecordingOpenFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed frame on line {line}: {reason}")]
    MalformedFrame { line: usize, reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid range for {name}: min {min} is greater than max {max}")]
    InvalidRange { name: &'static str, min: f64, max: f64 },

    #[error("{name} must be a non-negative number, got {value}")]
    InvalidTolerance { name: &'static str, value: f64 },

    #[error("Failed to parse config file: {0}")]
    ParseFailed(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Failed to write {path}: {source}")]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
