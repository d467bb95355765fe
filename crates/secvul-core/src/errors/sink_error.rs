//! Sink (output file) errors.

use std::path::PathBuf;

use super::error_code::{self, ErrorCode};

#[derive(Debug, thiserror::Error)]
pub enum SinkError {
    #[error("Cannot create output {path}: {source}")]
    Create {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Write failed: {message}")]
    Write { message: String },

    #[error("Flush failed: {source}")]
    Flush { source: std::io::Error },
}

impl ErrorCode for SinkError {
    fn error_code(&self) -> &'static str {
        error_code::SINK_ERROR
    }
}
