//! Benchmark loading errors.

use std::path::PathBuf;

use super::error_code::{self, ErrorCode};

#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("CSV error in {path}: {message}")]
    Csv { path: PathBuf, message: String },

    #[error("Missing column {column} in {path}")]
    MissingColumn { path: PathBuf, column: String },

    #[error("Invalid value {value:?} in column {column}")]
    InvalidValue { column: String, value: String },

    #[error("Unknown sample index: {index}")]
    UnknownIndex { index: String },

    #[error("Duplicate sample id: {id}")]
    DuplicateId { id: String },
}

impl ErrorCode for DatasetError {
    fn error_code(&self) -> &'static str {
        error_code::DATASET_ERROR
    }
}
