//! Export pipeline errors.

use super::error_code::ErrorCode;
use super::{ConfigError, QueryError, SinkError, StorageError};

/// Errors that can abort an export run.
/// Aggregates subsystem errors via `From` conversions.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Query error: {0}")]
    Query(#[from] QueryError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Sink error: {0}")]
    Sink(#[from] SinkError),
}

impl ErrorCode for ExportError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Config(e) => e.error_code(),
            Self::Query(e) => e.error_code(),
            Self::Storage(e) => e.error_code(),
            Self::Sink(e) => e.error_code(),
        }
    }
}
