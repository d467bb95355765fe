//! Storage errors.

use super::error_code::{self, ErrorCode};

/// Errors raised while opening or reading the vulnerability store.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("SQLite error: {message}")]
    SqliteError { message: String },

    #[error("Store not found: {path}")]
    StoreNotFound { path: String },

    #[error("Malformed row: column {column}: {message}")]
    MalformedRow { column: &'static str, message: String },
}

impl StorageError {
    /// Shorthand used at every rusqlite call site.
    pub fn sqlite(e: impl std::fmt::Display) -> Self {
        Self::SqliteError {
            message: e.to_string(),
        }
    }
}

impl ErrorCode for StorageError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::SqliteError { .. } => error_code::STORAGE_ERROR,
            Self::StoreNotFound { .. } => error_code::STORE_NOT_FOUND,
            Self::MalformedRow { .. } => error_code::MALFORMED_ROW,
        }
    }
}
