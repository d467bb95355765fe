//! Query construction errors, raised before anything touches the store.

use super::error_code::{self, ErrorCode};

#[derive(Debug, thiserror::Error)]
pub enum QueryError {
    #[error("Empty value in {filter} filter")]
    EmptyValue { filter: &'static str },

    #[error("Malformed CWE identifier: {value:?}")]
    MalformedCwe { value: String },

    #[error("Path substring {value:?} is both included and excluded")]
    ConflictingPath { value: String },

    #[error("Invalid {field}: {message}")]
    InvalidBound { field: &'static str, message: String },
}

impl ErrorCode for QueryError {
    fn error_code(&self) -> &'static str {
        error_code::QUERY_ERROR
    }
}
