//! ErrorCode trait: stable machine-readable codes for every error enum.

/// Every error enum implements this so callers (and the CLI's error line)
/// can report a structured code next to the human message.
pub trait ErrorCode {
    /// Returns the error code string (e.g., "STORAGE_ERROR").
    fn error_code(&self) -> &'static str;

    /// Returns `[ERROR_CODE] message`.
    fn coded_string(&self) -> String
    where
        Self: std::fmt::Display,
    {
        format!("[{}] {}", self.error_code(), self)
    }
}

pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
pub const QUERY_ERROR: &str = "QUERY_ERROR";
pub const STORAGE_ERROR: &str = "STORAGE_ERROR";
pub const STORE_NOT_FOUND: &str = "STORE_NOT_FOUND";
pub const MALFORMED_ROW: &str = "MALFORMED_ROW";
pub const SINK_ERROR: &str = "SINK_ERROR";
pub const DATASET_ERROR: &str = "DATASET_ERROR";
