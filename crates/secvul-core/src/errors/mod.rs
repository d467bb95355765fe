//! Error handling for secvul.
//! One error enum per subsystem, `thiserror` only, zero `anyhow`.

pub mod config_error;
pub mod dataset_error;
pub mod error_code;
pub mod export_error;
pub mod query_error;
pub mod sink_error;
pub mod storage_error;

pub use config_error::ConfigError;
pub use dataset_error::DatasetError;
pub use error_code::ErrorCode;
pub use export_error::ExportError;
pub use query_error::QueryError;
pub use sink_error::SinkError;
pub use storage_error::StorageError;
