//! Configuration system for secvul.
//! TOML-based, layered resolution: CLI > env > project file > defaults.

pub mod dataset_config;
pub mod export_config;
pub mod secvul_config;

pub use dataset_config::DatasetConfig;
pub use export_config::{ExportConfig, ExportSettings};
pub use secvul_config::{CliOverrides, SecvulConfig};
