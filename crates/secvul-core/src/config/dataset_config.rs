//! Benchmark dataset configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct DatasetConfig {
    /// Root directory holding the benchmark files. Default: `data`.
    pub data_dir: Option<PathBuf>,
}

impl DatasetConfig {
    pub fn effective_data_dir(&self) -> PathBuf {
        self.data_dir.clone().unwrap_or_else(|| PathBuf::from("data"))
    }
}
