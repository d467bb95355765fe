//! Export configuration and the resolved per-run settings.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_FLUSH_EVERY, DEFAULT_OUT_PATH, DEFAULT_PAGE_SIZE, DEFAULT_PROGRESS_STEPS,
};
use crate::errors::ConfigError;
use crate::types::{FilterSpec, PairingPolicy};

/// The `[export]` table. Every field is optional so layers can be merged.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ExportConfig {
    /// Path to the CVEfixes SQLite store. Required.
    pub db_path: Option<PathBuf>,
    /// CSV output path. Default: `method_pairs.csv`.
    pub out_path: Option<PathBuf>,
    pub languages: Vec<String>,
    pub cwe_ids: Vec<String>,
    pub include_unknown_cwe: Option<bool>,
    pub include_paths: Vec<String>,
    pub exclude_paths: Vec<String>,
    pub no_commit_msg: Option<bool>,
    /// Stop after emitting this many rows.
    pub row_cap: Option<u64>,
    /// Store-side LIMIT on candidate pairs.
    pub scan_limit: Option<u64>,
    /// Rows fetched per page. Default: 1000.
    pub page_size: Option<usize>,
    /// Flush the sink every N emitted rows; 0 disables. Default: 200.
    pub flush_every: Option<usize>,
    /// SQLite progress callback interval in VM steps. Default: 200000.
    pub progress_steps: Option<u32>,
    pub pairing: Option<PairingPolicy>,
}

/// Everything one export run needs, resolved and validated.
#[derive(Debug, Clone)]
pub struct ExportSettings {
    pub db_path: PathBuf,
    pub out_path: PathBuf,
    pub filter: FilterSpec,
    pub page_size: usize,
    pub flush_every: usize,
    pub progress_steps: u32,
    pub verbose: bool,
}

impl ExportConfig {
    pub fn effective_out_path(&self) -> PathBuf {
        self.out_path
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_OUT_PATH))
    }

    pub fn effective_page_size(&self) -> usize {
        self.page_size.unwrap_or(DEFAULT_PAGE_SIZE)
    }

    pub fn effective_flush_every(&self) -> usize {
        self.flush_every.unwrap_or(DEFAULT_FLUSH_EVERY)
    }

    pub fn effective_progress_steps(&self) -> u32 {
        self.progress_steps.unwrap_or(DEFAULT_PROGRESS_STEPS)
    }

    /// Build the run's filter predicates.
    pub fn filter_spec(&self) -> FilterSpec {
        FilterSpec {
            languages: self.languages.clone(),
            cwe_ids: self.cwe_ids.clone(),
            include_unknown_cwe: self.include_unknown_cwe.unwrap_or(false),
            include_paths: self.include_paths.clone(),
            exclude_paths: self.exclude_paths.clone(),
            row_cap: self.row_cap,
            scan_limit: self.scan_limit,
            include_commit_msg: !self.no_commit_msg.unwrap_or(false),
            pairing: self.pairing.unwrap_or_default(),
        }
    }

    /// Resolve into [`ExportSettings`]. Fails if no store path was given.
    pub fn settings(&self, verbose: bool) -> Result<ExportSettings, ConfigError> {
        let db_path = self.db_path.clone().ok_or_else(|| ConfigError::MissingValue {
            field: "export.db_path".to_string(),
        })?;
        Ok(ExportSettings {
            db_path,
            out_path: self.effective_out_path(),
            filter: self.filter_spec(),
            page_size: self.effective_page_size(),
            flush_every: self.effective_flush_every(),
            progress_steps: self.effective_progress_steps(),
            verbose,
        })
    }
}
