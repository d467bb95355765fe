//! Top-level secvul configuration with layered resolution.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::{DatasetConfig, ExportConfig};
use crate::constants::CONFIG_FILE_NAME;
use crate::errors::ConfigError;
use crate::types::PairingPolicy;

/// Top-level configuration aggregating all sub-configs.
///
/// Resolution order (highest priority first):
/// 1. CLI flags (applied via `apply_cli_overrides`)
/// 2. Environment variables (`SECVUL_*`)
/// 3. Project config (`secvul.toml` in the working directory, or `--config`)
/// 4. Compiled defaults
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct SecvulConfig {
    pub export: ExportConfig,
    pub datasets: DatasetConfig,
}

/// CLI override arguments that can be applied to a config.
/// `None` means "not given on the command line".
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub db_path: Option<PathBuf>,
    pub out_path: Option<PathBuf>,
    pub languages: Option<Vec<String>>,
    pub cwe_ids: Option<Vec<String>>,
    pub include_unknown_cwe: Option<bool>,
    pub include_paths: Option<Vec<String>>,
    pub exclude_paths: Option<Vec<String>>,
    pub no_commit_msg: Option<bool>,
    pub row_cap: Option<u64>,
    pub scan_limit: Option<u64>,
    pub page_size: Option<usize>,
    pub flush_every: Option<usize>,
    pub progress_steps: Option<u32>,
    pub pairing: Option<PairingPolicy>,
    pub data_dir: Option<PathBuf>,
}

impl SecvulConfig {
    /// Load configuration with layered resolution.
    ///
    /// `explicit` is a config file named on the command line; it must exist.
    /// Otherwise `secvul.toml` in `root` is used when present.
    pub fn load(
        root: &Path,
        explicit: Option<&Path>,
        cli_overrides: Option<&CliOverrides>,
    ) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        // Layer 3: project config
        match explicit {
            Some(path) => Self::merge_toml_file(&mut config, path)?,
            None => {
                let project_config_path = root.join(CONFIG_FILE_NAME);
                if project_config_path.exists() {
                    Self::merge_toml_file(&mut config, &project_config_path)?;
                }
            }
        }

        // Layer 2: environment variables
        Self::apply_env_overrides(&mut config)?;

        // Layer 1 (highest priority): CLI flags
        if let Some(cli) = cli_overrides {
            Self::apply_cli_overrides(&mut config, cli);
        }

        Self::validate(&config)?;

        Ok(config)
    }

    /// Load configuration from a TOML string (for testing).
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })
    }

    /// Validate the configuration values.
    pub fn validate(config: &SecvulConfig) -> Result<(), ConfigError> {
        let export = &config.export;
        if export.page_size == Some(0) {
            return Err(ConfigError::ValidationFailed {
                field: "export.page_size".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }
        if export.row_cap == Some(0) {
            return Err(ConfigError::ValidationFailed {
                field: "export.row_cap".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }
        if export.scan_limit == Some(0) {
            return Err(ConfigError::ValidationFailed {
                field: "export.scan_limit".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }
        if export.progress_steps == Some(0) {
            return Err(ConfigError::ValidationFailed {
                field: "export.progress_steps".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }
        Ok(())
    }

    /// Merge a TOML file into the existing config.
    /// Unknown keys are silently ignored (forward-compatible).
    fn merge_toml_file(config: &mut SecvulConfig, path: &Path) -> Result<(), ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;

        let file_config: SecvulConfig =
            toml::from_str(&content).map_err(|e| ConfigError::ParseError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

        Self::merge(config, &file_config);
        Ok(())
    }

    /// Merge `other` into `base`; `other` wins wherever it has a value.
    fn merge(base: &mut SecvulConfig, other: &SecvulConfig) {
        let (b, o) = (&mut base.export, &other.export);
        if o.db_path.is_some() {
            b.db_path = o.db_path.clone();
        }
        if o.out_path.is_some() {
            b.out_path = o.out_path.clone();
        }
        if !o.languages.is_empty() {
            b.languages = o.languages.clone();
        }
        if !o.cwe_ids.is_empty() {
            b.cwe_ids = o.cwe_ids.clone();
        }
        if o.include_unknown_cwe.is_some() {
            b.include_unknown_cwe = o.include_unknown_cwe;
        }
        if !o.include_paths.is_empty() {
            b.include_paths = o.include_paths.clone();
        }
        if !o.exclude_paths.is_empty() {
            b.exclude_paths = o.exclude_paths.clone();
        }
        if o.no_commit_msg.is_some() {
            b.no_commit_msg = o.no_commit_msg;
        }
        if o.row_cap.is_some() {
            b.row_cap = o.row_cap;
        }
        if o.scan_limit.is_some() {
            b.scan_limit = o.scan_limit;
        }
        if o.page_size.is_some() {
            b.page_size = o.page_size;
        }
        if o.flush_every.is_some() {
            b.flush_every = o.flush_every;
        }
        if o.progress_steps.is_some() {
            b.progress_steps = o.progress_steps;
        }
        if o.pairing.is_some() {
            b.pairing = o.pairing;
        }

        if other.datasets.data_dir.is_some() {
            base.datasets.data_dir = other.datasets.data_dir.clone();
        }
    }

    /// Apply environment variable overrides.
    /// Pattern: `SECVUL_DB_PATH`, `SECVUL_ROW_CAP`, etc. A numeric variable
    /// that does not parse is a validation error, not silently ignored.
    fn apply_env_overrides(config: &mut SecvulConfig) -> Result<(), ConfigError> {
        if let Ok(val) = std::env::var("SECVUL_DB_PATH") {
            config.export.db_path = Some(PathBuf::from(val));
        }
        if let Ok(val) = std::env::var("SECVUL_OUT_PATH") {
            config.export.out_path = Some(PathBuf::from(val));
        }
        if let Some(v) = env_number("SECVUL_ROW_CAP")? {
            config.export.row_cap = Some(v);
        }
        if let Some(v) = env_number("SECVUL_PAGE_SIZE")? {
            config.export.page_size = Some(v);
        }
        if let Some(v) = env_number("SECVUL_FLUSH_EVERY")? {
            config.export.flush_every = Some(v);
        }
        if let Ok(val) = std::env::var("SECVUL_DATA_DIR") {
            config.datasets.data_dir = Some(PathBuf::from(val));
        }
        Ok(())
    }

    /// Apply CLI overrides (highest priority).
    fn apply_cli_overrides(config: &mut SecvulConfig, cli: &CliOverrides) {
        let export = &mut config.export;
        if let Some(ref v) = cli.db_path {
            export.db_path = Some(v.clone());
        }
        if let Some(ref v) = cli.out_path {
            export.out_path = Some(v.clone());
        }
        if let Some(ref v) = cli.languages {
            export.languages = v.clone();
        }
        if let Some(ref v) = cli.cwe_ids {
            export.cwe_ids = v.clone();
        }
        if let Some(v) = cli.include_unknown_cwe {
            export.include_unknown_cwe = Some(v);
        }
        if let Some(ref v) = cli.include_paths {
            export.include_paths = v.clone();
        }
        if let Some(ref v) = cli.exclude_paths {
            export.exclude_paths = v.clone();
        }
        if let Some(v) = cli.no_commit_msg {
            export.no_commit_msg = Some(v);
        }
        if let Some(v) = cli.row_cap {
            export.row_cap = Some(v);
        }
        if let Some(v) = cli.scan_limit {
            export.scan_limit = Some(v);
        }
        if let Some(v) = cli.page_size {
            export.page_size = Some(v);
        }
        if let Some(v) = cli.flush_every {
            export.flush_every = Some(v);
        }
        if let Some(v) = cli.progress_steps {
            export.progress_steps = Some(v);
        }
        if let Some(v) = cli.pairing {
            export.pairing = Some(v);
        }
        if let Some(ref v) = cli.data_dir {
            config.datasets.data_dir = Some(v.clone());
        }
    }

    /// Serialize the config back to TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError {
            path: "<serialization>".to_string(),
            message: e.to_string(),
        })
    }
}

fn env_number<T: std::str::FromStr>(key: &str) -> Result<Option<T>, ConfigError> {
    match std::env::var(key) {
        Ok(val) => val
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|_| ConfigError::ValidationFailed {
                field: key.to_string(),
                message: format!("not a number: {val:?}"),
            }),
        Err(_) => Ok(None),
    }
}
