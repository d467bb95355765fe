//! Command-line arguments.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use secvul_core::config::CliOverrides;
use secvul_core::constants::VERSION;
use secvul_core::types::PairingPolicy;

#[derive(Parser, Debug)]
#[command(name = "secvul")]
#[command(version = VERSION)]
#[command(about = "Extract vulnerability-fix method pairs and benchmark samples", long_about = None)]
pub struct Cli {
    /// Debug logging, store probes, query plan and a progress heartbeat
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Emit JSON-formatted log lines
    #[arg(long = "json-logs", global = true)]
    pub json_logs: bool,

    /// Config file (default: ./secvul.toml when present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Export before/after method pairs whose code really changed
    Export(ExportArgs),

    /// Load a benchmark and print the selected samples as JSON lines
    Samples(SamplesArgs),
}

#[derive(Args, Debug, Default)]
pub struct ExportArgs {
    /// CVEfixes SQLite store
    #[arg(long = "db")]
    pub db: Option<PathBuf>,

    /// CSV output path (default: method_pairs.csv)
    #[arg(long = "out")]
    pub out: Option<PathBuf>,

    /// Declared file language to keep (repeatable)
    #[arg(long = "language", value_delimiter = ',')]
    pub languages: Vec<String>,

    /// CWE to keep, `79` or `CWE-79` (repeatable)
    #[arg(long = "cwe", value_delimiter = ',')]
    pub cwes: Vec<String>,

    /// Keep rows without a CWE classification
    #[arg(long, overrides_with = "no_include_unknown_cwe")]
    pub include_unknown_cwe: bool,

    /// Drop rows without a CWE classification, even if the config keeps them
    #[arg(long, overrides_with = "include_unknown_cwe")]
    pub no_include_unknown_cwe: bool,

    /// Keep rows whose path contains this substring (repeatable)
    #[arg(long = "include-path")]
    pub include_paths: Vec<String>,

    /// Drop rows whose path contains this substring (repeatable)
    #[arg(long = "exclude-path")]
    pub exclude_paths: Vec<String>,

    /// Leave commit messages out of the output
    #[arg(long, overrides_with = "commit_msg")]
    pub no_commit_msg: bool,

    /// Keep commit messages, even if the config leaves them out
    #[arg(long, overrides_with = "no_commit_msg")]
    pub commit_msg: bool,

    /// Stop after emitting this many rows
    #[arg(long)]
    pub limit: Option<u64>,

    /// Store-side cap on candidate pairs
    #[arg(long)]
    pub scan_limit: Option<u64>,

    /// Rows fetched from the store per page
    #[arg(long)]
    pub chunk_size: Option<usize>,

    /// Flush the output every N emitted rows (0 disables)
    #[arg(long)]
    pub flush_every: Option<usize>,

    /// SQLite instructions between progress heartbeats (verbose only)
    #[arg(long)]
    pub progress_steps: Option<u32>,

    /// How to pair duplicate revisions of one method
    #[arg(long, value_enum)]
    pub pairing: Option<PairingArg>,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum PairingArg {
    CrossProduct,
    LowestId,
}

impl From<PairingArg> for PairingPolicy {
    fn from(arg: PairingArg) -> Self {
        match arg {
            PairingArg::CrossProduct => PairingPolicy::CrossProduct,
            PairingArg::LowestId => PairingPolicy::LowestId,
        }
    }
}

impl ExportArgs {
    /// Flags the user actually gave. Unset flags leave lower layers alone.
    pub fn overrides(&self) -> CliOverrides {
        fn list(values: &[String]) -> Option<Vec<String>> {
            (!values.is_empty()).then(|| values.to_vec())
        }
        /// `--x` / `--no-x` pair; the last one given wins.
        fn switch(on: bool, off: bool) -> Option<bool> {
            match (on, off) {
                (true, _) => Some(true),
                (_, true) => Some(false),
                _ => None,
            }
        }
        CliOverrides {
            db_path: self.db.clone(),
            out_path: self.out.clone(),
            languages: list(&self.languages),
            cwe_ids: list(&self.cwes),
            include_unknown_cwe: switch(self.include_unknown_cwe, self.no_include_unknown_cwe),
            include_paths: list(&self.include_paths),
            exclude_paths: list(&self.exclude_paths),
            no_commit_msg: switch(self.no_commit_msg, self.commit_msg),
            row_cap: self.limit,
            scan_limit: self.scan_limit,
            page_size: self.chunk_size,
            flush_every: self.flush_every,
            progress_steps: self.progress_steps,
            pairing: self.pairing.map(Into::into),
            data_dir: None,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum BenchmarkKind {
    /// Prepared CSV with `code`, `vul`, `cwe_id`
    Cvefixes,
    /// Method-pair CSV written by `secvul export`
    CvefixesExport,
    Juliet,
    Owasp,
}

#[derive(Args, Debug)]
pub struct SamplesArgs {
    #[arg(long, value_enum)]
    pub benchmark: BenchmarkKind,

    /// Index file (CVEfixes, Juliet) or benchmark directory (OWASP).
    /// Juliet and OWASP default to the conventional layout under the data dir.
    #[arg(long)]
    pub path: Option<PathBuf>,

    /// Benchmark data directory (default: data)
    #[arg(long)]
    pub data_dir: Option<PathBuf>,

    /// Juliet source tree (default: next to the index)
    #[arg(long)]
    pub code_root: Option<PathBuf>,

    /// Juliet variant used for the default layout
    #[arg(long, default_value = "juliet-java-1.3")]
    pub variant: String,

    /// Language whose comments are stripped from prepared CVEfixes code
    #[arg(long)]
    pub language: Option<String>,

    /// Keep only vulnerable (true) or fixed (false) samples
    #[arg(long)]
    pub vul: Option<bool>,

    /// Restrict to the first N CWEs of the Top 25
    #[arg(long)]
    pub top_cwe: Option<usize>,

    /// as-is, cwe, random or random-cwe
    #[arg(long, default_value = "as-is")]
    pub sort: String,

    /// Number of samples (per CWE with --top-cwe)
    #[arg(long)]
    pub n_examples: Option<usize>,

    /// Juliet only: drop samples under this many source lines
    #[arg(long)]
    pub min_sloc: Option<usize>,

    /// Exact sample ids; overrides every other selection flag
    #[arg(long, value_delimiter = ',')]
    pub indices: Vec<String>,
}
