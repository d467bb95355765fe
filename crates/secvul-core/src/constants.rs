//! Shared constants for the secvul extractor and benchmark loaders.

/// secvul version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Project config file looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = "secvul.toml";

/// Environment variable holding the tracing filter directives.
pub const LOG_ENV_VAR: &str = "SECVUL_LOG";

/// Default CSV output path.
pub const DEFAULT_OUT_PATH: &str = "method_pairs.csv";

/// Default number of rows pulled from the store per page.
pub const DEFAULT_PAGE_SIZE: usize = 1000;

/// Default number of emitted rows between sink flushes.
pub const DEFAULT_FLUSH_EVERY: usize = 200;

/// Default number of SQLite VM instructions between progress callbacks.
pub const DEFAULT_PROGRESS_STEPS: u32 = 200_000;

/// A heartbeat is logged every this many progress callbacks.
pub const PROGRESS_LOG_EVERY_TICKS: u64 = 50;

/// Maximum number of `EXPLAIN QUERY PLAN` rows logged in verbose mode.
pub const MAX_PLAN_ROWS_LOGGED: usize = 20;

/// Declared file languages whose comments are line-leading `#`.
pub const HASH_COMMENT_LANGUAGES: &[&str] = &[
    "Python", "Ruby", "Perl", "Shell", "Makefile", "R", "Haskell", "YAML",
];

/// CWE Top 25 (2023), most dangerous first. Used by benchmark `top_cwe` selection.
pub const CWE_TOP_25: &[u32] = &[
    787, 79, 89, 416, 78, 20, 125, 22, 352, 434, 862, 476, 287, 190, 502, 77, 119, 798, 918,
    306, 362, 269, 94, 863, 276,
];
