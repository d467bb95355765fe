//! FilterSpec: the immutable inclusion predicates for one export run.

use serde::{Deserialize, Serialize};

/// How to pair rows when a (file change, method, signature) group has more
/// than one "before" or "after" revision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PairingPolicy {
    /// Emit every before/after combination of the group.
    #[default]
    CrossProduct,
    /// Keep only the smallest `method_change_id` on each side.
    LowestId,
}

impl PairingPolicy {
    pub fn name(&self) -> &'static str {
        match self {
            Self::CrossProduct => "cross_product",
            Self::LowestId => "lowest_id",
        }
    }
}

/// Inclusion predicates for an export run. Built once from configuration and
/// only ever borrowed afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterSpec {
    /// Declared file languages to keep. Empty keeps all.
    pub languages: Vec<String>,
    /// CWE ids to keep. Empty keeps all (subject to `include_unknown_cwe`).
    pub cwe_ids: Vec<String>,
    /// Keep rows with no CWE classification when `cwe_ids` is empty.
    pub include_unknown_cwe: bool,
    /// Keep a row if either path contains any of these substrings.
    pub include_paths: Vec<String>,
    /// Drop a row if either path contains any of these substrings.
    pub exclude_paths: Vec<String>,
    /// Maximum number of emitted rows.
    pub row_cap: Option<u64>,
    /// Maximum number of candidate pairs the store returns.
    pub scan_limit: Option<u64>,
    /// Project the commit message; when false a NULL is projected instead.
    pub include_commit_msg: bool,
    pub pairing: PairingPolicy,
}

impl Default for FilterSpec {
    fn default() -> Self {
        Self {
            languages: Vec::new(),
            cwe_ids: Vec::new(),
            include_unknown_cwe: false,
            include_paths: Vec::new(),
            exclude_paths: Vec::new(),
            row_cap: None,
            scan_limit: None,
            include_commit_msg: true,
            pairing: PairingPolicy::default(),
        }
    }
}
