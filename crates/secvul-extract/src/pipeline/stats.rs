use serde::Serialize;

/// Counters for one export run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ExportStats {
    /// Candidate pairs pulled from the store and examined.
    pub scanned: u64,
    /// Pairs written to the sink.
    pub emitted: u64,
    /// Pairs dropped because only comments or whitespace changed.
    pub skipped_cosmetic: u64,
    /// Pages fetched from the store.
    pub pages: u64,
    /// The run stopped because `emitted` reached the row cap.
    pub cap_reached: bool,
    pub duration_ms: u64,
}
