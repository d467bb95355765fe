//! Event payload types for the export lifecycle.

use std::path::PathBuf;

/// Payload for `on_export_started`.
#[derive(Debug, Clone)]
pub struct ExportStartedEvent {
    pub db_path: PathBuf,
    pub out_path: Option<PathBuf>,
    pub page_size: usize,
    pub row_cap: Option<u64>,
}

/// Payload for `on_page_processed`. Counts are cumulative.
#[derive(Debug, Clone)]
pub struct ExportProgressEvent {
    pub pages: u64,
    pub scanned: u64,
    pub emitted: u64,
}

/// Payload for `on_sink_flushed`.
#[derive(Debug, Clone)]
pub struct SinkFlushedEvent {
    pub emitted: u64,
}

/// Payload for `on_export_complete`.
#[derive(Debug, Clone)]
pub struct ExportCompleteEvent {
    pub scanned: u64,
    pub emitted: u64,
    pub cap_reached: bool,
    pub duration_ms: u64,
}
