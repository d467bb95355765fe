//! Logs export progress from pipeline events.

use secvul_core::events::{
    ExportEventHandler, ExportProgressEvent, ExportStartedEvent, SinkFlushedEvent,
};
use tracing::{debug, info};

/// Pages between info-level progress lines.
const PAGES_PER_INFO_LINE: u64 = 100;

#[derive(Debug, Default)]
pub struct LogProgressHandler;

impl ExportEventHandler for LogProgressHandler {
    fn on_export_started(&self, event: &ExportStartedEvent) {
        info!(
            db = %event.db_path.display(),
            out = ?event.out_path,
            page_size = event.page_size,
            row_cap = ?event.row_cap,
            "export started"
        );
    }

    fn on_page_processed(&self, event: &ExportProgressEvent) {
        if event.pages % PAGES_PER_INFO_LINE == 0 {
            info!(pages = event.pages, scanned = event.scanned, emitted = event.emitted, "progress");
        } else {
            debug!(pages = event.pages, scanned = event.scanned, emitted = event.emitted, "page done");
        }
    }

    fn on_sink_flushed(&self, event: &SinkFlushedEvent) {
        debug!(emitted = event.emitted, "output flushed");
    }
}
