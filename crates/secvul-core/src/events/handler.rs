//! ExportEventHandler trait: every method has a no-op default.

use super::types::*;

pub trait ExportEventHandler: Send + Sync {
    fn on_export_started(&self, _event: &ExportStartedEvent) {}
    fn on_page_processed(&self, _event: &ExportProgressEvent) {}
    fn on_sink_flushed(&self, _event: &SinkFlushedEvent) {}
    fn on_export_complete(&self, _event: &ExportCompleteEvent) {}
}
