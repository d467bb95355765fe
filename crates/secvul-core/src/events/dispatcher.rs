//! EventDispatcher: synchronous event dispatch with zero overhead when empty.

use std::sync::Arc;

use super::handler::ExportEventHandler;
use super::types::*;

/// Synchronous event dispatcher wrapping a list of handlers.
///
/// A panicking handler is logged and skipped; the export carries on.
#[derive(Default, Clone)]
pub struct EventDispatcher {
    handlers: Vec<Arc<dyn ExportEventHandler>>,
}

impl EventDispatcher {
    /// Create a new empty dispatcher.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an event handler.
    pub fn register(&mut self, handler: Arc<dyn ExportEventHandler>) {
        self.handlers.push(handler);
    }

    /// Returns the number of registered handlers.
    pub fn handler_count(&self) -> usize {
        self.handlers.len()
    }

    fn emit<F: Fn(&dyn ExportEventHandler)>(&self, f: F) {
        for handler in &self.handlers {
            let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
                f(handler.as_ref());
            }));
            if result.is_err() {
                tracing::warn!("export event handler panicked; continuing");
            }
        }
    }

    pub fn emit_export_started(&self, event: &ExportStartedEvent) {
        self.emit(|h| h.on_export_started(event));
    }

    pub fn emit_page_processed(&self, event: &ExportProgressEvent) {
        self.emit(|h| h.on_page_processed(event));
    }

    pub fn emit_sink_flushed(&self, event: &SinkFlushedEvent) {
        self.emit(|h| h.on_sink_flushed(event));
    }

    pub fn emit_export_complete(&self, event: &ExportCompleteEvent) {
        self.emit(|h| h.on_export_complete(event));
    }
}

impl std::fmt::Debug for EventDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventDispatcher")
            .field("handlers", &self.handlers.len())
            .finish()
    }
}
