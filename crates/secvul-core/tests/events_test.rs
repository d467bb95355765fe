//! Tests for the export event dispatcher.

use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use secvul_core::events::*;

#[derive(Default)]
struct Recorder {
    pages: AtomicU64,
    last_emitted: AtomicU64,
    completed: AtomicU64,
}

impl ExportEventHandler for Recorder {
    fn on_page_processed(&self, event: &ExportProgressEvent) {
        self.pages.fetch_add(1, Ordering::SeqCst);
        self.last_emitted.store(event.emitted, Ordering::SeqCst);
    }

    fn on_export_complete(&self, _event: &ExportCompleteEvent) {
        self.completed.fetch_add(1, Ordering::SeqCst);
    }
}

struct Panicker;

impl ExportEventHandler for Panicker {
    fn on_page_processed(&self, _event: &ExportProgressEvent) {
        panic!("handler bug");
    }
}

#[test]
fn empty_dispatcher_is_a_no_op() {
    let dispatcher = EventDispatcher::new();
    assert_eq!(dispatcher.handler_count(), 0);
    dispatcher.emit_export_started(&ExportStartedEvent {
        db_path: PathBuf::from("x.db"),
        out_path: None,
        page_size: 10,
        row_cap: None,
    });
}

#[test]
fn events_reach_every_handler() {
    let recorder = Arc::new(Recorder::default());
    let mut dispatcher = EventDispatcher::new();
    dispatcher.register(recorder.clone());

    for page in 1..=3 {
        dispatcher.emit_page_processed(&ExportProgressEvent {
            pages: page,
            scanned: page * 10,
            emitted: page * 4,
        });
    }
    dispatcher.emit_export_complete(&ExportCompleteEvent {
        scanned: 30,
        emitted: 12,
        cap_reached: false,
        duration_ms: 5,
    });

    assert_eq!(recorder.pages.load(Ordering::SeqCst), 3);
    assert_eq!(recorder.last_emitted.load(Ordering::SeqCst), 12);
    assert_eq!(recorder.completed.load(Ordering::SeqCst), 1);
}

#[test]
fn panicking_handler_does_not_stop_later_handlers() {
    let recorder = Arc::new(Recorder::default());
    let mut dispatcher = EventDispatcher::new();
    dispatcher.register(Arc::new(Panicker));
    dispatcher.register(recorder.clone());

    dispatcher.emit_page_processed(&ExportProgressEvent {
        pages: 1,
        scanned: 1,
        emitted: 1,
    });

    assert_eq!(recorder.pages.load(Ordering::SeqCst), 1);
}
