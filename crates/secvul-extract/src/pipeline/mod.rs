//! Streaming export: store → query → pages → cosmetic filter → sink.
//!
//! Setup failures (missing or unreadable store, bad filter, unwritable
//! output) surface before the scan starts. Once scanning, any error aborts
//! the run; rows already flushed stay in the output.

mod stats;

pub use stats::ExportStats;

use std::time::Instant;

use rusqlite::params_from_iter;
use secvul_core::config::ExportSettings;
use secvul_core::constants::MAX_PLAN_ROWS_LOGGED;
use secvul_core::errors::{ConfigError, ExportError, StorageError};
use secvul_core::events::{
    EventDispatcher, ExportCompleteEvent, ExportProgressEvent, ExportStartedEvent,
    SinkFlushedEvent,
};
use secvul_storage::queries::probes::{explain_query_plan, probe_tables};
use secvul_storage::{build_pair_query, PairQuery, RowPager, StoreConnection};

use crate::normalizer::is_cosmetic_change;
use crate::sink::{CsvSink, PairSink};

/// One configured export. Each call to [`run`](Self::run) opens its own
/// connection and output, and releases both on every exit path.
#[derive(Debug)]
pub struct ExportPipeline {
    settings: ExportSettings,
    events: EventDispatcher,
}

impl ExportPipeline {
    pub fn new(settings: ExportSettings) -> Self {
        Self {
            settings,
            events: EventDispatcher::new(),
        }
    }

    /// Attach progress handlers.
    pub fn with_events(mut self, events: EventDispatcher) -> Self {
        self.events = events;
        self
    }

    pub fn settings(&self) -> &ExportSettings {
        &self.settings
    }

    /// Run the export into the configured CSV file.
    pub fn run(&self) -> Result<ExportStats, ExportError> {
        let (store, query) = self.prepare()?;
        let mut sink = CsvSink::create(&self.settings.out_path)?;
        self.events.emit_export_started(&ExportStartedEvent {
            db_path: self.settings.db_path.clone(),
            out_path: Some(self.settings.out_path.clone()),
            page_size: self.settings.page_size,
            row_cap: self.settings.filter.row_cap,
        });
        self.stream(&store, &query, &mut sink)
    }

    /// Run the export into a caller-supplied sink. The sink is flushed
    /// periodically and once at the end, but not closed.
    pub fn run_into<S: PairSink>(&self, sink: &mut S) -> Result<ExportStats, ExportError> {
        let (store, query) = self.prepare()?;
        self.events.emit_export_started(&ExportStartedEvent {
            db_path: self.settings.db_path.clone(),
            out_path: None,
            page_size: self.settings.page_size,
            row_cap: self.settings.filter.row_cap,
        });
        self.stream(&store, &query, sink)
    }

    /// Open the store and build the query. A store that is missing or
    /// cannot be opened as SQLite is a configuration problem, not a
    /// storage one.
    fn prepare(&self) -> Result<(StoreConnection, PairQuery), ExportError> {
        let settings = &self.settings;
        let store = StoreConnection::open_read_only(&settings.db_path).map_err(|e| {
            let message = match e {
                StorageError::StoreNotFound { path } => format!("store not found: {path}"),
                other => format!("store unreadable: {other}"),
            };
            ConfigError::ValidationFailed {
                field: "export.db_path".to_string(),
                message,
            }
        })?;
        let query = build_pair_query(&settings.filter)?;

        if settings.verbose {
            self.log_diagnostics(&store, &query);
            store.enable_progress_heartbeat(settings.progress_steps);
        }
        Ok((store, query))
    }

    /// Probes, plan and SQL. Advisory only: failures are logged.
    fn log_diagnostics(&self, store: &StoreConnection, query: &PairQuery) {
        let started = Instant::now();
        match probe_tables(store.conn()) {
            Ok(()) => tracing::debug!(
                elapsed_ms = started.elapsed().as_millis() as u64,
                "table probes ok"
            ),
            Err(e) => tracing::warn!(error = %e, "table probe failed"),
        }

        match explain_query_plan(store.conn(), query) {
            Ok(plan) => {
                for line in plan.iter().take(MAX_PLAN_ROWS_LOGGED) {
                    tracing::debug!(plan = %line, "query plan");
                }
            }
            Err(e) => tracing::warn!(error = %e, "EXPLAIN QUERY PLAN failed"),
        }

        tracing::debug!(
            store = %store.path().display(),
            pairing = self.settings.filter.pairing.name(),
            sql = %query.sql,
            params = query.params.len(),
            "pair query"
        );
    }

    fn stream<S: PairSink>(
        &self,
        store: &StoreConnection,
        query: &PairQuery,
        sink: &mut S,
    ) -> Result<ExportStats, ExportError> {
        let started = Instant::now();
        let mut stats = ExportStats::default();

        let result = self.scan(store, query, sink, &mut stats);
        if let Err(e) = &result {
            // Keep whatever made it into the sink before the failure.
            if let Err(flush_err) = sink.flush() {
                tracing::warn!(error = %flush_err, "flush after failed scan also failed");
            }
            tracing::error!(
                error = %e,
                scanned = stats.scanned,
                emitted = stats.emitted,
                "export aborted"
            );
        }
        result?;

        sink.flush()?;
        stats.duration_ms = started.elapsed().as_millis() as u64;

        tracing::info!(
            scanned = stats.scanned,
            emitted = stats.emitted,
            skipped_cosmetic = stats.skipped_cosmetic,
            pages = stats.pages,
            cap_reached = stats.cap_reached,
            duration_ms = stats.duration_ms,
            "export complete"
        );
        self.events.emit_export_complete(&ExportCompleteEvent {
            scanned: stats.scanned,
            emitted: stats.emitted,
            cap_reached: stats.cap_reached,
            duration_ms: stats.duration_ms,
        });
        Ok(stats)
    }

    fn scan<S: PairSink>(
        &self,
        store: &StoreConnection,
        query: &PairQuery,
        sink: &mut S,
        stats: &mut ExportStats,
    ) -> Result<(), ExportError> {
        let settings = &self.settings;
        let cap = settings.filter.row_cap;
        let flush_every = settings.flush_every as u64;

        let mut stmt = store
            .conn()
            .prepare(&query.sql)
            .map_err(StorageError::sqlite)?;
        let rows = stmt
            .query(params_from_iter(query.params.iter()))
            .map_err(StorageError::sqlite)?;
        let mut pager = RowPager::new(rows, settings.page_size);

        while let Some(page) = pager.next_page()? {
            stats.pages = pager.pages();
            for pair in page {
                stats.scanned += 1;
                let language = pair.programming_language.as_deref();
                if is_cosmetic_change(&pair.method_code_before, &pair.method_code_after, language)
                {
                    stats.skipped_cosmetic += 1;
                    continue;
                }

                sink.write_pair(&pair)?;
                stats.emitted += 1;

                if flush_every > 0 && stats.emitted % flush_every == 0 {
                    sink.flush()?;
                    self.events.emit_sink_flushed(&SinkFlushedEvent {
                        emitted: stats.emitted,
                    });
                }
                if cap.is_some_and(|cap| stats.emitted >= cap) {
                    stats.cap_reached = true;
                    break;
                }
            }

            self.events.emit_page_processed(&ExportProgressEvent {
                pages: stats.pages,
                scanned: stats.scanned,
                emitted: stats.emitted,
            });
            if stats.cap_reached {
                break;
            }
        }

        tracing::debug!(
            rows_read = pager.rows_read(),
            cursor_drained = pager.is_exhausted(),
            "scan finished"
        );
        Ok(())
    }
}
