//! PRAGMA configuration for bulk read-only scans.
//!
//! No journal, no fsync, 100MB page cache, temp b-trees on disk,
//! automatic indexes off. These are tuning knobs; results do not depend on them.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use rusqlite::Connection;
use secvul_core::constants::PROGRESS_LOG_EVERY_TICKS;
use secvul_core::errors::StorageError;

/// Apply bulk-scan pragmas to a read-only connection.
pub fn apply_scan_pragmas(conn: &Connection) -> Result<(), StorageError> {
    conn.execute_batch(
        "
        PRAGMA query_only = ON;
        PRAGMA temp_store = FILE;
        PRAGMA cache_size = -100000;
        PRAGMA synchronous = OFF;
        PRAGMA journal_mode = OFF;
        PRAGMA automatic_index = OFF;
        ",
    )
    .map_err(|e| StorageError::SqliteError {
        message: format!("failed to apply scan pragmas: {e}"),
    })
}

/// Register a progress callback every `steps` VM instructions that logs a
/// heartbeat every [`PROGRESS_LOG_EVERY_TICKS`] ticks. Never interrupts.
pub fn install_progress_heartbeat(conn: &Connection, steps: u32) -> Arc<AtomicU64> {
    let ticks = Arc::new(AtomicU64::new(0));
    let counter = Arc::clone(&ticks);
    let steps = i32::try_from(steps).unwrap_or(i32::MAX);
    conn.progress_handler(
        steps,
        Some(move || {
            let n = counter.fetch_add(1, Ordering::Relaxed) + 1;
            if n % PROGRESS_LOG_EVERY_TICKS == 0 {
                tracing::debug!(ticks = n, "sqlite progress");
            }
            false
        }),
    );
    ticks
}
