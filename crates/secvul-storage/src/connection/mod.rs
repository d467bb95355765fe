//! Read-only connection to the vulnerability store.

pub mod pragmas;

use std::path::{Path, PathBuf};
use std::sync::atomic::AtomicU64;
use std::sync::Arc;
use std::time::Instant;

use rusqlite::{Connection, OpenFlags};
use secvul_core::errors::StorageError;

use self::pragmas::{apply_scan_pragmas, install_progress_heartbeat};

/// A read-only connection owned by exactly one export run.
/// Dropping it closes the underlying SQLite handle.
pub struct StoreConnection {
    conn: Connection,
    path: PathBuf,
}

impl StoreConnection {
    /// Open the store read-only, apply bulk-scan pragmas and read the
    /// schema once. A missing file is reported as `StoreNotFound` rather
    /// than letting SQLite fail with a generic message; a file that is not
    /// a SQLite database fails here instead of at the first scan.
    pub fn open_read_only(path: &Path) -> Result<Self, StorageError> {
        if !path.is_file() {
            return Err(StorageError::StoreNotFound {
                path: path.display().to_string(),
            });
        }

        let started = Instant::now();
        let conn = Connection::open_with_flags(
            path,
            OpenFlags::SQLITE_OPEN_READ_ONLY
                | OpenFlags::SQLITE_OPEN_URI
                | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )
        .map_err(StorageError::sqlite)?;
        apply_scan_pragmas(&conn)?;
        conn.query_row("SELECT count(*) FROM sqlite_master", [], |row| row.get::<_, i64>(0))
            .map_err(|e| StorageError::SqliteError {
                message: format!("{} is not a readable SQLite store: {e}", path.display()),
            })?;

        tracing::debug!(
            path = %path.display(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "store opened read-only"
        );

        Ok(Self {
            conn,
            path: path.to_path_buf(),
        })
    }

    /// Borrow the underlying connection.
    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    /// Path the store was opened from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Log a heartbeat while SQLite is busy inside a long statement.
    /// Returns the shared tick counter.
    pub fn enable_progress_heartbeat(&self, steps: u32) -> Arc<AtomicU64> {
        install_progress_heartbeat(&self.conn, steps)
    }
}

impl std::fmt::Debug for StoreConnection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoreConnection")
            .field("path", &self.path)
            .finish()
    }
}
