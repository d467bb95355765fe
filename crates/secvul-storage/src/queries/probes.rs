//! Diagnostic queries run in verbose mode: table probes and query plans.

use rusqlite::{params_from_iter, Connection};
use secvul_core::errors::StorageError;

use super::method_pairs::PairQuery;

/// Tables the pair query cannot run without.
pub const REQUIRED_TABLES: [&str; 5] = [
    "method_change",
    "file_change",
    "fixes",
    "commits",
    "cwe_classification",
];

/// Touch each required table once. Fails on the first missing table.
pub fn probe_tables(conn: &Connection) -> Result<(), StorageError> {
    for table in REQUIRED_TABLES {
        // Table names come from the constant above, never from input.
        let sql = format!("SELECT 1 FROM {table} LIMIT 1");
        let mut stmt = conn.prepare(&sql).map_err(|e| StorageError::SqliteError {
            message: format!("probe of {table} failed: {e}"),
        })?;
        let mut rows = stmt.query([]).map_err(StorageError::sqlite)?;
        rows.next().map_err(StorageError::sqlite)?;
    }
    Ok(())
}

/// `EXPLAIN QUERY PLAN` for a built query, one detail string per plan row.
pub fn explain_query_plan(
    conn: &Connection,
    query: &PairQuery,
) -> Result<Vec<String>, StorageError> {
    let sql = format!("EXPLAIN QUERY PLAN {}", query.sql);
    let mut stmt = conn.prepare(&sql).map_err(StorageError::sqlite)?;
    let details = stmt
        .query_map(params_from_iter(query.params.iter()), |row| {
            row.get::<_, String>(3)
        })
        .map_err(StorageError::sqlite)?
        .collect::<Result<Vec<_>, _>>()
        .map_err(StorageError::sqlite)?;
    Ok(details)
}
