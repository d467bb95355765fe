//! Test fixture builder for CVEfixes-shaped SQLite stores.
//!
//! Mirrors the column layout of the real store, including its habit of keeping
//! line numbers and counts as TEXT. Helpers panic on failure; this crate is
//! only ever a dev-dependency.

use std::path::{Path, PathBuf};

use rusqlite::{params, Connection};
use tempfile::TempDir;

const SCHEMA: &str = "
CREATE TABLE fixes (cve_id TEXT, hash TEXT, repo_url TEXT);
CREATE TABLE commits (
    hash TEXT, repo_url TEXT, author TEXT, author_date TEXT, msg TEXT
);
CREATE TABLE repository (repo_url TEXT, repo_name TEXT);
CREATE TABLE cwe_classification (cve_id TEXT, cwe_id TEXT);
CREATE TABLE cwe (cwe_id TEXT, cwe_name TEXT);
CREATE TABLE file_change (
    file_change_id TEXT, hash TEXT, filename TEXT, old_path TEXT, new_path TEXT,
    change_type TEXT, programming_language TEXT,
    num_lines_added TEXT, num_lines_deleted TEXT
);
CREATE TABLE method_change (
    method_change_id TEXT, file_change_id TEXT, name TEXT, signature TEXT,
    parameters TEXT, start_line TEXT, end_line TEXT, code TEXT, before_change TEXT
);
";

/// A writable fixture store. Drop it (or call [`FixtureStore::finish`])
/// before opening the file read-only elsewhere.
pub struct FixtureStore {
    conn: Connection,
    path: PathBuf,
}

/// One method revision row.
#[derive(Debug, Clone)]
pub struct MethodRow<'a> {
    pub id: &'a str,
    pub file_change_id: &'a str,
    pub name: &'a str,
    pub signature: Option<&'a str>,
    pub before: bool,
    pub code: Option<&'a str>,
}

impl FixtureStore {
    /// Create a store with the full schema at `path`.
    pub fn create(path: &Path) -> Self {
        let conn = Connection::open(path)
            .unwrap_or_else(|e| panic!("Failed to create fixture store {}: {e}", path.display()));
        conn.execute_batch(SCHEMA)
            .unwrap_or_else(|e| panic!("Failed to create fixture schema: {e}"));
        Self {
            conn,
            path: path.to_path_buf(),
        }
    }

    /// Create a store inside a fresh temp dir. Keep the `TempDir` alive.
    pub fn temp() -> (TempDir, Self) {
        let dir = TempDir::new().unwrap_or_else(|e| panic!("Failed to create temp dir: {e}"));
        let store = Self::create(&dir.path().join("CVEfixes.db"));
        (dir, store)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Direct access for tests that need odd rows.
    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    /// Close the writer and return the store path.
    pub fn finish(self) -> PathBuf {
        self.path
    }

    /// A fix commit for `cve_id`, with its commit and repository rows.
    /// `cwe` adds a classification (and catalog name when given).
    pub fn add_fix(&self, cve_id: &str, hash: &str, cwe: Option<(&str, Option<&str>)>) {
        let repo_url = format!("https://github.com/acme/{hash}");
        self.exec(
            "INSERT INTO fixes (cve_id, hash, repo_url) VALUES (?1, ?2, ?3)",
            params![cve_id, hash, repo_url],
        );
        self.exec(
            "INSERT INTO commits (hash, repo_url, author, author_date, msg)
             VALUES (?1, ?2, 'alice', '2021-03-04 10:00:00+00:00', ?3)",
            params![hash, repo_url, format!("fix {cve_id}")],
        );
        self.exec(
            "INSERT INTO repository (repo_url, repo_name) VALUES (?1, ?2)",
            params![repo_url, format!("acme/{hash}")],
        );
        if let Some((cwe_id, cwe_name)) = cwe {
            self.exec(
                "INSERT INTO cwe_classification (cve_id, cwe_id) VALUES (?1, ?2)",
                params![cve_id, cwe_id],
            );
            if let Some(name) = cwe_name {
                self.exec(
                    "INSERT INTO cwe (cwe_id, cwe_name) VALUES (?1, ?2)",
                    params![cwe_id, name],
                );
            }
        }
    }

    /// A modified file in commit `hash`.
    pub fn add_file_change(&self, file_change_id: &str, hash: &str, language: &str, path: &str) {
        let filename = path.rsplit('/').next().unwrap_or(path);
        self.exec(
            "INSERT INTO file_change (file_change_id, hash, filename, old_path, new_path,
                                      change_type, programming_language,
                                      num_lines_added, num_lines_deleted)
             VALUES (?1, ?2, ?3, ?4, ?4, 'ModificationType.MODIFY', ?5, '3', '1')",
            params![file_change_id, hash, filename, path, language],
        );
    }

    pub fn add_method(&self, row: &MethodRow<'_>) {
        self.exec(
            "INSERT INTO method_change (method_change_id, file_change_id, name, signature,
                                        parameters, start_line, end_line, code, before_change)
             VALUES (?1, ?2, ?3, ?4, '[]', '10', '20', ?5, ?6)",
            params![
                row.id,
                row.file_change_id,
                row.name,
                row.signature,
                row.code,
                if row.before { "True" } else { "False" },
            ],
        );
    }

    /// A before/after pair for `name` in `file_change_id`.
    /// Row ids are `<file_change_id>-<name>-b` and `-a`.
    pub fn add_method_pair(&self, file_change_id: &str, name: &str, before: &str, after: &str) {
        let before_id = format!("{file_change_id}-{name}-b");
        let after_id = format!("{file_change_id}-{name}-a");
        self.add_method(&MethodRow {
            id: &before_id,
            file_change_id,
            name,
            signature: None,
            before: true,
            code: Some(before),
        });
        self.add_method(&MethodRow {
            id: &after_id,
            file_change_id,
            name,
            signature: None,
            before: false,
            code: Some(after),
        });
    }

    fn exec(&self, sql: &str, params: impl rusqlite::Params) {
        self.conn
            .execute(sql, params)
            .unwrap_or_else(|e| panic!("Fixture insert failed: {e}\n{sql}"));
    }
}
