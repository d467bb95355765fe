//! CVEfixes method benchmarks.
//!
//! Two sources: a prepared CSV with `code`, `vul` and `cwe_id` columns, or
//! a method-pair export, where every pair contributes its before body as a
//! vulnerable sample and its after body as a fixed one.
//!
//! Export samples are keyed by export row (`<row>-b`, `<row>-a`), not by
//! method change id: a pair repeats once per CWE of its fix and once per
//! extra revision under cross-product pairing.

use std::path::Path;

use secvul_core::errors::DatasetError;
use secvul_core::types::RevisionPair;
use secvul_extract::strip_comments;

use crate::sample::{cwe_text, Benchmark, Entry, Sample};
use crate::selection::Selection;
use crate::table::{parse_cwe, parse_flag, Table};

/// Prepared CSV, one method per row. Row numbers (from 0) are the ids.
#[derive(Debug, Clone)]
pub struct CveFixesCsv {
    name: String,
    samples: Vec<Sample>,
}

impl CveFixesCsv {
    /// `language` picks the comment syntax stripped from every body.
    pub fn load(
        path: &Path,
        language: Option<&str>,
        selection: &Selection,
    ) -> Result<Self, DatasetError> {
        let table = Table::read(path, &["code", "vul", "cwe_id"])?;
        let entries = table
            .rows
            .iter()
            .enumerate()
            .map(|(i, row)| {
                Ok(Entry {
                    id: i.to_string(),
                    cwe: parse_cwe(table.cell(row, "cwe_id")),
                    vulnerable: parse_flag("vul", table.cell(row, "vul"))?,
                    payload: table.cell(row, "code"),
                })
            })
            .collect::<Result<Vec<_>, DatasetError>>()?;

        let samples = selection
            .apply(entries)?
            .into_iter()
            .map(|e| Sample {
                id: e.id,
                cwe_id: cwe_text(e.cwe),
                vulnerable: e.vulnerable,
                code: strip_comments(e.payload, language),
                path: None,
            })
            .collect();

        Ok(Self {
            name: benchmark_name(path),
            samples,
        })
    }
}

impl Benchmark for CveFixesCsv {
    fn name(&self) -> &str {
        &self.name
    }

    fn samples(&self) -> &[Sample] {
        &self.samples
    }
}

/// Samples derived from a method-pair export file.
#[derive(Debug, Clone)]
pub struct CveFixesExport {
    name: String,
    samples: Vec<Sample>,
}

impl CveFixesExport {
    pub fn load(path: &Path, selection: &Selection) -> Result<Self, DatasetError> {
        let pairs = read_pairs(path)?;

        let mut entries = Vec::with_capacity(pairs.len() * 2);
        for (row, pair) in pairs.iter().enumerate() {
            let cwe = pair.cwe_id.as_deref().and_then(parse_cwe);
            let language = pair.programming_language.as_deref();
            let before_file = pair.old_path.clone().or_else(|| pair.new_path.clone());
            let after_file = pair.new_path.clone().or_else(|| pair.old_path.clone());
            entries.push(Entry {
                id: format!("{row}-b"),
                cwe,
                vulnerable: true,
                payload: (&pair.method_code_before, language, before_file),
            });
            entries.push(Entry {
                id: format!("{row}-a"),
                cwe,
                vulnerable: false,
                payload: (&pair.method_code_after, language, after_file),
            });
        }

        let samples = selection
            .apply(entries)?
            .into_iter()
            .map(|e| {
                let (code, language, path) = e.payload;
                Sample {
                    id: e.id,
                    cwe_id: cwe_text(e.cwe),
                    vulnerable: e.vulnerable,
                    code: strip_comments(code, language),
                    path,
                }
            })
            .collect();

        Ok(Self {
            name: benchmark_name(path),
            samples,
        })
    }
}

impl Benchmark for CveFixesExport {
    fn name(&self) -> &str {
        &self.name
    }

    fn samples(&self) -> &[Sample] {
        &self.samples
    }
}

fn read_pairs(path: &Path) -> Result<Vec<RevisionPair>, DatasetError> {
    let file = std::fs::File::open(path).map_err(|source| DatasetError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let mut reader = csv::Reader::from_reader(file);
    reader
        .deserialize::<RevisionPair>()
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| DatasetError::Csv {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
}

fn benchmark_name(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "cvefixes".to_string())
}
