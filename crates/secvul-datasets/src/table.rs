//! CSV index files: open, check columns, parse label cells.

use std::fs;
use std::path::Path;

use csv::{Reader, ReaderBuilder, StringRecord, Trim};
use secvul_core::errors::DatasetError;

/// A parsed index file with header lookup by name.
pub(crate) struct Table {
    headers: StringRecord,
    pub rows: Vec<StringRecord>,
}

impl Table {
    /// Read the whole file. Header names are trimmed; `required` columns
    /// must all be present.
    pub fn read(path: &Path, required: &[&str]) -> Result<Self, DatasetError> {
        let mut reader = open(path)?;
        let headers = reader
            .headers()
            .map_err(|e| csv_err(path, e))?
            .clone();
        for column in required {
            if !headers.iter().any(|h| h == *column) {
                return Err(DatasetError::MissingColumn {
                    path: path.to_path_buf(),
                    column: column.to_string(),
                });
            }
        }
        let rows = reader
            .records()
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| csv_err(path, e))?;
        tracing::debug!(path = %path.display(), rows = rows.len(), "index read");
        Ok(Self { headers, rows })
    }

    /// Cell of `row` under `column`; empty when the row is short.
    pub fn cell<'r>(&self, row: &'r StringRecord, column: &str) -> &'r str {
        self.headers
            .iter()
            .position(|h| h == column)
            .and_then(|i| row.get(i))
            .unwrap_or("")
    }
}

fn open(path: &Path) -> Result<Reader<fs::File>, DatasetError> {
    let file = fs::File::open(path).map_err(|source| DatasetError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(ReaderBuilder::new()
        .has_headers(true)
        .trim(Trim::Headers)
        .flexible(true)
        .from_reader(file))
}

fn csv_err(path: &Path, e: csv::Error) -> DatasetError {
    DatasetError::Csv {
        path: path.to_path_buf(),
        message: e.to_string(),
    }
}

/// Truthy/falsy label cells as written by pandas and spreadsheet tools.
pub(crate) fn parse_flag(column: &str, value: &str) -> Result<bool, DatasetError> {
    match value.trim() {
        "1" | "1.0" | "True" | "true" | "TRUE" | "t" | "T" | "y" | "Y" | "yes" => Ok(true),
        "0" | "0.0" | "False" | "false" | "FALSE" | "f" | "F" | "n" | "N" | "no" => Ok(false),
        other => Err(DatasetError::InvalidValue {
            column: column.to_string(),
            value: other.to_string(),
        }),
    }
}

/// `CWE-79`, `CWE79` and `79` all give 79. Anything else is unknown.
pub(crate) fn parse_cwe(value: &str) -> Option<u32> {
    let value = value.trim();
    let digits = value
        .strip_prefix("CWE")
        .map(|rest| rest.trim_start_matches('-'))
        .unwrap_or(value);
    digits.parse().ok()
}

pub(crate) fn read_code(path: &Path) -> Result<String, DatasetError> {
    fs::read_to_string(path).map_err(|source| DatasetError::Io {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cwe_spellings() {
        assert_eq!(parse_cwe("CWE-79"), Some(79));
        assert_eq!(parse_cwe("CWE78"), Some(78));
        assert_eq!(parse_cwe(" 787 "), Some(787));
        assert_eq!(parse_cwe("NVD-CWE-Other"), None);
        assert_eq!(parse_cwe(""), None);
    }

    #[test]
    fn flags() {
        assert!(parse_flag("vul", "True").unwrap());
        assert!(!parse_flag("vul", "0").unwrap());
        assert!(parse_flag("vul", "maybe").is_err());
    }
}
