//! Typed decoding of one result row into a [`RevisionPair`].
//!
//! The CVEfixes store keeps many numeric columns as TEXT, so integer columns
//! accept INTEGER, integral REAL, or numeric TEXT. Required columns that are
//! NULL fail here with `MalformedRow` instead of surfacing later in the sink.

use rusqlite::types::ValueRef;
use rusqlite::Row;
use secvul_core::errors::StorageError;
use secvul_core::types::{RevisionPair, COLUMNS};

/// Decode a row projected in [`COLUMNS`] order.
pub fn decode_revision_pair(row: &Row<'_>) -> Result<RevisionPair, StorageError> {
    Ok(RevisionPair {
        cve_id: required_text(row, 0)?,
        cwe_id: optional_text(row, 1)?,
        cwe_name: optional_text(row, 2)?,
        repo_url: optional_text(row, 3)?,
        repo_name: optional_text(row, 4)?,
        commit_hash: optional_text(row, 5)?,
        author: optional_text(row, 6)?,
        author_date: optional_text(row, 7)?,
        commit_msg: optional_text(row, 8)?,
        file_change_id: required_text(row, 9)?,
        filename: optional_text(row, 10)?,
        old_path: optional_text(row, 11)?,
        new_path: optional_text(row, 12)?,
        change_type: optional_text(row, 13)?,
        programming_language: optional_text(row, 14)?,
        file_num_lines_added: optional_int(row, 15)?,
        file_num_lines_deleted: optional_int(row, 16)?,
        before_method_change_id: required_text(row, 17)?,
        after_method_change_id: required_text(row, 18)?,
        method_name: required_text(row, 19)?,
        method_signature: optional_text(row, 20)?,
        method_parameters: optional_text(row, 21)?,
        before_start_line: optional_int(row, 22)?,
        before_end_line: optional_int(row, 23)?,
        after_start_line: optional_int(row, 24)?,
        after_end_line: optional_int(row, 25)?,
        method_code_before: required_text(row, 26)?,
        method_code_after: required_text(row, 27)?,
    })
}

fn value_at<'r>(row: &'r Row<'_>, idx: usize) -> Result<ValueRef<'r>, StorageError> {
    row.get_ref(idx).map_err(|e| StorageError::MalformedRow {
        column: COLUMNS[idx],
        message: e.to_string(),
    })
}

fn optional_text(row: &Row<'_>, idx: usize) -> Result<Option<String>, StorageError> {
    Ok(match value_at(row, idx)? {
        ValueRef::Null => None,
        ValueRef::Integer(i) => Some(i.to_string()),
        ValueRef::Real(f) => Some(f.to_string()),
        ValueRef::Text(bytes) | ValueRef::Blob(bytes) => {
            Some(String::from_utf8_lossy(bytes).into_owned())
        }
    })
}

fn required_text(row: &Row<'_>, idx: usize) -> Result<String, StorageError> {
    optional_text(row, idx)?.ok_or_else(|| StorageError::MalformedRow {
        column: COLUMNS[idx],
        message: "required value is NULL".to_string(),
    })
}

fn optional_int(row: &Row<'_>, idx: usize) -> Result<Option<i64>, StorageError> {
    match value_at(row, idx)? {
        ValueRef::Null => Ok(None),
        ValueRef::Integer(i) => Ok(Some(i)),
        ValueRef::Real(f) => integral(f).map(Some).ok_or_else(|| not_an_integer(idx, &f.to_string())),
        ValueRef::Text(bytes) | ValueRef::Blob(bytes) => {
            let text = String::from_utf8_lossy(bytes);
            parse_int_text(&text).map_err(|_| not_an_integer(idx, &text))
        }
    }
}

/// Empty text and the literal `None` (written by the store's exporter) read as NULL.
fn parse_int_text(text: &str) -> Result<Option<i64>, ()> {
    let trimmed = text.trim();
    if trimmed.is_empty() || trimmed == "None" {
        return Ok(None);
    }
    if let Ok(n) = trimmed.parse::<i64>() {
        return Ok(Some(n));
    }
    trimmed
        .parse::<f64>()
        .ok()
        .and_then(integral)
        .map(Some)
        .ok_or(())
}

fn integral(f: f64) -> Option<i64> {
    (f.is_finite() && f.fract() == 0.0).then_some(f as i64)
}

fn not_an_integer(idx: usize, value: &str) -> StorageError {
    StorageError::MalformedRow {
        column: COLUMNS[idx],
        message: format!("expected an integer, got {value:?}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_text_parses() {
        assert_eq!(parse_int_text("42"), Ok(Some(42)));
        assert_eq!(parse_int_text(" 7 "), Ok(Some(7)));
        assert_eq!(parse_int_text("12.0"), Ok(Some(12)));
    }

    #[test]
    fn empty_and_none_text_read_as_null() {
        assert_eq!(parse_int_text(""), Ok(None));
        assert_eq!(parse_int_text("None"), Ok(None));
    }

    #[test]
    fn garbage_text_is_rejected() {
        assert!(parse_int_text("ten").is_err());
        assert!(parse_int_text("1.5").is_err());
    }
}
