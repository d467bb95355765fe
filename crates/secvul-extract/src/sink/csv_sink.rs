//! CSV sink: header row first, every field quoted, nulls as empty fields.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use csv::{QuoteStyle, Writer, WriterBuilder};
use secvul_core::errors::SinkError;
use secvul_core::types::{RevisionPair, COLUMNS};

use super::PairSink;

pub struct CsvSink<W: Write> {
    writer: Writer<W>,
    rows: u64,
}

impl CsvSink<BufWriter<File>> {
    /// Create (or truncate) the file at `path`, creating missing parent
    /// directories, and write the header row.
    pub fn create(path: &Path) -> Result<Self, SinkError> {
        let create_err = |source| SinkError::Create {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(create_err)?;
        }
        let file = File::create(path).map_err(create_err)?;
        let sink = Self::from_writer(BufWriter::new(file))?;
        tracing::debug!(path = %path.display(), "output created");
        Ok(sink)
    }
}

impl<W: Write> CsvSink<W> {
    /// Wrap any writer. The header row is written immediately.
    pub fn from_writer(inner: W) -> Result<Self, SinkError> {
        let mut writer = WriterBuilder::new()
            .quote_style(QuoteStyle::Always)
            .from_writer(inner);
        writer.write_record(COLUMNS).map_err(write_err)?;
        Ok(Self { writer, rows: 0 })
    }

    /// Data rows written so far (header excluded).
    pub fn rows_written(&self) -> u64 {
        self.rows
    }

    /// Flush and hand back the underlying writer.
    pub fn into_inner(self) -> Result<W, SinkError> {
        self.writer.into_inner().map_err(|e| SinkError::Flush {
            source: e.into_error(),
        })
    }
}

impl<W: Write> PairSink for CsvSink<W> {
    fn write_pair(&mut self, pair: &RevisionPair) -> Result<(), SinkError> {
        self.writer.write_record(pair.record()).map_err(write_err)?;
        self.rows += 1;
        Ok(())
    }

    fn flush(&mut self) -> Result<(), SinkError> {
        self.writer
            .flush()
            .map_err(|source| SinkError::Flush { source })
    }
}

fn write_err(e: csv::Error) -> SinkError {
    SinkError::Write {
        message: e.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair() -> RevisionPair {
        RevisionPair {
            cve_id: "CVE-2021-1".into(),
            file_change_id: "fc".into(),
            before_method_change_id: "b".into(),
            after_method_change_id: "a".into(),
            method_name: "m".into(),
            method_code_before: "x = \"q\";\ny();".into(),
            method_code_after: "z();".into(),
            ..Default::default()
        }
    }

    #[test]
    fn header_is_written_on_creation() {
        let sink = CsvSink::from_writer(Vec::new()).unwrap();
        let bytes = sink.into_inner().unwrap();
        let text = String::from_utf8(bytes).unwrap();
        assert!(text.starts_with("\"cve_id\",\"cwe_id\""));
        assert_eq!(text.lines().count(), 1);
    }

    #[test]
    fn every_field_is_quoted_and_nulls_are_empty() {
        let mut sink = CsvSink::from_writer(Vec::new()).unwrap();
        sink.write_pair(&pair()).unwrap();
        assert_eq!(sink.rows_written(), 1);
        let text = String::from_utf8(sink.into_inner().unwrap()).unwrap();

        let mut reader = csv::Reader::from_reader(text.as_bytes());
        let record = reader.records().next().unwrap().unwrap();
        assert_eq!(record.len(), COLUMNS.len());
        assert_eq!(&record[0], "CVE-2021-1");
        assert_eq!(&record[1], "");
        assert_eq!(&record[26], "x = \"q\";\ny();");
        assert!(text.contains("\"\",\"\""));
    }

    #[test]
    fn create_makes_parent_directories() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("nested/deeper/out.csv");
        let mut sink = CsvSink::create(&path).unwrap();
        sink.flush().unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("\"cve_id\""));
    }
}
