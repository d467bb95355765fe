//! Sinks receive accepted revision pairs in scan order.

mod csv_sink;

pub use csv_sink::CsvSink;

use secvul_core::errors::SinkError;
use secvul_core::types::RevisionPair;

/// Destination for emitted pairs.
///
/// `flush` must make every previously written pair durable to whoever
/// reads the destination next; the pipeline calls it periodically and
/// once more at the end of a run.
pub trait PairSink {
    fn write_pair(&mut self, pair: &RevisionPair) -> Result<(), SinkError>;

    fn flush(&mut self) -> Result<(), SinkError>;
}

/// Collects pairs in memory. Handy for callers that post-process results
/// instead of writing a file.
impl PairSink for Vec<RevisionPair> {
    fn write_pair(&mut self, pair: &RevisionPair) -> Result<(), SinkError> {
        self.push(pair.clone());
        Ok(())
    }

    fn flush(&mut self) -> Result<(), SinkError> {
        Ok(())
    }
}
