//! secvul-datasets: vulnerability benchmarks as flat lists of labelled
//! code samples.
//!
//! Every loader reads its index file, applies a [`Selection`], then reads
//! code only for the rows that survived.

pub mod cvefixes;
pub mod juliet;
pub mod owasp;
pub mod sample;
pub mod selection;
mod table;

pub use cvefixes::{CveFixesCsv, CveFixesExport};
pub use juliet::Juliet;
pub use owasp::Owasp;
pub use sample::{Benchmark, Sample};
pub use selection::{SampleOrder, Selection};
