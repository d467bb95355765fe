//! The sample type every benchmark yields.

use serde::Serialize;

/// One labelled code snippet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Sample {
    /// Row index, export row plus side, or test name. Unique within its
    /// benchmark.
    pub id: String,
    /// Numeric CWE as text, `"-1"` when unknown.
    pub cwe_id: String,
    pub vulnerable: bool,
    pub code: String,
    /// Source file the code came from, when the benchmark has one.
    pub path: Option<String>,
}

/// Uniform access to a loaded benchmark.
pub trait Benchmark {
    fn name(&self) -> &str;

    fn samples(&self) -> &[Sample];

    fn len(&self) -> usize {
        self.samples().len()
    }

    fn is_empty(&self) -> bool {
        self.samples().is_empty()
    }
}

/// An index row before its code is loaded. `payload` carries whatever
/// the loader needs to materialize the sample later.
#[derive(Debug, Clone)]
pub(crate) struct Entry<T> {
    pub id: String,
    pub cwe: Option<u32>,
    pub vulnerable: bool,
    pub payload: T,
}

pub(crate) fn cwe_text(cwe: Option<u32>) -> String {
    cwe.map(|c| c.to_string()).unwrap_or_else(|| "-1".to_string())
}
