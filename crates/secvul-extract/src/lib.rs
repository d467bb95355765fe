//! secvul-extract: turns the vulnerability store into a CSV of method pairs
//! whose before/after bodies differ by more than comments and whitespace.
//!
//! - [`normalizer`]: comment/whitespace-blind canonical form for comparison.
//! - [`sink`]: where accepted pairs go.
//! - [`pipeline`]: connect, query, page, filter, write.

pub mod normalizer;
pub mod pipeline;
pub mod sink;

pub use normalizer::{is_cosmetic_change, normalize_for_compare, strip_comments, CommentStyle};
pub use pipeline::{ExportPipeline, ExportStats};
pub use sink::{CsvSink, PairSink};
