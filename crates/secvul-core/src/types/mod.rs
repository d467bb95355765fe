//! Value types shared by the query builder, the pipeline and the sink.

pub mod filter_spec;
pub mod revision_pair;

pub use filter_spec::{FilterSpec, PairingPolicy};
pub use revision_pair::{RevisionPair, COLUMNS};
