//! Query construction, row decoding and diagnostic queries.

pub mod decode;
pub mod method_pairs;
pub mod probes;
