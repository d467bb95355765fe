//! secvul-storage: everything that talks to the vulnerability store.
//!
//! The store is only ever opened read-only. Queries are built from a
//! [`FilterSpec`](secvul_core::types::FilterSpec) with every filter value bound
//! as a parameter, and results are pulled in bounded pages.

pub mod connection;
pub mod pagination;
pub mod queries;

pub use connection::StoreConnection;
pub use pagination::RowPager;
pub use queries::method_pairs::{build_pair_query, PairQuery};
