//! Bounded page fetching over a live result cursor.

pub mod pager;

pub use pager::RowPager;
