//! Core crate for secvul: shared types, errors, configuration, export events,
//! tracing setup, and constants. Every other crate in the workspace depends on it.

pub mod config;
pub mod constants;
pub mod errors;
pub mod events;
pub mod tracing;
pub mod types;
