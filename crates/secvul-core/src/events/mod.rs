//! Export lifecycle events. Purely advisory: handlers observe progress but
//! cannot influence what gets written.

pub mod dispatcher;
pub mod handler;
pub mod types;

pub use dispatcher::EventDispatcher;
pub use handler::ExportEventHandler;
pub use types::*;
