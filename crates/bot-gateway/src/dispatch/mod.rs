//! Event dispatch
//!
//! Routes Dispatch frames to user handlers by event name.

mod table;

pub use table::{ErrorHandler, EventHandler, EventHandlers};
