//! Gateway session
//!
//! One task per connection owns the socket, the heartbeat timer, and the
//! session state; callers talk to it through [`SessionCommand`]s.

mod connection;
mod state;

pub(crate) use connection::{Session, SessionCommand};
pub use state::{ConnectionState, StateHandle};
