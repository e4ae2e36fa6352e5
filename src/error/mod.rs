//! Error handling
//!
//! Defines error types and handling for the relay server. Only startup and
//! socket-level failures are errors; malformed or out-of-protocol datagrams
//! are absorbed by the codec and operation selector.

pub mod handlers;
pub mod types;

pub use handlers::handle_error;
pub use types::*;
