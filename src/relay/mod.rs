//! Relay core
//!
//! Classifies each decoded datagram into an operation, applies it to the
//! client registry and fans events out to the other live peers.

pub mod broadcast;
pub mod executor;
pub mod operation;
pub mod results;

pub use broadcast::broadcast;
pub use executor::execute_operation;
pub use operation::{Operation, select_operation};
pub use results::{BroadcastResult, ExecutionResult};
