//! Server core functionality
//!
//! Owns the client registry and drives the receive loop that feeds every
//! datagram through decode, operation selection and execution.

pub mod core;

pub use core::Server;
