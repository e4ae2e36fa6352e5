//! Client management
//!
//! Tracks registered sensor clients and their liveness.

pub mod record;
pub mod registry;

pub use record::ClientRecord;
pub use registry::ClientRegistry;
