//! Error types
//!
//! Defines the error type surfaced by server startup and the receive loop.

use std::fmt;
use std::io;

/// Relay server errors
#[derive(Debug)]
pub enum ServerError {
    /// The UDP socket could not be bound
    Bind { addr: String, source: io::Error },
    IoError(io::Error),
    Config(config::ConfigError),
}

impl fmt::Display for ServerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServerError::Bind { addr, source } => write!(f, "Failed to bind to {}: {}", addr, source),
            ServerError::IoError(e) => write!(f, "I/O error: {}", e),
            ServerError::Config(e) => write!(f, "Configuration error: {}", e),
        }
    }
}

impl std::error::Error for ServerError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ServerError::Bind { source, .. } => Some(source),
            ServerError::IoError(e) => Some(e),
            ServerError::Config(e) => Some(e),
        }
    }
}

impl From<io::Error> for ServerError {
    fn from(error: io::Error) -> Self {
        ServerError::IoError(error)
    }
}

impl From<config::ConfigError> for ServerError {
    fn from(error: config::ConfigError) -> Self {
        ServerError::Config(error)
    }
}
