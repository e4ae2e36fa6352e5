//! Error handlers
//!
//! Provides error reporting for fatal server errors.

use crate::error::types::ServerError;
use log::error;

/// Log a relay server error
pub fn handle_error(err: &ServerError) {
    error!("Sensor network server error: {}", err);
}
