//! Configuration management for the sensor network relay server
//!
//! Values are layered: built-in defaults, then an optional `config.toml`,
//! then `SNS_`-prefixed environment variables (e.g. `SNS_BIND_PORT=9000`).

use config::{Config, Environment, File};
use serde::Deserialize;
use std::time::Duration;

use crate::protocol::messages::MAX_NAME_LEN;

pub const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0";
pub const DEFAULT_BIND_PORT: u16 = 8123;
pub const DEFAULT_STALENESS_THRESHOLD_SECONDS: u64 = 20;
pub const DEFAULT_RECV_BUFFER_SIZE: usize = 512;

/// Largest valid incoming datagram: a REGISTER with a 255-byte name.
pub const MIN_RECV_BUFFER_SIZE: usize = 2 + MAX_NAME_LEN;

/// Server lifetime configuration. Changes require a restart.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// IP address the UDP socket binds to
    pub bind_address: String,

    /// UDP port the server listens on
    pub bind_port: u16,

    /// Peers silent for at least this many seconds are evicted on the next broadcast
    pub staleness_threshold_seconds: u64,

    /// Size of the receive buffer; longer datagrams are truncated
    pub recv_buffer_size: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: DEFAULT_BIND_ADDRESS.to_string(),
            bind_port: DEFAULT_BIND_PORT,
            staleness_threshold_seconds: DEFAULT_STALENESS_THRESHOLD_SECONDS,
            recv_buffer_size: DEFAULT_RECV_BUFFER_SIZE,
        }
    }
}

impl ServerConfig {
    /// Load configuration from `config.toml` (if present) with environment overrides
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from("config")
    }

    /// Load configuration from the file stem `path` (if present) with environment overrides
    pub fn load_from(path: &str) -> Result<Self, config::ConfigError> {
        let settings = Config::builder()
            .set_default("bind_address", DEFAULT_BIND_ADDRESS)?
            .set_default("bind_port", i64::from(DEFAULT_BIND_PORT))?
            .set_default(
                "staleness_threshold_seconds",
                DEFAULT_STALENESS_THRESHOLD_SECONDS as i64,
            )?
            .set_default("recv_buffer_size", DEFAULT_RECV_BUFFER_SIZE as i64)?
            .add_source(File::with_name(path).required(false))
            .add_source(Environment::with_prefix("SNS").try_parsing(true))
            .build()?;

        let config: ServerConfig = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Validation for all configuration values
    pub fn validate(&self) -> Result<(), config::ConfigError> {
        if self.bind_address.trim().is_empty() {
            return Err(config::ConfigError::Message(
                "bind_address cannot be empty".into(),
            ));
        }

        if self.bind_port == 0 {
            return Err(config::ConfigError::Message(
                "bind_port cannot be 0".into(),
            ));
        }

        if self.staleness_threshold_seconds == 0 {
            return Err(config::ConfigError::Message(
                "staleness_threshold_seconds must be greater than 0".into(),
            ));
        }

        // a REGISTER carrying the longest name: tag, length byte, name
        if self.recv_buffer_size < MIN_RECV_BUFFER_SIZE {
            return Err(config::ConfigError::Message(format!(
                "recv_buffer_size must be at least {} bytes",
                MIN_RECV_BUFFER_SIZE
            )));
        }

        Ok(())
    }

    /// Get bind address and port as a socket address string
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.bind_address, self.bind_port)
    }

    /// Get the staleness threshold as Duration
    pub fn staleness_threshold(&self) -> Duration {
        Duration::from_secs(self.staleness_threshold_seconds)
    }
}
