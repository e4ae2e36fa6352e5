pub mod client;
pub mod config;
pub mod error;
pub mod protocol;
pub mod relay;
pub mod sensor;
pub mod server;
pub mod transport;

pub use crate::config::ServerConfig;
pub use crate::error::ServerError;
pub use crate::sensor::SensorClient;
pub use crate::server::Server;
