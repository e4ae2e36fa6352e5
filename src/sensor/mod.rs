//! Sensor client
//!
//! Client side of the protocol: registers with a relay server, keeps the
//! registration alive, reports events and reads relays of other peers' events.

pub mod client;

pub use client::{KEEPALIVE_INTERVAL, SensorClient};
