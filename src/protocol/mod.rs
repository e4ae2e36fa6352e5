//! Sensor network protocol
//!
//! Message definitions and the binary wire codec shared by the server and
//! the sensor client.

pub mod codec;
pub mod messages;

pub use codec::{
    decode, decode_relay, encode_event, encode_keepalive, encode_register, encode_relay,
    encode_unregister, fit_name,
};
pub use messages::{Message, Relay, Timestamp};
