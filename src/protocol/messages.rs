//! Module `messages`
//!
//! Defines the datagram type tags and the decoded message forms exchanged
//! between sensor clients and the relay server.

/// Decode fallback, never sent on the wire.
pub const TYPE_UNKNOWN: u8 = 0;
pub const TYPE_REGISTER: u8 = 1;
pub const TYPE_UNREGISTER: u8 = 2;
pub const TYPE_KEEPALIVE: u8 = 3;
pub const TYPE_EVENT: u8 = 4;
/// Server-to-client relay of another peer's event. Outgoing only.
pub const TYPE_RELAY: u8 = 5;

/// Size of the opaque event timestamp carried by EVENT and RELAY.
pub const TIMESTAMP_LEN: usize = 8;

/// Names are length-prefixed with a single byte.
pub const MAX_NAME_LEN: usize = u8::MAX as usize;

/// Smallest well-formed RELAY datagram: tag, timestamp and name length.
pub const RELAY_HEADER_LEN: usize = 1 + TIMESTAMP_LEN + 1;

/// Opaque event timestamp. The server never interprets it.
pub type Timestamp = [u8; TIMESTAMP_LEN];

/// An incoming datagram after decoding.
///
/// Anything that cannot be interpreted decodes to `Unknown`; decoding never
/// fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    Unknown,
    Register { name: String },
    Unregister,
    Keepalive,
    Event { timestamp: Timestamp },
}

impl Message {
    /// Short label used in log lines.
    pub fn kind(&self) -> &'static str {
        match self {
            Message::Unknown => "UNKNOWN",
            Message::Register { .. } => "REGISTER",
            Message::Unregister => "UNREGISTER",
            Message::Keepalive => "KEEPALIVE",
            Message::Event { .. } => "EVENT",
        }
    }
}

/// A relayed event as received by a sensor client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Relay {
    pub timestamp: Timestamp,
    pub name: String,
}

impl Relay {
    /// Interprets the timestamp the way the reference clients write it:
    /// big-endian seconds since the Unix epoch.
    pub fn timestamp_secs(&self) -> u64 {
        u64::from_be_bytes(self.timestamp)
    }
}
