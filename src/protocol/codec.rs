//! Wire codec
//!
//! Encodes and decodes the fixed binary datagram layouts. All offsets are
//! zero-based and multi-byte integers are big-endian.
//!
//! | Tag | Layout                                                   |
//! |-----|----------------------------------------------------------|
//! | 1   | `[1, L, name[L]]`                                        |
//! | 2   | `[2]`                                                    |
//! | 3   | `[3]`                                                    |
//! | 4   | `[4, ts[8]]`                                             |
//! | 5   | `[5, ts[8], M, name[M]]` (server to client only)         |

use crate::protocol::messages::{
    MAX_NAME_LEN, Message, RELAY_HEADER_LEN, Relay, TIMESTAMP_LEN, TYPE_EVENT, TYPE_KEEPALIVE,
    TYPE_REGISTER, TYPE_RELAY, TYPE_UNREGISTER, Timestamp,
};

/// Decodes an incoming datagram.
///
/// Unknown tags, truncated payloads and names that are not valid UTF-8 all
/// degrade to [`Message::Unknown`]. Bytes past the declared payload are ignored.
pub fn decode(data: &[u8]) -> Message {
    let Some((&tag, body)) = data.split_first() else {
        return Message::Unknown;
    };

    match tag {
        TYPE_REGISTER => decode_register(body),
        TYPE_UNREGISTER => Message::Unregister,
        TYPE_KEEPALIVE => Message::Keepalive,
        TYPE_EVENT => decode_event(body),
        _ => Message::Unknown,
    }
}

fn decode_register(body: &[u8]) -> Message {
    let Some((&len, rest)) = body.split_first() else {
        return Message::Unknown;
    };
    let Some(raw) = rest.get(..usize::from(len)) else {
        return Message::Unknown;
    };

    match std::str::from_utf8(raw) {
        Ok(name) => Message::Register {
            name: name.to_string(),
        },
        Err(_) => Message::Unknown,
    }
}

fn decode_event(body: &[u8]) -> Message {
    match read_timestamp(body) {
        Some(timestamp) => Message::Event { timestamp },
        None => Message::Unknown,
    }
}

fn read_timestamp(bytes: &[u8]) -> Option<Timestamp> {
    bytes.get(..TIMESTAMP_LEN)?.try_into().ok()
}

/// Returns the longest prefix of `name` that fits a one-byte length field
/// without splitting a UTF-8 character.
pub fn fit_name(name: &str) -> &str {
    if name.len() <= MAX_NAME_LEN {
        return name;
    }

    let mut end = MAX_NAME_LEN;
    while !name.is_char_boundary(end) {
        end -= 1;
    }
    &name[..end]
}

fn push_name(buf: &mut Vec<u8>, name: &str) {
    let name = fit_name(name);
    // fit_name guarantees the length fits in a byte
    buf.push(name.len() as u8);
    buf.extend_from_slice(name.as_bytes());
}

/// Builds the RELAY datagram sent to every other live peer when `name`
/// reports an event.
pub fn encode_relay(timestamp: &Timestamp, name: &str) -> Vec<u8> {
    let mut buf = Vec::with_capacity(RELAY_HEADER_LEN + name.len().min(MAX_NAME_LEN));
    buf.push(TYPE_RELAY);
    buf.extend_from_slice(timestamp);
    push_name(&mut buf, name);
    buf
}

/// Decodes a RELAY datagram on the client side.
pub fn decode_relay(data: &[u8]) -> Option<Relay> {
    if data.len() < RELAY_HEADER_LEN || data[0] != TYPE_RELAY {
        return None;
    }

    let timestamp = read_timestamp(&data[1..])?;
    let len = usize::from(data[1 + TIMESTAMP_LEN]);
    let raw = data.get(RELAY_HEADER_LEN..RELAY_HEADER_LEN + len)?;
    let name = std::str::from_utf8(raw).ok()?.to_string();

    Some(Relay { timestamp, name })
}

pub fn encode_register(name: &str) -> Vec<u8> {
    let mut buf = Vec::with_capacity(2 + name.len().min(MAX_NAME_LEN));
    buf.push(TYPE_REGISTER);
    push_name(&mut buf, name);
    buf
}

pub fn encode_unregister() -> Vec<u8> {
    vec![TYPE_UNREGISTER]
}

pub fn encode_keepalive() -> Vec<u8> {
    vec![TYPE_KEEPALIVE]
}

/// Builds an EVENT datagram carrying `timestamp` as big-endian bytes.
pub fn encode_event(timestamp: u64) -> Vec<u8> {
    let mut buf = Vec::with_capacity(1 + TIMESTAMP_LEN);
    buf.push(TYPE_EVENT);
    buf.extend_from_slice(&timestamp.to_be_bytes());
    buf
}
