//! Module `operation`
//!
//! Maps a decoded message and the sender's registration state to the
//! operation the server performs.

use crate::protocol::Message;
use std::fmt;

/// What the server does with one incoming datagram.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Ignore,
    Refresh,
    Register,
    Unregister,
    Broadcast,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Operation::Ignore => "ignore",
            Operation::Refresh => "refresh",
            Operation::Register => "register",
            Operation::Unregister => "unregister",
            Operation::Broadcast => "broadcast",
        };
        f.write_str(label)
    }
}

/// Selects the operation for `message` sent by a peer that is (or is not)
/// currently registered.
///
/// Unregistered peers may only register; everything else they send is
/// ignored. A REGISTER from a live peer only refreshes it.
pub fn select_operation(message: &Message, is_live_peer: bool) -> Operation {
    if is_live_peer {
        match message {
            Message::Register { .. } | Message::Keepalive => Operation::Refresh,
            Message::Event { .. } => Operation::Broadcast,
            Message::Unregister => Operation::Unregister,
            Message::Unknown => Operation::Ignore,
        }
    } else {
        match message {
            Message::Register { .. } => Operation::Register,
            _ => Operation::Ignore,
        }
    }
}
