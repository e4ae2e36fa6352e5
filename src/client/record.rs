//! Module `record`
//!
//! Defines `ClientRecord`, the registry entry kept for each registered peer.

use std::net::SocketAddr;
use std::time::{Duration, Instant};

/// Registration state of a single peer.
///
/// The address and name are fixed when the record is created; only the
/// liveness timestamp changes afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientRecord {
    address: SocketAddr,
    name: String,
    last_seen: Instant,
}

impl ClientRecord {
    pub fn new(address: SocketAddr, name: String, now: Instant) -> Self {
        Self {
            address,
            name,
            last_seen: now,
        }
    }

    // --------------------
    // Getter methods
    // --------------------

    pub fn address(&self) -> SocketAddr {
        self.address
    }

    /// Display name given at registration.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Time of the last accepted register, keepalive or event from this peer.
    pub fn last_seen(&self) -> Instant {
        self.last_seen
    }

    /// Time elapsed since the peer was last heard from, saturating at zero.
    pub fn age(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.last_seen)
    }

    /// Returns whether the peer has been silent for at least `threshold`.
    pub fn is_stale(&self, now: Instant, threshold: Duration) -> bool {
        self.age(now) >= threshold
    }

    // --------------------
    // Setter methods
    // --------------------

    pub fn touch(&mut self, now: Instant) {
        self.last_seen = now;
    }
}
