//! Broadcast fan-out
//!
//! Relays one peer's event to every other live peer. The staleness sweep of
//! the registry runs here and nowhere else.

use crate::client::ClientRegistry;
use crate::protocol::{Timestamp, encode_relay};
use crate::relay::BroadcastResult;
use crate::transport::Transport;
use log::{debug, warn};
use std::net::SocketAddr;
use std::time::{Duration, Instant};

/// Sends `origin`'s event to all live peers except `origin` itself.
///
/// Stale peers are evicted before the recipient set is taken, so they never
/// receive the relay. A failed send is logged and the fan-out continues.
/// Does nothing if `origin` is not registered.
pub fn broadcast<T: Transport>(
    transport: &T,
    registry: &mut ClientRegistry,
    origin: SocketAddr,
    timestamp: &Timestamp,
    now: Instant,
    staleness_threshold: Duration,
) -> BroadcastResult {
    let Some(name) = registry.name_of(&origin) else {
        debug!("Dropping broadcast from unregistered peer {}", origin);
        return BroadcastResult::default();
    };
    let payload = encode_relay(timestamp, name);

    let before = registry.len();
    let live = registry.prune_and_snapshot(now, staleness_threshold);
    let mut result = BroadcastResult {
        evicted: before - live.len(),
        ..BroadcastResult::default()
    };

    for record in live.iter().filter(|record| record.address() != origin) {
        match transport.send_datagram(&payload, record.address()) {
            Ok(_) => result.delivered += 1,
            Err(e) => {
                warn!(
                    "Failed to relay event to {} ({}): {}",
                    record.address(),
                    record.name(),
                    e
                );
                result.failed += 1;
            }
        }
    }

    result
}
