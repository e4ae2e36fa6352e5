//! Operation executor
//!
//! Applies a selected operation to the registry. Per peer this is a two-state
//! machine: unregistered, registered. Broadcast and refresh are self-loops on
//! the registered state; ignore changes nothing.

use crate::client::ClientRegistry;
use crate::protocol::Message;
use crate::relay::{ExecutionResult, Operation, broadcast};
use crate::transport::Transport;
use log::{debug, info};
use std::net::SocketAddr;
use std::time::{Duration, Instant};

/// Executes `operation` for the datagram `message` received from `peer`.
///
/// # Arguments
///
/// * `operation` - Result of [`select_operation`](crate::relay::select_operation) for this datagram.
/// * `message` - The decoded datagram; supplies the name or event timestamp.
/// * `peer` - Sender address.
/// * `registry` - The server's client registry.
/// * `transport` - Used for the fan-out of broadcasts.
/// * `now` - Arrival time of the datagram.
/// * `staleness_threshold` - Silence after which a peer is evicted on broadcast.
pub fn execute_operation<T: Transport>(
    operation: Operation,
    message: &Message,
    peer: SocketAddr,
    registry: &mut ClientRegistry,
    transport: &T,
    now: Instant,
    staleness_threshold: Duration,
) -> ExecutionResult {
    match (operation, message) {
        (Operation::Register, Message::Register { name }) => {
            registry.insert_or_refresh(peer, name, now);
            info!(
                "Registered client {} as '{}' ({} live)",
                peer,
                name,
                registry.len()
            );
            ExecutionResult::new(operation)
        }
        (Operation::Refresh, _) => {
            registry.refresh(&peer, now);
            debug!("Refreshed client {}", peer);
            ExecutionResult::new(operation)
        }
        (Operation::Unregister, _) => {
            if let Some(record) = registry.remove(&peer) {
                info!(
                    "Unregistered client {} ('{}', {} live)",
                    peer,
                    record.name(),
                    registry.len()
                );
            }
            ExecutionResult::new(operation)
        }
        (Operation::Broadcast, Message::Event { timestamp }) => {
            registry.refresh(&peer, now);
            let result = broadcast(transport, registry, peer, timestamp, now, staleness_threshold);
            info!(
                "Relayed event from {} to {} peers ({} failed, {} evicted)",
                peer, result.delivered, result.failed, result.evicted
            );
            ExecutionResult {
                operation,
                broadcast: Some(result),
            }
        }
        (Operation::Ignore, _) => {
            debug!("Ignoring {} from {}", message.kind(), peer);
            ExecutionResult::new(Operation::Ignore)
        }
        _ => {
            debug!(
                "Operation {} does not apply to {} from {}",
                operation,
                message.kind(),
                peer
            );
            ExecutionResult::new(Operation::Ignore)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::relay::select_operation;
    use crate::transport::mock::RecordingTransport;

    const THRESHOLD: Duration = Duration::from_secs(20);

    fn addr(port: u16) -> SocketAddr {
        SocketAddr::from(([127, 0, 0, 1], port))
    }

    fn step(
        registry: &mut ClientRegistry,
        transport: &RecordingTransport,
        message: Message,
        peer: SocketAddr,
        now: Instant,
    ) -> ExecutionResult {
        let operation = select_operation(&message, registry.is_live(&peer));
        execute_operation(operation, &message, peer, registry, transport, now, THRESHOLD)
    }

    fn register(name: &str) -> Message {
        Message::Register {
            name: name.to_string(),
        }
    }

    #[test]
    fn test_register_refresh_unregister_cycle() {
        let transport = RecordingTransport::new();
        let mut registry = ClientRegistry::new();
        let t0 = Instant::now();

        let result = step(&mut registry, &transport, register("alice"), addr(1), t0);
        assert_eq!(result.operation, Operation::Register);
        assert!(registry.is_live(&addr(1)));

        let t1 = t0 + Duration::from_secs(3);
        let result = step(&mut registry, &transport, Message::Keepalive, addr(1), t1);
        assert_eq!(result.operation, Operation::Refresh);
        assert_eq!(registry.get(&addr(1)).unwrap().last_seen(), t1);

        let result = step(&mut registry, &transport, Message::Unregister, addr(1), t1);
        assert_eq!(result.operation, Operation::Unregister);
        assert!(registry.is_empty());
    }

    #[test]
    fn test_repeated_keepalives_track_latest() {
        let transport = RecordingTransport::new();
        let mut registry = ClientRegistry::new();
        let t0 = Instant::now();
        step(&mut registry, &transport, register("alice"), addr(1), t0);

        let mut last = t0;
        for secs in 1..=10 {
            last = t0 + Duration::from_secs(secs);
            let result = step(&mut registry, &transport, Message::Keepalive, addr(1), last);
            assert_eq!(result.operation, Operation::Refresh);
        }

        let record = registry.get(&addr(1)).unwrap();
        assert_eq!(record.last_seen(), last);
        assert_eq!(record.name(), "alice");
        assert_eq!(registry.len(), 1);
        assert!(transport.sent().is_empty());
    }

    #[test]
    fn test_keepalive_after_unregister_is_ignored() {
        let transport = RecordingTransport::new();
        let mut registry = ClientRegistry::new();
        let now = Instant::now();

        step(&mut registry, &transport, register("alice"), addr(1), now);
        step(&mut registry, &transport, Message::Unregister, addr(1), now);
        let result = step(&mut registry, &transport, Message::Keepalive, addr(1), now);

        assert_eq!(result.operation, Operation::Ignore);
        assert!(!registry.is_live(&addr(1)));
    }

    #[test]
    fn test_unregistered_peer_cannot_interact() {
        let transport = RecordingTransport::new();
        let mut registry = ClientRegistry::new();
        let now = Instant::now();
        step(&mut registry, &transport, register("bob"), addr(2), now);

        for message in [
            Message::Unknown,
            Message::Unregister,
            Message::Keepalive,
            Message::Event { timestamp: [9; 8] },
        ] {
            let result = step(&mut registry, &transport, message, addr(1), now);
            assert_eq!(result.operation, Operation::Ignore);
        }

        assert_eq!(registry.len(), 1);
        assert!(transport.sent().is_empty());
    }

    // Re-registration under a new name keeps the original name. This mirrors
    // the deployed server and may not be what clients expect.
    #[test]
    fn test_reregistration_refreshes_without_renaming() {
        let transport = RecordingTransport::new();
        let mut registry = ClientRegistry::new();
        let t0 = Instant::now();
        let t1 = t0 + Duration::from_secs(1);

        step(&mut registry, &transport, register("alice"), addr(1), t0);
        let result = step(&mut registry, &transport, register("alicia"), addr(1), t1);

        assert_eq!(result.operation, Operation::Refresh);
        assert_eq!(registry.name_of(&addr(1)), Some("alice"));
        assert_eq!(registry.get(&addr(1)).unwrap().last_seen(), t1);
    }

    #[test]
    fn test_event_refreshes_origin_before_sweep() {
        let transport = RecordingTransport::new();
        let mut registry = ClientRegistry::new();
        let t0 = Instant::now();
        step(&mut registry, &transport, register("alice"), addr(1), t0);
        step(&mut registry, &transport, register("bob"), addr(2), t0);

        // both peers are past the threshold, but alice speaks now
        let later = t0 + Duration::from_secs(25);
        let result = step(
            &mut registry,
            &transport,
            Message::Event { timestamp: [0; 8] },
            addr(1),
            later,
        );

        assert_eq!(result.operation, Operation::Broadcast);
        let fanout = result.broadcast.unwrap();
        assert_eq!(fanout.evicted, 1);
        assert_eq!(fanout.delivered, 0);
        assert!(registry.is_live(&addr(1)));
        assert!(!registry.is_live(&addr(2)));
    }

    #[test]
    fn test_mismatched_operation_is_ignored() {
        let transport = RecordingTransport::new();
        let mut registry = ClientRegistry::new();
        let now = Instant::now();

        let result = execute_operation(
            Operation::Register,
            &Message::Keepalive,
            addr(1),
            &mut registry,
            &transport,
            now,
            THRESHOLD,
        );

        assert_eq!(result.operation, Operation::Ignore);
        assert!(registry.is_empty());
    }
}
