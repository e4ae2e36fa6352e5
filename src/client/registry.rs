//! Client registry
//!
//! The authoritative map from peer address to registration state. Liveness
//! eviction happens only in [`ClientRegistry::prune_and_snapshot`], which the
//! broadcast path calls once per relayed event; there is no background sweep.

use crate::client::ClientRecord;
use log::debug;
use std::collections::HashMap;
use std::net::SocketAddr;
use std::time::{Duration, Instant};

/// Registry of live sensor clients, keyed by network address.
#[derive(Debug, Default)]
pub struct ClientRegistry {
    clients: HashMap<SocketAddr, ClientRecord>,
}

impl ClientRegistry {
    pub fn new() -> Self {
        Self {
            clients: HashMap::new(),
        }
    }

    pub fn is_live(&self, addr: &SocketAddr) -> bool {
        self.clients.contains_key(addr)
    }

    /// Registers `addr` under `name`, or refreshes it if already present.
    ///
    /// An existing record keeps its original name.
    pub fn insert_or_refresh(&mut self, addr: SocketAddr, name: &str, now: Instant) {
        self.clients
            .entry(addr)
            .and_modify(|record| record.touch(now))
            .or_insert_with(|| ClientRecord::new(addr, name.to_string(), now));
    }

    /// Updates the liveness timestamp of `addr`. No-op for unknown peers.
    pub fn refresh(&mut self, addr: &SocketAddr, now: Instant) {
        if let Some(record) = self.clients.get_mut(addr) {
            record.touch(now);
        }
    }

    pub fn remove(&mut self, addr: &SocketAddr) -> Option<ClientRecord> {
        self.clients.remove(addr)
    }

    pub fn get(&self, addr: &SocketAddr) -> Option<&ClientRecord> {
        self.clients.get(addr)
    }

    pub fn name_of(&self, addr: &SocketAddr) -> Option<&str> {
        self.clients.get(addr).map(ClientRecord::name)
    }

    /// Evicts every record silent for at least `threshold`, then returns the
    /// survivors. Returned order is unspecified.
    pub fn prune_and_snapshot(&mut self, now: Instant, threshold: Duration) -> Vec<ClientRecord> {
        self.clients.retain(|addr, record| {
            let stale = record.is_stale(now, threshold);
            if stale {
                debug!(
                    "Evicting stale client {} ({}), silent for {:?}",
                    addr,
                    record.name(),
                    record.age(now)
                );
            }
            !stale
        });

        self.clients.values().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.clients.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clients.is_empty()
    }
}
