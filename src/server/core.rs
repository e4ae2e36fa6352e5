//! Module `core`
//!
//! Defines `Server`, the owner of the client registry and the receive loop
//! that feeds each datagram through decode, selection and execution.

use log::{debug, info, warn};
use std::future::Future;
use std::io;
use std::net::SocketAddr;
use std::time::{Duration, Instant};
use tokio::net::UdpSocket;

use crate::client::ClientRegistry;
use crate::config::{DEFAULT_RECV_BUFFER_SIZE, MIN_RECV_BUFFER_SIZE, ServerConfig};
use crate::error::ServerError;
use crate::protocol::decode;
use crate::relay::{ExecutionResult, execute_operation, select_operation};
use crate::transport::Transport;

/// Sensor network relay server.
///
/// The server is the sole owner of its [`ClientRegistry`]. Datagrams are
/// handled one at a time, each fully decoded, classified and executed
/// (including any fan-out) before the next is read, so registry mutations
/// follow arrival order.
pub struct Server<T: Transport> {
    transport: T,
    registry: ClientRegistry,
    staleness_threshold: Duration,
    recv_buffer_size: usize,
}

impl Server<UdpSocket> {
    /// Binds a UDP socket at the configured address.
    pub async fn bind(config: &ServerConfig) -> Result<Self, ServerError> {
        let addr = config.socket_addr();
        let socket = UdpSocket::bind(&addr)
            .await
            .map_err(|source| ServerError::Bind {
                addr: addr.clone(),
                source,
            })?;

        info!("Server bound to {}", addr);

        Ok(Self::new(socket, config.staleness_threshold())
            .with_recv_buffer_size(config.recv_buffer_size))
    }
}

impl<T: Transport> Server<T> {
    pub fn new(transport: T, staleness_threshold: Duration) -> Self {
        Self {
            transport,
            registry: ClientRegistry::new(),
            staleness_threshold,
            recv_buffer_size: DEFAULT_RECV_BUFFER_SIZE,
        }
    }

    /// Sets the receive buffer size, raised to the largest valid datagram if smaller.
    pub fn with_recv_buffer_size(mut self, size: usize) -> Self {
        self.recv_buffer_size = size.max(MIN_RECV_BUFFER_SIZE);
        self
    }

    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.transport.local_addr()
    }

    /// Read-only view of the live clients.
    pub fn registry(&self) -> &ClientRegistry {
        &self.registry
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Processes one datagram received now.
    pub fn handle_datagram(&mut self, data: &[u8], peer: SocketAddr) -> ExecutionResult {
        self.handle_datagram_at(data, peer, Instant::now())
    }

    /// Processes one datagram as if it arrived at `now`.
    pub fn handle_datagram_at(
        &mut self,
        data: &[u8],
        peer: SocketAddr,
        now: Instant,
    ) -> ExecutionResult {
        let message = decode(data);
        let operation = select_operation(&message, self.registry.is_live(&peer));
        debug!(
            "Received {} ({} bytes) from {}: {}",
            message.kind(),
            data.len(),
            peer,
            operation
        );

        execute_operation(
            operation,
            &message,
            peer,
            &mut self.registry,
            &self.transport,
            now,
            self.staleness_threshold,
        )
    }

    /// Runs the receive loop until `shutdown` resolves.
    ///
    /// Receive errors are logged and the loop keeps going. Once shutdown is
    /// signalled no further datagrams are read; the registry is discarded
    /// with the server.
    pub async fn run<F>(&mut self, shutdown: F) -> Result<(), ServerError>
    where
        F: Future<Output = ()>,
    {
        let local = self.local_addr()?;
        info!(
            "Starting sensor network server on {} (staleness threshold {:?})",
            local, self.staleness_threshold
        );

        tokio::pin!(shutdown);
        let mut buf = vec![0u8; self.recv_buffer_size];

        loop {
            let received = tokio::select! {
                _ = &mut shutdown => break,
                received = self.transport.recv_datagram(&mut buf) => received,
            };

            match received {
                Ok((n, peer)) => {
                    self.handle_datagram(&buf[..n], peer);
                }
                Err(e) => {
                    warn!("Error receiving datagram: {}", e);
                }
            }
        }

        info!(
            "Sensor network server on {} stopped ({} clients dropped)",
            local,
            self.registry.len()
        );
        Ok(())
    }
}
