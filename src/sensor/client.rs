//! Module `client`
//!
//! Defines `SensorClient`, a UDP endpoint speaking the sensor network
//! protocol to a single relay server.

use log::{debug, info};
use std::future::Future;
use std::io;
use std::net::SocketAddr;
use std::time::Duration;
use tokio::net::{ToSocketAddrs, UdpSocket};
use tokio::time::{Instant, interval_at};

use crate::protocol::{
    Relay, decode_relay, encode_event, encode_keepalive, encode_register, encode_unregister,
};

/// How often a registered client should send a keepalive. Must stay below
/// the server's staleness threshold (20 s by default).
pub const KEEPALIVE_INTERVAL: Duration = Duration::from_secs(15);

/// Largest datagram a client expects: relay header plus a 255-byte name.
const RECV_BUFFER_SIZE: usize = 512;

pub struct SensorClient {
    socket: UdpSocket,
    server: SocketAddr,
}

impl SensorClient {
    /// Binds a local socket at `local` for talking to `server`.
    pub async fn bind<A: ToSocketAddrs>(local: A, server: SocketAddr) -> io::Result<Self> {
        let socket = UdpSocket::bind(local).await?;
        Ok(Self { socket, server })
    }

    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.socket.local_addr()
    }

    pub fn server_addr(&self) -> SocketAddr {
        self.server
    }

    pub async fn register(&self, name: &str) -> io::Result<()> {
        self.send(&encode_register(name)).await
    }

    pub async fn unregister(&self) -> io::Result<()> {
        self.send(&encode_unregister()).await
    }

    pub async fn keepalive(&self) -> io::Result<()> {
        self.send(&encode_keepalive()).await
    }

    /// Reports an event that happened at `timestamp` (seconds since the epoch).
    pub async fn event(&self, timestamp: u64) -> io::Result<()> {
        self.send(&encode_event(timestamp)).await
    }

    /// Sends a keepalive every [`KEEPALIVE_INTERVAL`] until `stop` resolves.
    ///
    /// Start it after registering; resolve `stop` before unregistering.
    pub async fn run_keepalive<F>(&self, stop: F) -> io::Result<()>
    where
        F: Future<Output = ()>,
    {
        self.run_keepalive_every(KEEPALIVE_INTERVAL, stop).await
    }

    /// Sends a keepalive every `period` until `stop` resolves. The first one
    /// goes out one `period` after the call, registration having just
    /// refreshed the client.
    pub async fn run_keepalive_every<F>(&self, period: Duration, stop: F) -> io::Result<()>
    where
        F: Future<Output = ()>,
    {
        tokio::pin!(stop);
        let mut ticker = interval_at(Instant::now() + period, period);

        loop {
            tokio::select! {
                _ = &mut stop => break,
                _ = ticker.tick() => self.keepalive().await?,
            }
        }

        info!("Stopped keepalives to {}", self.server);
        Ok(())
    }

    /// Sends raw bytes to the server.
    pub async fn send(&self, payload: &[u8]) -> io::Result<()> {
        self.socket.send_to(payload, self.server).await?;
        Ok(())
    }

    /// Waits for the next relay from the server.
    ///
    /// Datagrams from other senders and anything that does not decode as a
    /// relay are skipped.
    pub async fn recv_relay(&self) -> io::Result<Relay> {
        let mut buf = [0u8; RECV_BUFFER_SIZE];
        loop {
            let (n, from) = self.socket.recv_from(&mut buf).await?;
            if from != self.server {
                debug!("Ignoring datagram from unexpected sender {}", from);
                continue;
            }
            match decode_relay(&buf[..n]) {
                Some(relay) => return Ok(relay),
                None => debug!("Ignoring malformed relay ({} bytes)", n),
            }
        }
    }

    /// Waits for the next datagram from anyone, returning its raw bytes.
    pub async fn recv_raw(&self) -> io::Result<(Vec<u8>, SocketAddr)> {
        let mut buf = [0u8; RECV_BUFFER_SIZE];
        let (n, from) = self.socket.recv_from(&mut buf).await?;
        Ok((buf[..n].to_vec(), from))
    }
}
