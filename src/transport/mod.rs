//! Datagram transport
//!
//! The boundary between the relay core and the network: receive one datagram
//! with its sender, send one datagram to a peer. Sends are fire-and-forget and
//! never wait for socket readiness.

#[cfg(test)]
pub(crate) mod mock;

use std::future::Future;
use std::io;
use std::net::SocketAddr;
use tokio::net::UdpSocket;

pub trait Transport {
    /// Waits for the next datagram, copying it into `buf`.
    fn recv_datagram<'a>(
        &'a self,
        buf: &'a mut [u8],
    ) -> impl Future<Output = io::Result<(usize, SocketAddr)>> + Send + 'a;

    /// Best-effort, non-blocking send of `payload` to `peer`.
    fn send_datagram(&self, payload: &[u8], peer: SocketAddr) -> io::Result<usize>;

    fn local_addr(&self) -> io::Result<SocketAddr>;
}

impl Transport for UdpSocket {
    fn recv_datagram<'a>(
        &'a self,
        buf: &'a mut [u8],
    ) -> impl Future<Output = io::Result<(usize, SocketAddr)>> + Send + 'a {
        self.recv_from(buf)
    }

    fn send_datagram(&self, payload: &[u8], peer: SocketAddr) -> io::Result<usize> {
        self.try_send_to(payload, peer)
    }

    fn local_addr(&self) -> io::Result<SocketAddr> {
        UdpSocket::local_addr(self)
    }
}
