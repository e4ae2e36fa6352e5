//! In-memory transport used by unit tests.

use super::Transport;
use std::collections::HashSet;
use std::future::Future;
use std::io;
use std::net::SocketAddr;
use std::sync::Mutex;
use tokio::sync::mpsc;

/// Records every send and replays queued datagrams on receive.
pub struct RecordingTransport {
    sent: Mutex<Vec<(SocketAddr, Vec<u8>)>>,
    failing: HashSet<SocketAddr>,
    inbox: tokio::sync::Mutex<mpsc::UnboundedReceiver<(Vec<u8>, SocketAddr)>>,
    outbox: mpsc::UnboundedSender<(Vec<u8>, SocketAddr)>,
}

impl RecordingTransport {
    pub fn new() -> Self {
        let (outbox, inbox) = mpsc::unbounded_channel();
        Self {
            sent: Mutex::new(Vec::new()),
            failing: HashSet::new(),
            inbox: tokio::sync::Mutex::new(inbox),
            outbox,
        }
    }

    /// Sends to `peer` will fail with `ConnectionRefused`.
    pub fn failing_for(mut self, peer: SocketAddr) -> Self {
        self.failing.insert(peer);
        self
    }

    /// Queues a datagram as if `peer` had sent it.
    pub fn push_incoming(&self, data: &[u8], peer: SocketAddr) {
        let _ = self.outbox.send((data.to_vec(), peer));
    }

    pub fn sent(&self) -> Vec<(SocketAddr, Vec<u8>)> {
        self.sent.lock().unwrap().clone()
    }

    pub fn sent_to(&self, peer: SocketAddr) -> Vec<Vec<u8>> {
        self.sent()
            .into_iter()
            .filter(|(addr, _)| *addr == peer)
            .map(|(_, data)| data)
            .collect()
    }
}

impl Transport for RecordingTransport {
    fn recv_datagram<'a>(
        &'a self,
        buf: &'a mut [u8],
    ) -> impl Future<Output = io::Result<(usize, SocketAddr)>> + Send + 'a {
        async move {
            let mut inbox = self.inbox.lock().await;
            match inbox.recv().await {
                Some((data, peer)) => {
                    let n = data.len().min(buf.len());
                    buf[..n].copy_from_slice(&data[..n]);
                    Ok((n, peer))
                }
                None => std::future::pending().await,
            }
        }
    }

    fn send_datagram(&self, payload: &[u8], peer: SocketAddr) -> io::Result<usize> {
        if self.failing.contains(&peer) {
            return Err(io::Error::new(
                io::ErrorKind::ConnectionRefused,
                "simulated send failure",
            ));
        }
        self.sent.lock().unwrap().push((peer, payload.to_vec()));
        Ok(payload.len())
    }

    fn local_addr(&self) -> io::Result<SocketAddr> {
        Ok(SocketAddr::from(([127, 0, 0, 1], 8123)))
    }
}
