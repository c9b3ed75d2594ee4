//! UDP Transport for DNS queries (RFC 1035 §4.2.1)
//!
//! Messages are sent as-is (no framing). The receive buffer is sized to the
//! EDNS(0) payload we advertise; a response with the TC bit set is retried
//! over TCP by the caller.

use super::{io_error, timeout_error, DnsTransport, TransportResponse};
use async_trait::async_trait;
use rootwalk_domain::DomainError;
use std::net::{Ipv4Addr, Ipv6Addr, SocketAddr};
use std::time::Duration;
use tokio::net::UdpSocket;
use tracing::{debug, warn};

/// Smallest buffer ever used, the classic DNS UDP limit.
const MIN_UDP_RESPONSE_SIZE: usize = 512;

/// DNS over UDP transport
pub struct UdpTransport {
    server_addr: SocketAddr,
    max_response_size: usize,
}

impl UdpTransport {
    pub fn new(server_addr: SocketAddr, max_response_size: usize) -> Self {
        Self {
            server_addr,
            max_response_size: max_response_size.max(MIN_UDP_RESPONSE_SIZE),
        }
    }

    fn bind_addr(&self) -> SocketAddr {
        if self.server_addr.is_ipv4() {
            SocketAddr::from((Ipv4Addr::UNSPECIFIED, 0))
        } else {
            SocketAddr::from((Ipv6Addr::UNSPECIFIED, 0))
        }
    }

    /// Waits for a datagram from the queried server, dropping anything else.
    async fn receive(&self, socket: &UdpSocket) -> Result<Vec<u8>, DomainError> {
        let mut recv_buf = vec![0u8; self.max_response_size];

        loop {
            let (bytes_received, from_addr) = socket
                .recv_from(&mut recv_buf)
                .await
                .map_err(|e| io_error(self.server_addr, "Failed to receive UDP response from", e))?;

            if from_addr != self.server_addr {
                warn!(
                    expected = %self.server_addr,
                    received_from = %from_addr,
                    "UDP response from unexpected source, ignoring"
                );
                continue;
            }

            recv_buf.truncate(bytes_received);
            return Ok(recv_buf);
        }
    }
}

#[async_trait]
impl DnsTransport for UdpTransport {
    async fn send(
        &self,
        message_bytes: &[u8],
        timeout: Duration,
    ) -> Result<TransportResponse, DomainError> {
        let socket = UdpSocket::bind(self.bind_addr())
            .await
            .map_err(|e| DomainError::IoError(format!("Failed to bind UDP socket: {}", e)))?;

        let bytes_sent =
            tokio::time::timeout(timeout, socket.send_to(message_bytes, self.server_addr))
                .await
                .map_err(|_| timeout_error(self.server_addr))?
                .map_err(|e| io_error(self.server_addr, "Failed to send UDP query to", e))?;

        debug!(
            server = %self.server_addr,
            bytes_sent = bytes_sent,
            "UDP query sent"
        );

        let bytes = tokio::time::timeout(timeout, self.receive(&socket))
            .await
            .map_err(|_| timeout_error(self.server_addr))??;

        debug!(
            server = %self.server_addr,
            bytes_received = bytes.len(),
            "UDP response received"
        );

        Ok(TransportResponse {
            bytes,
            protocol_used: "UDP",
        })
    }

    fn protocol_name(&self) -> &'static str {
        "UDP"
    }
}
