use super::wire::{encode_record, parse_query, ParsedQuery};
use rootwalk_domain::{RecordType, ResourceRecord};
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream, UdpSocket};
use tokio::sync::oneshot;

/// What the mock server sends back for one (name, type).
#[derive(Debug, Clone, Default)]
pub struct Reply {
    pub rcode: u8,
    pub answers: Vec<ResourceRecord>,
    pub authority: Vec<ResourceRecord>,
    pub additional: Vec<ResourceRecord>,
    /// Over UDP, send an empty response with TC set.
    pub truncate_udp: bool,
    pub wrong_id: bool,
    pub silent: bool,
}

impl Reply {
    pub fn answer(records: Vec<ResourceRecord>) -> Self {
        Self {
            answers: records,
            ..Self::default()
        }
    }

    pub fn referral(authority: Vec<ResourceRecord>, glue: Vec<ResourceRecord>) -> Self {
        Self {
            authority,
            additional: glue,
            ..Self::default()
        }
    }

    pub fn rcode(rcode: u8) -> Self {
        Self {
            rcode,
            ..Self::default()
        }
    }

    pub fn silent() -> Self {
        Self {
            silent: true,
            ..Self::default()
        }
    }

    pub fn truncated_over_udp(mut self) -> Self {
        self.truncate_udp = true;
        self
    }

    pub fn with_wrong_id(mut self) -> Self {
        self.wrong_id = true;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReceivedQuery {
    pub name: String,
    pub qtype: u16,
    pub protocol: &'static str,
    pub recursion_desired: bool,
    pub dnssec_ok: bool,
}

#[derive(Default)]
struct Zone {
    replies: HashMap<(String, u16), Reply>,
    received: Vec<ReceivedQuery>,
}

/// Loopback DNS server answering UDP and TCP on the same port from a
/// scripted table. Unscripted questions get REFUSED.
pub struct MockDnsServer {
    addr: SocketAddr,
    zone: Arc<Mutex<Zone>>,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl MockDnsServer {
    pub async fn start() -> Result<Self, std::io::Error> {
        let (udp, tcp) = Self::bind_pair().await?;
        let addr = udp.local_addr()?;
        let zone = Arc::new(Mutex::new(Zone::default()));
        let (shutdown_tx, mut shutdown_rx) = oneshot::channel::<()>();

        let udp_zone = Arc::clone(&zone);
        let tcp_zone = Arc::clone(&zone);

        tokio::spawn(async move {
            let mut buf = vec![0u8; 4096];

            loop {
                tokio::select! {
                    _ = &mut shutdown_rx => {
                        break;
                    }
                    result = udp.recv_from(&mut buf) => {
                        if let Ok((len, peer)) = result {
                            if let Some(response) = Self::respond(&udp_zone, &buf[..len], "UDP") {
                                let _ = udp.send_to(&response, peer).await;
                            }
                        }
                    }
                    result = tcp.accept() => {
                        if let Ok((stream, _)) = result {
                            tokio::spawn(Self::serve_tcp(stream, Arc::clone(&tcp_zone)));
                        }
                    }
                }
            }
        });

        Ok(Self {
            addr,
            zone,
            shutdown_tx: Some(shutdown_tx),
        })
    }

    /// UDP and TCP sockets on one loopback port.
    async fn bind_pair() -> Result<(UdpSocket, TcpListener), std::io::Error> {
        let mut last_err = None;
        for _ in 0..16 {
            let udp = UdpSocket::bind("127.0.0.1:0").await?;
            match TcpListener::bind(udp.local_addr()?).await {
                Ok(tcp) => return Ok((udp, tcp)),
                Err(e) => last_err = Some(e),
            }
        }
        Err(last_err.unwrap_or_else(|| std::io::Error::other("no free port")))
    }

    async fn serve_tcp(mut stream: TcpStream, zone: Arc<Mutex<Zone>>) {
        let mut len_buf = [0u8; 2];
        if stream.read_exact(&mut len_buf).await.is_err() {
            return;
        }
        let mut query = vec![0u8; u16::from_be_bytes(len_buf) as usize];
        if stream.read_exact(&mut query).await.is_err() {
            return;
        }

        if let Some(response) = Self::respond(&zone, &query, "TCP") {
            let _ = stream
                .write_all(&(response.len() as u16).to_be_bytes())
                .await;
            let _ = stream.write_all(&response).await;
            let _ = stream.flush().await;
        }
    }

    fn respond(zone: &Mutex<Zone>, bytes: &[u8], protocol: &'static str) -> Option<Vec<u8>> {
        let query = parse_query(bytes)?;
        let reply = {
            let mut zone = zone.lock().unwrap();
            zone.received.push(ReceivedQuery {
                name: query.name.clone(),
                qtype: query.qtype,
                protocol,
                recursion_desired: query.recursion_desired,
                dnssec_ok: query.dnssec_ok,
            });
            zone.replies
                .get(&(query.name.clone(), query.qtype))
                .cloned()
                .unwrap_or_else(|| Reply::rcode(5))
        };

        if reply.silent {
            return None;
        }
        Some(Self::encode(&query, &reply, protocol == "UDP" && reply.truncate_udp))
    }

    fn encode(query: &ParsedQuery, reply: &Reply, truncated: bool) -> Vec<u8> {
        let id = if reply.wrong_id { !query.id } else { query.id };
        let empty: &[ResourceRecord] = &[];
        let sections: [&[ResourceRecord]; 3] = if truncated {
            [empty, empty, empty]
        } else {
            [
                reply.answers.as_slice(),
                reply.authority.as_slice(),
                reply.additional.as_slice(),
            ]
        };

        let mut response = Vec::with_capacity(512);
        response.extend_from_slice(&id.to_be_bytes());
        // QR + AA, plus TC when truncated
        response.push(0x84 | if truncated { 0x02 } else { 0x00 });
        response.push(reply.rcode & 0x0F);
        response.extend_from_slice(&1u16.to_be_bytes());
        for section in sections {
            response.extend_from_slice(&(section.len() as u16).to_be_bytes());
        }
        response.extend_from_slice(&query.question);
        for section in sections {
            for record in section {
                response.extend(encode_record(record));
            }
        }
        response
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    pub fn respond_to(&self, name: &str, record_type: RecordType, reply: Reply) {
        let name = if name.ends_with('.') {
            name.to_ascii_lowercase()
        } else {
            format!("{}.", name.to_ascii_lowercase())
        };
        self.zone
            .lock()
            .unwrap()
            .replies
            .insert((name, record_type.to_u16()), reply);
    }

    pub fn received(&self) -> Vec<ReceivedQuery> {
        self.zone.lock().unwrap().received.clone()
    }

    pub fn shutdown(mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

impl Drop for MockDnsServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}
