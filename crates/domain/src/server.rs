use std::fmt;
use std::net::{IpAddr, SocketAddr};

pub const DNS_PORT: u16 = 53;

/// A nameserver reachable by address literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ServerAddress {
    ip: IpAddr,
    port: u16,
}

impl ServerAddress {
    pub fn new(ip: IpAddr, port: u16) -> Self {
        Self { ip, port }
    }

    pub fn ip(&self) -> IpAddr {
        self.ip
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.ip, self.port)
    }
}

impl From<SocketAddr> for ServerAddress {
    fn from(addr: SocketAddr) -> Self {
        Self::new(addr.ip(), addr.port())
    }
}

impl fmt::Display for ServerAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.port == DNS_PORT {
            write!(f, "{}", self.ip)
        } else {
            write!(f, "{}", self.socket_addr())
        }
    }
}

/// Ordered candidate nameservers for the zone reached so far.
///
/// Order is preserved exactly as discovered; repeated addresses keep their
/// first position only.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServerSet {
    servers: Vec<ServerAddress>,
}

impl ServerSet {
    pub fn new(servers: impl IntoIterator<Item = ServerAddress>) -> Self {
        let mut unique: Vec<ServerAddress> = Vec::new();
        for server in servers {
            if !unique.contains(&server) {
                unique.push(server);
            }
        }
        Self { servers: unique }
    }

    pub fn single(server: ServerAddress) -> Self {
        Self {
            servers: vec![server],
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.servers.is_empty()
    }

    pub fn len(&self) -> usize {
        self.servers.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ServerAddress> {
        self.servers.iter()
    }

    pub fn first(&self) -> Option<&ServerAddress> {
        self.servers.first()
    }

    pub fn contains(&self, server: &ServerAddress) -> bool {
        self.servers.contains(server)
    }

    pub fn as_slice(&self) -> &[ServerAddress] {
        &self.servers
    }
}

impl FromIterator<ServerAddress> for ServerSet {
    fn from_iter<I: IntoIterator<Item = ServerAddress>>(iter: I) -> Self {
        Self::new(iter)
    }
}

impl<'a> IntoIterator for &'a ServerSet {
    type Item = &'a ServerAddress;
    type IntoIter = std::slice::Iter<'a, ServerAddress>;

    fn into_iter(self) -> Self::IntoIter {
        self.servers.iter()
    }
}

impl fmt::Display for ServerSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered: Vec<String> = self.servers.iter().map(ToString::to_string).collect();
        write!(f, "[{}]", rendered.join(", "))
    }
}
