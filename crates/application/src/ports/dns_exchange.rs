use async_trait::async_trait;
use rootwalk_domain::{DnsMessage, DomainError, DomainName, RecordType, ServerAddress};
use std::fmt;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueryProtocol {
    Udp,
    Tcp,
}

impl QueryProtocol {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Udp => "udp",
            Self::Tcp => "tcp",
        }
    }
}

impl fmt::Display for QueryProtocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single non-recursive question sent to one server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryRequest {
    pub name: DomainName,
    pub record_type: RecordType,
    pub protocol: QueryProtocol,
    pub timeout: Duration,
    /// Set the EDNS DO bit so signed zones return RRSIG and DS material.
    pub dnssec_ok: bool,
}

impl QueryRequest {
    pub fn udp(name: DomainName, record_type: RecordType, timeout: Duration) -> Self {
        Self {
            name,
            record_type,
            protocol: QueryProtocol::Udp,
            timeout,
            dnssec_ok: false,
        }
    }

    pub fn tcp(name: DomainName, record_type: RecordType, timeout: Duration) -> Self {
        Self {
            name,
            record_type,
            protocol: QueryProtocol::Tcp,
            timeout,
            dnssec_ok: false,
        }
    }

    pub fn with_dnssec_ok(mut self) -> Self {
        self.dnssec_ok = true;
        self
    }

    /// Same question, different name.
    pub fn for_name(&self, name: DomainName) -> Self {
        Self {
            name,
            ..self.clone()
        }
    }
}

/// Sends one query to one server and returns the decoded response.
///
/// Implementations report transport, decode and rcode problems as the
/// server-local variants of [`DomainError`] so callers can move on to the
/// next candidate.
#[async_trait]
pub trait DnsExchange: Send + Sync {
    async fn query(
        &self,
        server: &ServerAddress,
        request: &QueryRequest,
    ) -> Result<DnsMessage, DomainError>;
}
