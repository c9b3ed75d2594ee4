use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Invalid domain name: {0}")]
    InvalidDomainName(String),

    #[error("Unknown record type: {0}")]
    InvalidRecordType(String),

    #[error("Invalid DNS response: {0}")]
    InvalidDnsResponse(String),

    #[error("I/O error: {0}")]
    IoError(String),

    #[error("Transport timeout connecting to {server}")]
    TransportTimeout { server: String },

    #[error("Transport connection refused by {server}")]
    TransportConnectionRefused { server: String },

    #[error("Transport connection reset by {server}")]
    TransportConnectionReset { server: String },

    #[error("Server {server} refused the query ({rcode})")]
    ServerRefused { server: String, rcode: String },

    #[error("Delegation dead end at {zone}: no server produced a referral")]
    DelegationDeadEnd { zone: String },

    #[error("No authoritative server answered for {domain}")]
    NoAnswer { domain: String },

    #[error("DNSSEC not supported for {zone}")]
    DnssecNotSupported { zone: String },

    #[error("DNSSEC validation failed: {0}")]
    DnssecValidationFailed(String),

    #[error("Unsupported DS digest type: {0}")]
    UnsupportedDigestType(u8),

    #[error("Alias loop detected at {name}")]
    AliasLoop { name: String },

    #[error("Alias chain exceeded {limit} levels")]
    AliasDepthExceeded { limit: usize },

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl DomainError {
    /// True for failures scoped to a single server exchange.
    ///
    /// These are absorbed by moving on to the next candidate in the current
    /// server set; everything else aborts the enclosing resolution.
    pub fn is_server_local(&self) -> bool {
        matches!(
            self,
            DomainError::TransportTimeout { .. }
                | DomainError::TransportConnectionRefused { .. }
                | DomainError::TransportConnectionReset { .. }
                | DomainError::IoError(_)
                | DomainError::InvalidDnsResponse(_)
                | DomainError::ServerRefused { .. }
        )
    }

    /// True when a secure walk ran into a zone without usable DNSSEC material.
    pub fn is_dnssec_unsupported(&self) -> bool {
        matches!(self, DomainError::DnssecNotSupported { .. })
    }

    /// True when DNSSEC material was present but did not check out.
    pub fn is_dnssec_bogus(&self) -> bool {
        matches!(
            self,
            DomainError::DnssecValidationFailed(_) | DomainError::UnsupportedDigestType(_)
        )
    }
}
