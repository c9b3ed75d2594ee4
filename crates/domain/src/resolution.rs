use crate::dnssec::DelegationSigner;
use crate::{DomainError, DomainName, Question, ResourceRecord, ServerAddress, ServerSet};

/// Where a walk stands after consuming some labels.
///
/// Every transition consumes the previous value and returns a new one, so a
/// zone's signers can only be the ones recorded when its parent referred to
/// it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolutionState {
    zone: DomainName,
    servers: ServerSet,
    signers: Vec<DelegationSigner>,
    authoritative: bool,
}

impl ResolutionState {
    pub fn at_root(servers: ServerSet) -> Self {
        Self {
            zone: DomainName::root(),
            servers,
            signers: Vec::new(),
            authoritative: false,
        }
    }

    /// The zone whose servers are currently held.
    pub fn zone(&self) -> &DomainName {
        &self.zone
    }

    pub fn labels_consumed(&self) -> usize {
        self.zone.label_count()
    }

    pub fn servers(&self) -> &ServerSet {
        &self.servers
    }

    /// DS material the parent published for `zone`.
    pub fn signers(&self) -> &[DelegationSigner] {
        &self.signers
    }

    pub fn is_authoritative(&self) -> bool {
        self.authoritative
    }

    /// Move one zone cut down, carrying the DS set the parent just asserted.
    pub fn descend(
        self,
        zone: DomainName,
        servers: ServerSet,
        signers: Vec<DelegationSigner>,
    ) -> Self {
        Self {
            zone,
            servers,
            signers,
            authoritative: false,
        }
    }

    /// Stop at `servers`, which answered for a name inside the current zone.
    /// The zone and its signers stay as they were.
    pub fn into_authoritative(self, servers: ServerSet) -> Self {
        Self {
            servers,
            authoritative: true,
            ..self
        }
    }

    /// Signers for the current zone, or `DnssecNotSupported` when the parent
    /// published none.
    pub fn require_signers(&self) -> Result<&[DelegationSigner], DomainError> {
        if self.signers.is_empty() {
            return Err(DomainError::DnssecNotSupported {
                zone: self.zone.to_string(),
            });
        }
        Ok(&self.signers)
    }

    pub fn into_servers(self) -> ServerSet {
        self.servers
    }
}

/// The outcome of a full resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DnsAnswer {
    pub question: Question,
    pub answers: Vec<ResourceRecord>,
    /// Wire size of the response to the top-level query.
    pub wire_size: usize,
    pub server: ServerAddress,
}
