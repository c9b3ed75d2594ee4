use crate::dnssec::{DnskeyRecord, DsRecord, RrsigRecord};
use crate::{DomainName, RecordData, RecordType, ResourceRecord};
use std::fmt;
use std::net::IpAddr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseCode {
    NoError,
    FormErr,
    ServFail,
    NXDomain,
    NotImp,
    Refused,
    Other(u16),
}

impl ResponseCode {
    pub fn from_u16(code: u16) -> Self {
        match code {
            0 => Self::NoError,
            1 => Self::FormErr,
            2 => Self::ServFail,
            3 => Self::NXDomain,
            4 => Self::NotImp,
            5 => Self::Refused,
            other => Self::Other(other),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NoError => "NOERROR",
            Self::FormErr => "FORMERR",
            Self::ServFail => "SERVFAIL",
            Self::NXDomain => "NXDOMAIN",
            Self::NotImp => "NOTIMP",
            Self::Refused => "REFUSED",
            Self::Other(_) => "UNKNOWN",
        }
    }

    /// Codes meaning the server declined to serve the query at all.
    /// NXDOMAIN is an answer, not a refusal.
    pub fn is_refusal(&self) -> bool {
        matches!(
            self,
            Self::FormErr | Self::ServFail | Self::NotImp | Self::Refused
        )
    }
}

impl fmt::Display for ResponseCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Other(code) => write!(f, "RCODE{}", code),
            known => f.write_str(known.as_str()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    pub name: DomainName,
    pub record_type: RecordType,
}

impl Question {
    pub fn new(name: DomainName, record_type: RecordType) -> Self {
        Self { name, record_type }
    }
}

impl fmt::Display for Question {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} IN {}", self.name, self.record_type)
    }
}

/// A decoded DNS response, reduced to what the resolver inspects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DnsMessage {
    pub id: u16,
    pub rcode: ResponseCode,
    pub authoritative: bool,
    pub truncated: bool,
    pub question: Option<Question>,
    pub answers: Vec<ResourceRecord>,
    pub authority: Vec<ResourceRecord>,
    pub additional: Vec<ResourceRecord>,
    pub wire_size: usize,
}

impl DnsMessage {
    pub fn empty(id: u16) -> Self {
        Self {
            id,
            rcode: ResponseCode::NoError,
            authoritative: false,
            truncated: false,
            question: None,
            answers: Vec::new(),
            authority: Vec::new(),
            additional: Vec::new(),
            wire_size: 0,
        }
    }

    pub fn has_answers(&self) -> bool {
        !self.answers.is_empty()
    }

    pub fn authority_starts_with_soa(&self) -> bool {
        self.authority
            .first()
            .is_some_and(|record| record.is_type(RecordType::SOA))
    }

    /// Address records from the additional section, in order of appearance.
    pub fn glue_addresses(&self, include_ipv6: bool) -> Vec<IpAddr> {
        self.additional
            .iter()
            .filter_map(ResourceRecord::address)
            .filter(|ip| include_ipv6 || ip.is_ipv4())
            .collect()
    }

    /// DS records the parent put into a referral's authority section for
    /// `zone`.
    pub fn delegation_signers(&self, zone: &DomainName) -> Vec<DsRecord> {
        self.authority
            .iter()
            .filter(|record| &record.name == zone)
            .filter_map(|record| match &record.data {
                RecordData::DS(ds) => Some(ds.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn dnskeys(&self) -> Vec<DnskeyRecord> {
        self.answers
            .iter()
            .filter_map(|record| match &record.data {
                RecordData::DNSKEY(key) => Some(key.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn rrsigs_covering(&self, record_type: RecordType) -> Vec<RrsigRecord> {
        self.answers
            .iter()
            .filter_map(|record| match &record.data {
                RecordData::RRSIG(sig) if sig.covers(record_type) => Some(sig.clone()),
                _ => None,
            })
            .collect()
    }
}
