use super::RecordType;
use crate::dnssec::{DnskeyRecord, DsRecord, RrsigRecord};
use crate::DomainName;
use std::fmt;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SoaData {
    pub mname: DomainName,
    pub rname: DomainName,
    pub serial: u32,
    pub refresh: i32,
    pub retry: i32,
    pub expire: i32,
    pub minimum: u32,
}

/// Record payloads the resolver inspects; everything else is carried as
/// presentation text for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordData {
    A(Ipv4Addr),
    AAAA(Ipv6Addr),
    NS(DomainName),
    CNAME(DomainName),
    SOA(SoaData),
    DS(DsRecord),
    DNSKEY(DnskeyRecord),
    RRSIG(RrsigRecord),
    Other { type_code: u16, text: String },
}

impl RecordData {
    pub fn type_code(&self) -> u16 {
        match self {
            RecordData::A(_) => RecordType::A.to_u16(),
            RecordData::AAAA(_) => RecordType::AAAA.to_u16(),
            RecordData::NS(_) => RecordType::NS.to_u16(),
            RecordData::CNAME(_) => RecordType::CNAME.to_u16(),
            RecordData::SOA(_) => RecordType::SOA.to_u16(),
            RecordData::DS(_) => RecordType::DS.to_u16(),
            RecordData::DNSKEY(_) => RecordType::DNSKEY.to_u16(),
            RecordData::RRSIG(_) => RecordType::RRSIG.to_u16(),
            RecordData::Other { type_code, .. } => *type_code,
        }
    }

    pub fn record_type(&self) -> Option<RecordType> {
        RecordType::from_u16(self.type_code())
    }
}

impl fmt::Display for RecordData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordData::A(ip) => write!(f, "{}", ip),
            RecordData::AAAA(ip) => write!(f, "{}", ip),
            RecordData::NS(name) | RecordData::CNAME(name) => write!(f, "{}", name),
            RecordData::SOA(soa) => write!(
                f,
                "{} {} {} {} {} {} {}",
                soa.mname, soa.rname, soa.serial, soa.refresh, soa.retry, soa.expire, soa.minimum
            ),
            RecordData::DS(ds) => f.write_str(&ds.to_presentation()),
            RecordData::DNSKEY(key) => f.write_str(&key.to_presentation()),
            RecordData::RRSIG(sig) => f.write_str(&sig.to_presentation()),
            RecordData::Other { text, .. } => f.write_str(text),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceRecord {
    pub name: DomainName,
    pub ttl: u32,
    pub data: RecordData,
}

impl ResourceRecord {
    pub fn new(name: DomainName, ttl: u32, data: RecordData) -> Self {
        Self { name, ttl, data }
    }

    pub fn type_code(&self) -> u16 {
        self.data.type_code()
    }

    pub fn record_type(&self) -> Option<RecordType> {
        self.data.record_type()
    }

    pub fn is_type(&self, record_type: RecordType) -> bool {
        self.type_code() == record_type.to_u16()
    }

    pub fn address(&self) -> Option<IpAddr> {
        match &self.data {
            RecordData::A(ip) => Some(IpAddr::V4(*ip)),
            RecordData::AAAA(ip) => Some(IpAddr::V6(*ip)),
            _ => None,
        }
    }

    /// The name a referral or alias points at.
    pub fn target(&self) -> Option<&DomainName> {
        match &self.data {
            RecordData::NS(name) | RecordData::CNAME(name) => Some(name),
            _ => None,
        }
    }

    pub fn type_name(&self) -> String {
        match self.record_type() {
            Some(rt) => rt.as_str().to_string(),
            None => format!("TYPE{}", self.type_code()),
        }
    }
}

/// Zone-file layout: `owner ttl IN type rdata`.
impl fmt::Display for ResourceRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} IN {} {}",
            self.name,
            self.ttl,
            self.type_name(),
            self.data
        )
    }
}
