use super::algorithm_name;
use crate::DomainError;
use base64::{engine::general_purpose::STANDARD, Engine};
use std::fmt;

/// DNSKEY flag value of a key-signing key (zone key + secure entry point).
pub const KSK_FLAGS: u16 = 257;
const ZONE_KEY_FLAG: u16 = 0x0100;
const DNSSEC_PROTOCOL: u8 = 3;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DnskeyRecord {
    pub flags: u16,
    pub protocol: u8,
    pub algorithm: u8,
    pub public_key: Vec<u8>,
}

impl DnskeyRecord {
    pub fn new(flags: u16, algorithm: u8, public_key: Vec<u8>) -> Self {
        Self {
            flags,
            protocol: DNSSEC_PROTOCOL,
            algorithm,
            public_key,
        }
    }

    pub fn parse(data: &[u8]) -> Result<Self, DomainError> {
        if data.len() < 4 {
            return Err(DomainError::InvalidDnsResponse(
                "DNSKEY record too short".into(),
            ));
        }

        let flags = u16::from_be_bytes([data[0], data[1]]);
        let protocol = data[2];
        let algorithm = data[3];
        let public_key = data[4..].to_vec();

        if protocol != DNSSEC_PROTOCOL {
            return Err(DomainError::InvalidDnsResponse(format!(
                "Invalid DNSKEY protocol: {} (expected 3)",
                protocol
            )));
        }

        Ok(Self {
            flags,
            protocol,
            algorithm,
            public_key,
        })
    }

    /// Only keys published with flags 257 anchor a chain of trust here.
    pub fn is_key_signing_key(&self) -> bool {
        self.flags == KSK_FLAGS
    }

    pub fn is_zone_key(&self) -> bool {
        self.flags & ZONE_KEY_FLAG != 0
    }

    /// RDATA in wire order: flags, protocol, algorithm, key material.
    pub fn rdata(&self) -> Vec<u8> {
        let mut wire = Vec::with_capacity(4 + self.public_key.len());
        wire.extend_from_slice(&self.flags.to_be_bytes());
        wire.push(self.protocol);
        wire.push(self.algorithm);
        wire.extend_from_slice(&self.public_key);
        wire
    }

    /// RFC 4034 appendix B key tag.
    pub fn key_tag(&self) -> u16 {
        let mut accumulator: u32 = 0;

        for chunk in self.rdata().chunks(2) {
            if chunk.len() == 2 {
                accumulator += u32::from(u16::from_be_bytes([chunk[0], chunk[1]]));
            } else {
                accumulator += u32::from(chunk[0]) << 8;
            }
        }

        accumulator += accumulator >> 16;
        (accumulator & 0xFFFF) as u16
    }

    pub fn algorithm_name(&self) -> &'static str {
        algorithm_name(self.algorithm)
    }

    pub fn to_presentation(&self) -> String {
        format!(
            "{} {} {} {}",
            self.flags,
            self.protocol,
            self.algorithm,
            STANDARD.encode(&self.public_key)
        )
    }
}

impl fmt::Display for DnskeyRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "DNSKEY(flags={}, algo={}, tag={}, {})",
            self.flags,
            self.algorithm_name(),
            self.key_tag(),
            if self.is_key_signing_key() { "KSK" } else { "ZSK" }
        )
    }
}
