use crate::{DomainName, RecordType};
use base64::{engine::general_purpose::STANDARD, Engine};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RrsigRecord {
    pub type_covered: RecordType,
    pub algorithm: u8,
    pub labels: u8,
    pub original_ttl: u32,
    pub signature_expiration: u32,
    pub signature_inception: u32,
    pub key_tag: u16,
    pub signer_name: DomainName,
    pub signature: Vec<u8>,
}

impl RrsigRecord {
    pub fn covers(&self, record_type: RecordType) -> bool {
        self.type_covered == record_type
    }

    /// Validity window check using serial-number arithmetic so that the
    /// 32-bit timestamps keep working across wrap-around.
    pub fn is_current_at(&self, now: u32) -> bool {
        let since_inception = now.wrapping_sub(self.signature_inception) as i32;
        let until_expiration = self.signature_expiration.wrapping_sub(now) as i32;
        since_inception >= 0 && until_expiration >= 0
    }

    /// RDATA fields that precede the signature in the signed data.
    pub fn signed_header(&self) -> Vec<u8> {
        let signer = self.signer_name.to_wire_canonical();
        let mut wire = Vec::with_capacity(18 + signer.len());
        wire.extend_from_slice(&self.type_covered.to_u16().to_be_bytes());
        wire.push(self.algorithm);
        wire.push(self.labels);
        wire.extend_from_slice(&self.original_ttl.to_be_bytes());
        wire.extend_from_slice(&self.signature_expiration.to_be_bytes());
        wire.extend_from_slice(&self.signature_inception.to_be_bytes());
        wire.extend_from_slice(&self.key_tag.to_be_bytes());
        wire.extend_from_slice(&signer);
        wire
    }

    pub fn to_presentation(&self) -> String {
        format!(
            "{} {} {} {} {} {} {} {} {}",
            self.type_covered,
            self.algorithm,
            self.labels,
            self.original_ttl,
            self.signature_expiration,
            self.signature_inception,
            self.key_tag,
            self.signer_name,
            STANDARD.encode(&self.signature)
        )
    }
}

impl fmt::Display for RrsigRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "RRSIG(covers={}, algo={}, tag={}, signer={})",
            self.type_covered, self.algorithm, self.key_tag, self.signer_name
        )
    }
}
