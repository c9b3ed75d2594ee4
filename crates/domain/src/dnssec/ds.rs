use super::{algorithm_name, DigestAlgorithm};
use crate::DomainError;
use std::fmt;
use std::str::FromStr;

/// A parent zone's assertion about one of the child's key-signing keys.
///
/// Equality compares the digest bytes, which is the same as comparing the
/// hex presentation case-insensitively.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DsRecord {
    pub key_tag: u16,
    pub algorithm: u8,
    pub digest_type: u8,
    pub digest: Vec<u8>,
}

impl DsRecord {
    pub fn parse(data: &[u8]) -> Result<Self, DomainError> {
        if data.len() < 4 {
            return Err(DomainError::InvalidDnsResponse(
                "DS record too short".into(),
            ));
        }

        let key_tag = u16::from_be_bytes([data[0], data[1]]);
        let algorithm = data[2];
        let digest_type = data[3];
        let digest = data[4..].to_vec();

        Self::validate_digest_length(digest_type, digest.len())?;

        Ok(Self {
            key_tag,
            algorithm,
            digest_type,
            digest,
        })
    }

    fn validate_digest_length(digest_type: u8, length: usize) -> Result<(), DomainError> {
        let expected = match digest_type {
            1 => 20,
            2 => 32,
            4 => 48,
            _ => return Ok(()),
        };

        if length != expected {
            return Err(DomainError::InvalidDnsResponse(format!(
                "Invalid digest length for type {}: got {}, expected {}",
                digest_type, length, expected
            )));
        }

        Ok(())
    }

    pub fn digest_hex(&self) -> String {
        hex::encode_upper(&self.digest)
    }

    pub fn algorithm_name(&self) -> &'static str {
        algorithm_name(self.algorithm)
    }

    pub fn to_presentation(&self) -> String {
        format!(
            "{} {} {} {}",
            self.key_tag,
            self.algorithm,
            self.digest_type,
            self.digest_hex()
        )
    }
}

/// Parses the zone-file form `<key tag> <algorithm> <digest type> <hex digest>`.
impl FromStr for DsRecord {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let fields: Vec<&str> = s.split_whitespace().collect();
        if fields.len() < 4 {
            return Err(DomainError::ConfigError(format!(
                "DS record '{}' needs key tag, algorithm, digest type and digest",
                s
            )));
        }

        let numeric = |field: &str, what: &str| {
            DomainError::ConfigError(format!("DS record '{}' has an invalid {}: {}", s, what, field))
        };

        let key_tag = fields[0]
            .parse::<u16>()
            .map_err(|_| numeric(fields[0], "key tag"))?;
        let algorithm = fields[1]
            .parse::<u8>()
            .map_err(|_| numeric(fields[1], "algorithm"))?;
        let digest_type = fields[2]
            .parse::<u8>()
            .map_err(|_| numeric(fields[2], "digest type"))?;
        let digest = hex::decode(fields[3..].concat())
            .map_err(|e| DomainError::ConfigError(format!("DS record '{}': {}", s, e)))?;

        Self::validate_digest_length(digest_type, digest.len())
            .map_err(|e| DomainError::ConfigError(e.to_string()))?;

        Ok(Self {
            key_tag,
            algorithm,
            digest_type,
            digest,
        })
    }
}

impl fmt::Display for DsRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "DS(tag={}, algo={}, digest_type={})",
            self.key_tag,
            self.algorithm_name(),
            self.digest_type
        )
    }
}

/// A DS record whose digest type has been mapped to an algorithm this
/// resolver can recompute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DelegationSigner {
    pub ds: DsRecord,
    pub digest: DigestAlgorithm,
}

impl DelegationSigner {
    pub fn from_ds(ds: DsRecord) -> Result<Self, DomainError> {
        let digest = DigestAlgorithm::from_digest_type(ds.digest_type)?;
        Ok(Self { ds, digest })
    }
}
