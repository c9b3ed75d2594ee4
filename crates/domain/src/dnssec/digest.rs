use crate::DomainError;
use std::fmt;

/// DS digest algorithms this resolver can recompute.
///
/// The mapping from the DS digest-type field is closed: anything outside the
/// table is rejected instead of being carried around unset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DigestAlgorithm {
    Sha1,
    Sha256,
}

const DIGEST_TABLE: [(u8, DigestAlgorithm); 2] =
    [(1, DigestAlgorithm::Sha1), (2, DigestAlgorithm::Sha256)];

impl DigestAlgorithm {
    pub fn from_digest_type(digest_type: u8) -> Result<Self, DomainError> {
        DIGEST_TABLE
            .iter()
            .find(|(code, _)| *code == digest_type)
            .map(|(_, algorithm)| *algorithm)
            .ok_or(DomainError::UnsupportedDigestType(digest_type))
    }

    pub fn digest_type(&self) -> u8 {
        match self {
            DigestAlgorithm::Sha1 => 1,
            DigestAlgorithm::Sha256 => 2,
        }
    }

    pub fn output_len(&self) -> usize {
        match self {
            DigestAlgorithm::Sha1 => 20,
            DigestAlgorithm::Sha256 => 32,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            DigestAlgorithm::Sha1 => "SHA-1",
            DigestAlgorithm::Sha256 => "SHA-256",
        }
    }
}

impl TryFrom<u8> for DigestAlgorithm {
    type Error = DomainError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::from_digest_type(value)
    }
}

impl fmt::Display for DigestAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
