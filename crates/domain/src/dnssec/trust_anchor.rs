use super::DsRecord;
use crate::DomainError;

/// Root KSK digests shipped as the default chain-of-trust seed.
pub const DEFAULT_ROOT_ANCHORS: [&str; 2] = [
    "19036 8 2 49aac11d7b6f6446702e54a1607371607a1a41855200fd2ce1cdde32f24e8fb5",
    "20326 8 2 e06d44b80b8f1d39a95c0b0d7c65d08458e880409bbc683457104237c7f8ec8d",
];

/// The DS-form trust anchors for the root zone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrustAnchorStore {
    anchors: Vec<DsRecord>,
}

impl TrustAnchorStore {
    pub fn new(anchors: Vec<DsRecord>) -> Self {
        Self { anchors }
    }

    pub fn from_presentation<S: AsRef<str>>(entries: &[S]) -> Result<Self, DomainError> {
        let anchors = entries
            .iter()
            .map(|entry| entry.as_ref().parse::<DsRecord>())
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { anchors })
    }

    pub fn default_root_anchors() -> Result<Self, DomainError> {
        Self::from_presentation(&DEFAULT_ROOT_ANCHORS)
    }

    pub fn is_empty(&self) -> bool {
        self.anchors.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DsRecord> {
        self.anchors.iter()
    }

    /// Whether a DS computed from a root key equals one of the anchors.
    pub fn is_trusted(&self, computed: &DsRecord) -> bool {
        self.anchors.iter().any(|anchor| anchor == computed)
    }
}
