use rootwalk_domain::dnssec::{DigestAlgorithm, DnskeyRecord, DsRecord, RrsigRecord};
use rootwalk_domain::{DomainError, DomainName};

/// Cryptographic half of zone key validation.
pub trait DnssecVerifier: Send + Sync {
    /// Digest of `owner | DNSKEY RDATA` with the given algorithm.
    fn dnskey_digest(
        &self,
        owner: &DomainName,
        key: &DnskeyRecord,
        algorithm: DigestAlgorithm,
    ) -> Result<Vec<u8>, DomainError>;

    /// Checks `rrsig` over the DNSKEY RRset `keys` owned by `owner`, using
    /// `key` as the signer. Signatures outside their validity window at
    /// `now` (seconds since the epoch) do not verify.
    fn verify_dnskey_rrsig(
        &self,
        owner: &DomainName,
        rrsig: &RrsigRecord,
        key: &DnskeyRecord,
        keys: &[DnskeyRecord],
        now: u32,
    ) -> Result<bool, DomainError>;

    /// The DS record a parent would publish for `key`.
    fn compute_ds(
        &self,
        owner: &DomainName,
        key: &DnskeyRecord,
        algorithm: DigestAlgorithm,
    ) -> Result<DsRecord, DomainError> {
        Ok(DsRecord {
            key_tag: key.key_tag(),
            algorithm: key.algorithm,
            digest_type: algorithm.digest_type(),
            digest: self.dnskey_digest(owner, key, algorithm)?,
        })
    }
}
