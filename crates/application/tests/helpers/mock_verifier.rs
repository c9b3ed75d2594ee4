use rootwalk_application::ports::DnssecVerifier;
use rootwalk_domain::dnssec::{DigestAlgorithm, DnskeyRecord, DsRecord, RrsigRecord};
use rootwalk_domain::{DomainError, DomainName, RecordType};

/// Stand-in crypto. Digests differ per algorithm so a DS recomputed with
/// the wrong algorithm never matches; a "signature" is the signer's public
/// key with a fixed prefix.
pub struct MockVerifier;

impl MockVerifier {
    pub fn digest(owner: &DomainName, key: &DnskeyRecord, algorithm: DigestAlgorithm) -> Vec<u8> {
        let mut digest = vec![algorithm.digest_type()];
        digest.extend_from_slice(&owner.to_wire_canonical());
        digest.extend_from_slice(&key.rdata());
        digest
    }

    pub fn ds(owner: &DomainName, key: &DnskeyRecord, algorithm: DigestAlgorithm) -> DsRecord {
        DsRecord {
            key_tag: key.key_tag(),
            algorithm: key.algorithm,
            digest_type: algorithm.digest_type(),
            digest: Self::digest(owner, key, algorithm),
        }
    }

    pub fn signature(key: &DnskeyRecord) -> Vec<u8> {
        let mut sig = b"signed-by:".to_vec();
        sig.extend_from_slice(&key.public_key);
        sig
    }

    pub fn sign(owner: &DomainName, key: &DnskeyRecord, inception: u32, expiration: u32) -> RrsigRecord {
        RrsigRecord {
            type_covered: RecordType::DNSKEY,
            algorithm: key.algorithm,
            labels: owner.label_count() as u8,
            original_ttl: 172800,
            signature_expiration: expiration,
            signature_inception: inception,
            key_tag: key.key_tag(),
            signer_name: owner.clone(),
            signature: Self::signature(key),
        }
    }
}

impl DnssecVerifier for MockVerifier {
    fn dnskey_digest(
        &self,
        owner: &DomainName,
        key: &DnskeyRecord,
        algorithm: DigestAlgorithm,
    ) -> Result<Vec<u8>, DomainError> {
        Ok(Self::digest(owner, key, algorithm))
    }

    fn verify_dnskey_rrsig(
        &self,
        owner: &DomainName,
        rrsig: &RrsigRecord,
        key: &DnskeyRecord,
        keys: &[DnskeyRecord],
        now: u32,
    ) -> Result<bool, DomainError> {
        Ok(rrsig.is_current_at(now)
            && &rrsig.signer_name == owner
            && keys.contains(key)
            && rrsig.signature == Self::signature(key))
    }
}
