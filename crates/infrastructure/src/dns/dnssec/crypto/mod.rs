use rootwalk_application::ports::DnssecVerifier;
use rootwalk_domain::dnssec::{DigestAlgorithm, DnskeyRecord, RrsigRecord};
use rootwalk_domain::{DomainError, DomainName, RecordType};
use ring::signature;
use sha2::{Digest, Sha256};

const CLASS_IN: u16 = 1;

/// [`DnssecVerifier`] backed by `ring` signatures and the RustCrypto hashes.
#[derive(Debug, Default, Clone, Copy)]
pub struct RingVerifier;

impl RingVerifier {
    pub fn new() -> Self {
        Self
    }

    /// RFC 4034 §3.1.8.1: RRSIG RDATA (minus signature) followed by the
    /// RRset in canonical order.
    fn signed_data(owner: &DomainName, rrsig: &RrsigRecord, keys: &[DnskeyRecord]) -> Vec<u8> {
        let owner_wire = owner.to_wire_canonical();
        let mut rdatas: Vec<Vec<u8>> = keys.iter().map(DnskeyRecord::rdata).collect();
        rdatas.sort();
        rdatas.dedup();

        let mut data = rrsig.signed_header();
        for rdata in rdatas {
            data.extend_from_slice(&owner_wire);
            data.extend_from_slice(&RecordType::DNSKEY.to_u16().to_be_bytes());
            data.extend_from_slice(&CLASS_IN.to_be_bytes());
            data.extend_from_slice(&rrsig.original_ttl.to_be_bytes());
            data.extend_from_slice(&(rdata.len() as u16).to_be_bytes());
            data.extend_from_slice(&rdata);
        }
        data
    }

    fn verify_signature(
        &self,
        algorithm: u8,
        data: &[u8],
        sig: &[u8],
        dnskey: &DnskeyRecord,
    ) -> Result<bool, DomainError> {
        match algorithm {
            5 | 7 => self.verify_rsa(
                &signature::RSA_PKCS1_2048_8192_SHA1_FOR_LEGACY_USE_ONLY,
                data,
                sig,
                dnskey,
            ),
            8 => self.verify_rsa(&signature::RSA_PKCS1_2048_8192_SHA256, data, sig, dnskey),
            10 => self.verify_rsa(&signature::RSA_PKCS1_2048_8192_SHA512, data, sig, dnskey),
            13 => self.verify_ecdsa(&signature::ECDSA_P256_SHA256_FIXED, 64, data, sig, dnskey),
            14 => self.verify_ecdsa(&signature::ECDSA_P384_SHA384_FIXED, 96, data, sig, dnskey),
            15 => self.verify_ed25519(data, sig, dnskey),
            16 => Err(DomainError::DnssecValidationFailed(
                "Ed448 (algorithm 16) is not supported by this build".into(),
            )),
            _ => Err(DomainError::DnssecValidationFailed(format!(
                "Unsupported DNSSEC algorithm: {}",
                algorithm
            ))),
        }
    }

    fn verify_rsa(
        &self,
        params: &'static signature::RsaParameters,
        data: &[u8],
        sig: &[u8],
        dnskey: &DnskeyRecord,
    ) -> Result<bool, DomainError> {
        let (exponent, modulus) = parse_rsa_key(&dnskey.public_key)?;
        let public_key = signature::RsaPublicKeyComponents {
            n: modulus,
            e: exponent,
        };
        Ok(public_key.verify(params, data, sig).is_ok())
    }

    /// DNSSEC carries the bare `x | y` point; ring wants the SEC1
    /// uncompressed form.
    fn verify_ecdsa(
        &self,
        alg: &'static signature::EcdsaVerificationAlgorithm,
        point_len: usize,
        data: &[u8],
        sig: &[u8],
        dnskey: &DnskeyRecord,
    ) -> Result<bool, DomainError> {
        if dnskey.public_key.len() != point_len {
            return Err(DomainError::DnssecValidationFailed(format!(
                "Invalid ECDSA public key length {} for algorithm {}",
                dnskey.public_key.len(),
                dnskey.algorithm
            )));
        }

        if sig.len() != point_len {
            return Ok(false);
        }

        let mut pk = Vec::with_capacity(point_len + 1);
        pk.push(0x04);
        pk.extend_from_slice(&dnskey.public_key);

        let public_key = signature::UnparsedPublicKey::new(alg, &pk);
        Ok(public_key.verify(data, sig).is_ok())
    }

    fn verify_ed25519(
        &self,
        data: &[u8],
        sig: &[u8],
        dnskey: &DnskeyRecord,
    ) -> Result<bool, DomainError> {
        if dnskey.public_key.len() != 32 {
            return Err(DomainError::DnssecValidationFailed(
                "Invalid Ed25519 public key length".into(),
            ));
        }

        if sig.len() != 64 {
            return Ok(false);
        }

        let public_key = signature::UnparsedPublicKey::new(&signature::ED25519, &dnskey.public_key);
        Ok(public_key.verify(data, sig).is_ok())
    }
}

impl DnssecVerifier for RingVerifier {
    fn dnskey_digest(
        &self,
        owner: &DomainName,
        key: &DnskeyRecord,
        algorithm: DigestAlgorithm,
    ) -> Result<Vec<u8>, DomainError> {
        let mut data = owner.to_wire_canonical();
        data.extend_from_slice(&key.rdata());

        let digest = match algorithm {
            DigestAlgorithm::Sha1 => sha1::Sha1::digest(&data).to_vec(),
            DigestAlgorithm::Sha256 => Sha256::digest(&data).to_vec(),
        };
        Ok(digest)
    }

    fn verify_dnskey_rrsig(
        &self,
        owner: &DomainName,
        rrsig: &RrsigRecord,
        key: &DnskeyRecord,
        keys: &[DnskeyRecord],
        now: u32,
    ) -> Result<bool, DomainError> {
        if !rrsig.covers(RecordType::DNSKEY) || !rrsig.is_current_at(now) {
            return Ok(false);
        }

        if key.key_tag() != rrsig.key_tag || key.algorithm != rrsig.algorithm {
            return Ok(false);
        }

        if &rrsig.signer_name != owner {
            return Ok(false);
        }

        let data = Self::signed_data(owner, rrsig, keys);
        self.verify_signature(rrsig.algorithm, &data, &rrsig.signature, key)
    }
}

/// Splits RFC 3110 key material into `(exponent, modulus)`.
fn parse_rsa_key(key_data: &[u8]) -> Result<(&[u8], &[u8]), DomainError> {
    let Some(&first_byte) = key_data.first() else {
        return Err(DomainError::DnssecValidationFailed(
            "Empty RSA public key".into(),
        ));
    };

    let (exp_len, exp_start) = if first_byte == 0 {
        if key_data.len() < 3 {
            return Err(DomainError::DnssecValidationFailed(
                "RSA key too short for long form".into(),
            ));
        }
        let exp_len = u16::from_be_bytes([key_data[1], key_data[2]]) as usize;
        (exp_len, 3)
    } else {
        (first_byte as usize, 1)
    };

    let exp_end = exp_start + exp_len;
    if exp_end > key_data.len() {
        return Err(DomainError::DnssecValidationFailed(
            "RSA exponent extends beyond key data".into(),
        ));
    }

    let modulus = &key_data[exp_end..];
    if modulus.is_empty() {
        return Err(DomainError::DnssecValidationFailed(
            "RSA modulus is empty".into(),
        ));
    }

    Ok((&key_data[exp_start..exp_end], modulus))
}
