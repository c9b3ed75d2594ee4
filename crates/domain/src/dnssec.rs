//! DNSSEC record types and the root trust anchor table.

pub mod digest;
pub mod dnskey;
pub mod ds;
pub mod rrsig;
pub mod trust_anchor;

pub use digest::DigestAlgorithm;
pub use dnskey::DnskeyRecord;
pub use ds::{DelegationSigner, DsRecord};
pub use rrsig::RrsigRecord;
pub use trust_anchor::{TrustAnchorStore, DEFAULT_ROOT_ANCHORS};

/// Human-readable name for a DNSSEC signing algorithm number.
pub fn algorithm_name(algorithm: u8) -> &'static str {
    match algorithm {
        5 => "RSA/SHA-1",
        7 => "RSASHA1-NSEC3-SHA1",
        8 => "RSA/SHA-256",
        10 => "RSA/SHA-512",
        13 => "ECDSA P-256/SHA-256",
        14 => "ECDSA P-384/SHA-384",
        15 => "Ed25519",
        16 => "Ed448",
        _ => "Unknown",
    }
}
