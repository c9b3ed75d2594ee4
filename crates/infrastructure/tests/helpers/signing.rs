use super::builders::{name, now};
use ring::signature::{Ed25519KeyPair, KeyPair};
use rootwalk_domain::dnssec::{DigestAlgorithm, DnskeyRecord, DsRecord, RrsigRecord};
use rootwalk_domain::{DnsMessage, DomainName, RecordData, RecordType, ResourceRecord};
use sha2::{Digest, Sha256};

const DNSKEY_TTL: u32 = 172800;

/// An Ed25519 KSK/ZSK pair for one zone, able to produce a signed DNSKEY
/// response and the DS its parent should publish.
pub struct ZoneSigner {
    pub zone: DomainName,
    pair: Ed25519KeyPair,
    pub ksk: DnskeyRecord,
    pub zsk: DnskeyRecord,
}

impl ZoneSigner {
    pub fn new(zone: &str, seed: u8) -> Self {
        let pair = Ed25519KeyPair::from_seed_unchecked(&[seed; 32]).unwrap();
        let zsk_pair = Ed25519KeyPair::from_seed_unchecked(&[seed.wrapping_add(100); 32]).unwrap();
        Self {
            zone: name(zone),
            ksk: DnskeyRecord::new(257, 15, pair.public_key().as_ref().to_vec()),
            zsk: DnskeyRecord::new(256, 15, zsk_pair.public_key().as_ref().to_vec()),
            pair,
        }
    }

    /// SHA-256 DS computed independently of the verifier under test.
    pub fn ds(&self) -> DsRecord {
        let mut data = self.zone.to_wire_canonical();
        data.extend(self.ksk.rdata());
        DsRecord {
            key_tag: self.ksk.key_tag(),
            algorithm: 15,
            digest_type: DigestAlgorithm::Sha256.digest_type(),
            digest: Sha256::digest(&data).to_vec(),
        }
    }

    pub fn keys(&self) -> Vec<DnskeyRecord> {
        vec![self.ksk.clone(), self.zsk.clone()]
    }

    pub fn sign_keys(&self, inception: u32, expiration: u32) -> RrsigRecord {
        let mut rrsig = RrsigRecord {
            type_covered: RecordType::DNSKEY,
            algorithm: 15,
            labels: self.zone.label_count() as u8,
            original_ttl: DNSKEY_TTL,
            signature_expiration: expiration,
            signature_inception: inception,
            key_tag: self.ksk.key_tag(),
            signer_name: self.zone.clone(),
            signature: Vec::new(),
        };

        let mut rdatas: Vec<Vec<u8>> = self.keys().iter().map(DnskeyRecord::rdata).collect();
        rdatas.sort();

        let mut data = rrsig.signed_header();
        for rdata in rdatas {
            data.extend(self.zone.to_wire_canonical());
            data.extend_from_slice(&48u16.to_be_bytes());
            data.extend_from_slice(&1u16.to_be_bytes());
            data.extend_from_slice(&DNSKEY_TTL.to_be_bytes());
            data.extend_from_slice(&(rdata.len() as u16).to_be_bytes());
            data.extend(rdata);
        }

        rrsig.signature = self.pair.sign(&data).as_ref().to_vec();
        rrsig
    }

    /// DNSKEY answer signed with a window around the current time.
    pub fn key_response(&self) -> DnsMessage {
        self.key_response_with(self.sign_keys(now() - 3600, now() + 86400))
    }

    pub fn key_response_with(&self, rrsig: RrsigRecord) -> DnsMessage {
        let mut message = DnsMessage::empty(1);
        message.answers = self
            .keys()
            .into_iter()
            .map(|key| ResourceRecord::new(self.zone.clone(), DNSKEY_TTL, RecordData::DNSKEY(key)))
            .collect();
        message.answers.push(ResourceRecord::new(
            self.zone.clone(),
            DNSKEY_TTL,
            RecordData::RRSIG(rrsig),
        ));
        message
    }
}
