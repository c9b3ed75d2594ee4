use super::mock_exchange::MockExchange;
use super::mock_verifier::MockVerifier;
use rootwalk_domain::dnssec::{
    DigestAlgorithm, DnskeyRecord, DsRecord, RrsigRecord, TrustAnchorStore,
};
use rootwalk_domain::{
    DnsMessage, DomainName, RecordData, RecordType, ResolverSettings, ResourceRecord,
    ServerAddress, ServerSet, SoaData,
};
use std::net::IpAddr;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

pub const ROOT_A: &str = "10.0.0.1";
pub const ROOT_B: &str = "10.0.0.2";
pub const COM_NS: &str = "10.1.0.1";
pub const EXAMPLE_NS: &str = "10.2.0.1";
pub const EXAMPLE_ADDR: &str = "93.184.216.34";

pub fn name(s: &str) -> DomainName {
    DomainName::parse(s).unwrap()
}

pub fn server(ip: &str) -> ServerAddress {
    ServerAddress::new(ip.parse::<IpAddr>().unwrap(), 53)
}

pub fn servers(ips: &[&str]) -> ServerSet {
    ips.iter().map(|ip| server(ip)).collect()
}

pub fn settings(roots: &[&str], anchors: Vec<DsRecord>) -> ResolverSettings {
    ResolverSettings {
        root_servers: servers(roots),
        trust_anchors: TrustAnchorStore::new(anchors),
        port: 53,
        udp_timeout: Duration::from_secs(2),
        tcp_timeout: Duration::from_secs(10),
        max_alias_depth: 10,
        ipv6_glue: false,
    }
}

pub fn now() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_secs() as u32
}

// ── records ────────────────────────────────────────────────────────────────

pub fn a_record(owner: &str, ip: &str) -> ResourceRecord {
    ResourceRecord::new(name(owner), 300, RecordData::A(ip.parse().unwrap()))
}

pub fn cname_record(owner: &str, target: &str) -> ResourceRecord {
    ResourceRecord::new(name(owner), 300, RecordData::CNAME(name(target)))
}

pub fn ns_record(zone: &str, host: &str) -> ResourceRecord {
    ResourceRecord::new(name(zone), 172800, RecordData::NS(name(host)))
}

pub fn soa_record(zone: &str) -> ResourceRecord {
    ResourceRecord::new(
        name(zone),
        3600,
        RecordData::SOA(SoaData {
            mname: name(&format!("ns1.{}", zone)),
            rname: name(&format!("hostmaster.{}", zone)),
            serial: 2024010101,
            refresh: 7200,
            retry: 3600,
            expire: 1209600,
            minimum: 3600,
        }),
    )
}

// ── messages ───────────────────────────────────────────────────────────────

pub fn answer(records: Vec<ResourceRecord>) -> DnsMessage {
    let mut message = DnsMessage::empty(1);
    message.authoritative = true;
    message.wire_size = 40 + 16 * records.len();
    message.answers = records;
    message
}

/// Referral for `zone` listing `(nameserver, glue)` pairs.
pub fn referral(zone: &str, nameservers: &[(&str, Option<&str>)]) -> DnsMessage {
    let mut message = DnsMessage::empty(1);
    for (host, glue) in nameservers {
        message.authority.push(ns_record(zone, host));
        if let Some(ip) = glue {
            message.additional.push(a_record(host, ip));
        }
    }
    message.wire_size = 100;
    message
}

pub fn nodata(zone: &str) -> DnsMessage {
    let mut message = DnsMessage::empty(1);
    message.authoritative = true;
    message.authority.push(soa_record(zone));
    message
}

pub fn with_ds(mut message: DnsMessage, zone: &str, ds: DsRecord) -> DnsMessage {
    message
        .authority
        .push(ResourceRecord::new(name(zone), 86400, RecordData::DS(ds)));
    message
}

// ── keys ───────────────────────────────────────────────────────────────────

pub fn ksk(seed: u8) -> DnskeyRecord {
    DnskeyRecord::new(257, 15, vec![seed; 32])
}

pub fn zsk(seed: u8) -> DnskeyRecord {
    DnskeyRecord::new(256, 15, vec![seed.wrapping_add(100); 32])
}

pub fn key_response(zone: &str, keys: &[DnskeyRecord], rrsigs: Vec<RrsigRecord>) -> DnsMessage {
    let owner = name(zone);
    let mut records: Vec<ResourceRecord> = keys
        .iter()
        .map(|k| ResourceRecord::new(owner.clone(), 172800, RecordData::DNSKEY(k.clone())))
        .collect();
    records.extend(
        rrsigs
            .into_iter()
            .map(|sig| ResourceRecord::new(owner.clone(), 172800, RecordData::RRSIG(sig))),
    );
    answer(records)
}

/// DNSKEY response for `zone`: `ksk` plus a ZSK, signed by `ksk`.
pub fn signed_keys(zone: &str, ksk: &DnskeyRecord) -> DnsMessage {
    let rrsig = MockVerifier::sign(&name(zone), ksk, now() - 3600, now() + 86400);
    key_response(zone, &[ksk.clone(), zsk(ksk.public_key[0])], vec![rrsig])
}

pub fn ds(zone: &str, key: &DnskeyRecord, algorithm: DigestAlgorithm) -> DsRecord {
    MockVerifier::ds(&name(zone), key, algorithm)
}

// ── scripted hierarchies ───────────────────────────────────────────────────

/// Plain referral chain for `example.com` queried with `record_type`:
/// root -> com (glued) -> example.com (glued) -> A answer.
pub fn script_plain_example(exchange: &MockExchange, record_type: RecordType) {
    exchange.respond(
        ROOT_A,
        "com.",
        record_type,
        referral("com", &[("a.gtld-servers.net", Some(COM_NS))]),
    );
    exchange.respond(
        COM_NS,
        "example.com.",
        record_type,
        referral("example.com", &[("a.iana-servers.net", Some(EXAMPLE_NS))]),
    );
    exchange.respond(
        EXAMPLE_NS,
        "example.com.",
        record_type,
        answer(vec![a_record("example.com", EXAMPLE_ADDR)]),
    );
}

pub struct SignedChain {
    pub root_ksk: DnskeyRecord,
    pub com_ksk: DnskeyRecord,
    pub example_ksk: DnskeyRecord,
}

impl SignedChain {
    pub fn new() -> Self {
        Self {
            root_ksk: ksk(1),
            com_ksk: ksk(2),
            example_ksk: ksk(3),
        }
    }

    pub fn anchors(&self) -> Vec<DsRecord> {
        vec![ds(".", &self.root_ksk, DigestAlgorithm::Sha256)]
    }

    pub fn settings(&self) -> ResolverSettings {
        settings(&[ROOT_A, ROOT_B], self.anchors())
    }

    /// Signed root -> com -> example.com, with an A record at the leaf.
    pub fn script(&self, exchange: &MockExchange) {
        exchange.respond(ROOT_A, ".", RecordType::DNSKEY, signed_keys(".", &self.root_ksk));
        exchange.respond(
            ROOT_A,
            "com.",
            RecordType::DNSKEY,
            with_ds(
                referral("com", &[("a.gtld-servers.net", Some(COM_NS))]),
                "com",
                ds("com", &self.com_ksk, DigestAlgorithm::Sha256),
            ),
        );
        exchange.respond(COM_NS, "com.", RecordType::DNSKEY, signed_keys("com", &self.com_ksk));
        exchange.respond(
            COM_NS,
            "example.com.",
            RecordType::DNSKEY,
            with_ds(
                referral("example.com", &[("a.iana-servers.net", Some(EXAMPLE_NS))]),
                "example.com",
                ds("example.com", &self.example_ksk, DigestAlgorithm::Sha256),
            ),
        );
        exchange.respond(
            EXAMPLE_NS,
            "example.com.",
            RecordType::DNSKEY,
            signed_keys("example.com", &self.example_ksk),
        );
        exchange.respond(
            EXAMPLE_NS,
            "example.com.",
            RecordType::A,
            answer(vec![a_record("example.com", EXAMPLE_ADDR)]),
        );
    }
}
