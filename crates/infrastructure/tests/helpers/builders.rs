use rootwalk_domain::dnssec::{DsRecord, TrustAnchorStore};
use rootwalk_domain::{
    DomainName, RecordData, ResolverSettings, ResourceRecord, ServerAddress, ServerSet, SoaData,
};
use std::net::IpAddr;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

pub fn name(s: &str) -> DomainName {
    DomainName::parse(s).unwrap()
}

pub fn server(ip: &str) -> ServerAddress {
    ServerAddress::new(ip.parse::<IpAddr>().unwrap(), 53)
}

pub fn now() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_secs() as u32
}

/// Settings with short timeouts, suitable for loopback servers.
pub fn settings(roots: Vec<ServerAddress>, port: u16, anchors: Vec<DsRecord>) -> ResolverSettings {
    ResolverSettings {
        root_servers: ServerSet::new(roots),
        trust_anchors: TrustAnchorStore::new(anchors),
        port,
        udp_timeout: Duration::from_millis(500),
        tcp_timeout: Duration::from_millis(500),
        max_alias_depth: 10,
        ipv6_glue: false,
    }
}

pub fn a_record(owner: &str, ip: &str) -> ResourceRecord {
    ResourceRecord::new(name(owner), 300, RecordData::A(ip.parse().unwrap()))
}

pub fn ns_record(zone: &str, host: &str) -> ResourceRecord {
    ResourceRecord::new(name(zone), 172800, RecordData::NS(name(host)))
}

pub fn soa_record(zone: &str) -> ResourceRecord {
    ResourceRecord::new(
        name(zone),
        3600,
        RecordData::SOA(SoaData {
            mname: name(&format!("ns.{}", zone)),
            rname: name(&format!("hostmaster.{}", zone)),
            serial: 2024010101,
            refresh: 7200,
            retry: 3600,
            expire: 1209600,
            minimum: 300,
        }),
    )
}
