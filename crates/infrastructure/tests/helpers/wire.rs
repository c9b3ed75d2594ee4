//! Minimal wire encoder for mock server responses. Names are never
//! compressed.

use rootwalk_domain::{RecordData, ResourceRecord};

const CLASS_IN: u16 = 1;

pub fn encode_record(record: &ResourceRecord) -> Vec<u8> {
    let rdata = match &record.data {
        RecordData::A(ip) => ip.octets().to_vec(),
        RecordData::AAAA(ip) => ip.octets().to_vec(),
        RecordData::NS(target) | RecordData::CNAME(target) => target.to_wire_canonical(),
        RecordData::SOA(soa) => {
            let mut wire = soa.mname.to_wire_canonical();
            wire.extend(soa.rname.to_wire_canonical());
            wire.extend_from_slice(&soa.serial.to_be_bytes());
            wire.extend_from_slice(&soa.refresh.to_be_bytes());
            wire.extend_from_slice(&soa.retry.to_be_bytes());
            wire.extend_from_slice(&soa.expire.to_be_bytes());
            wire.extend_from_slice(&soa.minimum.to_be_bytes());
            wire
        }
        RecordData::DS(ds) => {
            let mut wire = ds.key_tag.to_be_bytes().to_vec();
            wire.push(ds.algorithm);
            wire.push(ds.digest_type);
            wire.extend_from_slice(&ds.digest);
            wire
        }
        RecordData::DNSKEY(key) => key.rdata(),
        RecordData::RRSIG(sig) => {
            let mut wire = sig.signed_header();
            wire.extend_from_slice(&sig.signature);
            wire
        }
        RecordData::Other { type_code, .. } => {
            panic!("mock server cannot encode TYPE{}", type_code)
        }
    };

    let mut wire = record.name.to_wire_canonical();
    wire.extend_from_slice(&record.type_code().to_be_bytes());
    wire.extend_from_slice(&CLASS_IN.to_be_bytes());
    wire.extend_from_slice(&record.ttl.to_be_bytes());
    wire.extend_from_slice(&(rdata.len() as u16).to_be_bytes());
    wire.extend(rdata);
    wire
}

/// Question section as it appeared in a query, plus the parsed fields.
pub struct ParsedQuery {
    pub id: u16,
    pub name: String,
    pub qtype: u16,
    pub question: Vec<u8>,
    pub recursion_desired: bool,
    pub dnssec_ok: bool,
}

pub fn parse_query(bytes: &[u8]) -> Option<ParsedQuery> {
    if bytes.len() < 12 {
        return None;
    }

    let mut labels = Vec::new();
    let mut pos = 12;
    loop {
        let len = *bytes.get(pos)? as usize;
        pos += 1;
        if len == 0 {
            break;
        }
        let label = bytes.get(pos..pos + len)?;
        labels.push(String::from_utf8_lossy(label).to_ascii_lowercase());
        pos += len;
    }
    let qtype = u16::from_be_bytes([*bytes.get(pos)?, *bytes.get(pos + 1)?]);
    let question_end = pos + 4;

    let opt = bytes.get(question_end..).unwrap_or(&[]);
    let dnssec_ok = opt.len() == 11 && opt[1..3] == [0x00, 0x29] && opt[7] & 0x80 != 0;

    Some(ParsedQuery {
        id: u16::from_be_bytes([bytes[0], bytes[1]]),
        name: format!("{}.", labels.join(".")),
        qtype,
        question: bytes.get(12..question_end)?.to_vec(),
        recursion_desired: bytes[2] & 0x01 != 0,
        dnssec_ok,
    })
}
