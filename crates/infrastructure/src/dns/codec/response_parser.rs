use super::record_type_map::RecordTypeMapper;
use hickory_proto::dnssec::rdata::DNSSECRData;
use hickory_proto::dnssec::PublicKey;
use hickory_proto::op::Message;
use hickory_proto::rr::{Name, RData, Record};
use rootwalk_domain::dnssec::{DnskeyRecord, DsRecord, RrsigRecord};
use rootwalk_domain::{
    DnsMessage, DomainError, DomainName, Question, RecordData, ResourceRecord, ResponseCode,
    SoaData,
};
use tracing::debug;

/// Decodes wire-format responses into [`DnsMessage`].
pub struct ResponseParser;

impl ResponseParser {
    pub fn parse(response_bytes: &[u8]) -> Result<DnsMessage, DomainError> {
        let message = Message::from_vec(response_bytes).map_err(|e| {
            DomainError::InvalidDnsResponse(format!("Failed to parse DNS response: {}", e))
        })?;

        let question = match message.queries().first() {
            Some(query) => RecordTypeMapper::from_hickory(query.query_type())
                .map(|rt| Ok::<_, DomainError>(Question::new(convert_name(query.name())?, rt)))
                .transpose()?,
            None => None,
        };

        let answers = convert_section(message.answers())?;
        let authority = convert_section(message.name_servers())?;
        let additional = convert_section(message.additionals())?;

        debug!(
            id = message.id(),
            rcode = %message.response_code(),
            answers = answers.len(),
            authority = authority.len(),
            additional = additional.len(),
            bytes = response_bytes.len(),
            "Parsed DNS response"
        );

        Ok(DnsMessage {
            id: message.id(),
            rcode: ResponseCode::from_u16(u16::from(message.response_code())),
            authoritative: message.authoritative(),
            truncated: message.truncated(),
            question,
            answers,
            authority,
            additional,
            wire_size: response_bytes.len(),
        })
    }
}

fn convert_section(records: &[Record]) -> Result<Vec<ResourceRecord>, DomainError> {
    records.iter().map(convert_record).collect()
}

fn convert_record(record: &Record) -> Result<ResourceRecord, DomainError> {
    let data = match record.data() {
        RData::A(a) => RecordData::A(a.0),
        RData::AAAA(aaaa) => RecordData::AAAA(aaaa.0),
        RData::NS(ns) => RecordData::NS(convert_name(&ns.0)?),
        RData::CNAME(cname) => RecordData::CNAME(convert_name(&cname.0)?),
        RData::SOA(soa) => RecordData::SOA(SoaData {
            mname: convert_name(soa.mname())?,
            rname: convert_name(soa.rname())?,
            serial: soa.serial(),
            refresh: soa.refresh(),
            retry: soa.retry(),
            expire: soa.expire(),
            minimum: soa.minimum(),
        }),
        RData::DNSSEC(DNSSECRData::DS(ds)) => RecordData::DS(DsRecord {
            key_tag: ds.key_tag(),
            algorithm: u8::from(ds.algorithm()),
            digest_type: u8::from(ds.digest_type()),
            digest: ds.digest().to_vec(),
        }),
        RData::DNSSEC(DNSSECRData::DNSKEY(dnskey)) => {
            let pk = dnskey.public_key();
            RecordData::DNSKEY(DnskeyRecord::new(
                dnskey.flags(),
                u8::from(<dyn PublicKey>::algorithm(pk)),
                <dyn PublicKey>::public_bytes(pk).to_vec(),
            ))
        }
        RData::DNSSEC(DNSSECRData::RRSIG(rrsig)) => {
            let input = rrsig.input();
            match RecordTypeMapper::from_hickory(input.type_covered) {
                Some(type_covered) => RecordData::RRSIG(RrsigRecord {
                    type_covered,
                    algorithm: u8::from(input.algorithm),
                    labels: input.num_labels,
                    original_ttl: input.original_ttl,
                    signature_expiration: input.sig_expiration.get(),
                    signature_inception: input.sig_inception.get(),
                    key_tag: input.key_tag,
                    signer_name: convert_name(&input.signer_name)?,
                    signature: rrsig.sig().to_vec(),
                }),
                None => other(record),
            }
        }
        _ => other(record),
    };

    Ok(ResourceRecord::new(
        convert_name(record.name())?,
        record.ttl(),
        data,
    ))
}

fn other(record: &Record) -> RecordData {
    RecordData::Other {
        type_code: u16::from(record.record_type()),
        text: record.data().to_string(),
    }
}

fn convert_name(name: &Name) -> Result<DomainName, DomainError> {
    DomainName::parse(&name.to_ascii())
        .map_err(|e| DomainError::InvalidDnsResponse(format!("Bad owner name {}: {}", name, e)))
}
