//! DNS Message Builder
//!
//! Constructs iterative DNS query messages in wire format using `hickory-proto`.
//! Every query carries an EDNS(0) OPT record advertising the configured UDP
//! payload size; the DO bit is set only when DNSSEC material is wanted.

use super::record_type_map::RecordTypeMapper;
use hickory_proto::op::{Message, MessageType, OpCode, Query};
use hickory_proto::rr::{DNSClass, Name};
use hickory_proto::serialize::binary::{BinEncodable, BinEncoder};
use rootwalk_application::ports::QueryRequest;
use rootwalk_domain::DomainError;
use std::str::FromStr;

const HEADER_LEN: usize = 12;
const ARCOUNT_OFFSET: usize = 10;
const OPT_TYPE: u16 = 41;
const DNSSEC_OK_FLAG: u16 = 0x8000;

/// A serialized query and the ID to match its response against.
#[derive(Debug, Clone)]
pub struct EncodedQuery {
    pub id: u16,
    pub bytes: Vec<u8>,
}

/// Builds DNS query messages in wire format
pub struct MessageBuilder {
    edns_payload: u16,
}

impl MessageBuilder {
    pub fn new(edns_payload: u16) -> Self {
        Self { edns_payload }
    }

    /// Build a non-recursive query for `request` with a random ID.
    pub fn build_query(&self, request: &QueryRequest) -> Result<EncodedQuery, DomainError> {
        self.build_query_with_id(fastrand::u16(..), request)
    }

    pub fn build_query_with_id(
        &self,
        id: u16,
        request: &QueryRequest,
    ) -> Result<EncodedQuery, DomainError> {
        let name = Name::from_str(&request.name.to_string()).map_err(|e| {
            DomainError::InvalidDomainName(format!("Invalid domain '{}': {}", request.name, e))
        })?;

        let mut query = Query::new();
        query.set_name(name);
        query.set_query_type(RecordTypeMapper::to_hickory(&request.record_type));
        query.set_query_class(DNSClass::IN);

        let mut message = Message::new(id, MessageType::Query, OpCode::Query);
        message.set_recursion_desired(false);
        message.add_query(query);

        let mut bytes = Self::serialize_message(&message)?;
        self.append_opt_record(&mut bytes, request.dnssec_ok)?;

        Ok(EncodedQuery { id, bytes })
    }

    /// Appends an OPT pseudo-record (RFC 6891 §6.1.2) and bumps ARCOUNT.
    fn append_opt_record(&self, bytes: &mut Vec<u8>, dnssec_ok: bool) -> Result<(), DomainError> {
        if bytes.len() < HEADER_LEN {
            return Err(DomainError::InvalidDnsResponse(
                "Serialized query shorter than a DNS header".into(),
            ));
        }

        let arcount = u16::from_be_bytes([bytes[ARCOUNT_OFFSET], bytes[ARCOUNT_OFFSET + 1]]) + 1;
        bytes[ARCOUNT_OFFSET..ARCOUNT_OFFSET + 2].copy_from_slice(&arcount.to_be_bytes());

        let flags = if dnssec_ok { DNSSEC_OK_FLAG } else { 0 };

        bytes.push(0x00); // root owner
        bytes.extend_from_slice(&OPT_TYPE.to_be_bytes());
        bytes.extend_from_slice(&self.edns_payload.to_be_bytes());
        bytes.push(0x00); // extended rcode
        bytes.push(0x00); // version
        bytes.extend_from_slice(&flags.to_be_bytes());
        bytes.extend_from_slice(&0u16.to_be_bytes());
        Ok(())
    }

    fn serialize_message(message: &Message) -> Result<Vec<u8>, DomainError> {
        let mut buf = Vec::with_capacity(512);
        let mut encoder = BinEncoder::new(&mut buf);

        message.emit(&mut encoder).map_err(|e| {
            DomainError::InvalidDnsResponse(format!("Failed to serialize DNS message: {}", e))
        })?;

        Ok(buf)
    }
}
