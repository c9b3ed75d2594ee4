mod dns_exchange;
mod dnssec_verifier;

pub use dns_exchange::{DnsExchange, QueryProtocol, QueryRequest};
pub use dnssec_verifier::DnssecVerifier;
