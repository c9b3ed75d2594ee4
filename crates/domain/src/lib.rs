//! rootwalk domain layer
pub mod config;
pub mod dns_message;
pub mod dns_record;
pub mod dnssec;
pub mod domain_name;
pub mod errors;
pub mod resolution;
pub mod server;

pub use config::{CliOverrides, Config, ConfigError, ResolverConfig, ResolverSettings};
pub use dns_message::{DnsMessage, Question, ResponseCode};
pub use dns_record::{RecordData, RecordType, ResourceRecord, SoaData};
pub use domain_name::DomainName;
pub use errors::DomainError;
pub use resolution::{DnsAnswer, ResolutionState};
pub use server::{ServerAddress, ServerSet, DNS_PORT};
