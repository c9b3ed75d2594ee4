use async_trait::async_trait;
use rootwalk_application::ports::{DnsExchange, QueryProtocol, QueryRequest};
use rootwalk_domain::{DnsMessage, DomainError, DomainName, RecordType, ServerAddress};
use std::collections::HashMap;
use std::net::IpAddr;
use std::sync::Mutex;

type Key = (IpAddr, DomainName, RecordType);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedQuery {
    pub server: IpAddr,
    pub name: String,
    pub record_type: RecordType,
    pub protocol: QueryProtocol,
    pub dnssec_ok: bool,
}

/// Scripted responses keyed by (server, name, type). Anything unscripted
/// times out.
#[derive(Default)]
pub struct MockExchange {
    responses: Mutex<HashMap<Key, Result<DnsMessage, DomainError>>>,
    calls: Mutex<Vec<RecordedQuery>>,
}

impl MockExchange {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(&self, server: &str, name: &str, record_type: RecordType, message: DnsMessage) {
        self.responses
            .lock()
            .unwrap()
            .insert(key(server, name, record_type), Ok(message));
    }

    pub fn fail(&self, server: &str, name: &str, record_type: RecordType, error: DomainError) {
        self.responses
            .lock()
            .unwrap()
            .insert(key(server, name, record_type), Err(error));
    }

    pub fn calls(&self) -> Vec<RecordedQuery> {
        self.calls.lock().unwrap().clone()
    }

    pub fn calls_to(&self, server: &str) -> Vec<RecordedQuery> {
        let ip: IpAddr = server.parse().unwrap();
        self.calls().into_iter().filter(|c| c.server == ip).collect()
    }

    pub fn was_asked(&self, name: &str) -> bool {
        let name = DomainName::parse(name).unwrap().to_string();
        self.calls().iter().any(|c| c.name == name)
    }

    pub fn clear_calls(&self) {
        self.calls.lock().unwrap().clear();
    }
}

fn key(server: &str, name: &str, record_type: RecordType) -> Key {
    (
        server.parse().unwrap(),
        DomainName::parse(name).unwrap(),
        record_type,
    )
}

#[async_trait]
impl DnsExchange for MockExchange {
    async fn query(
        &self,
        server: &ServerAddress,
        request: &QueryRequest,
    ) -> Result<DnsMessage, DomainError> {
        self.calls.lock().unwrap().push(RecordedQuery {
            server: server.ip(),
            name: request.name.to_string(),
            record_type: request.record_type,
            protocol: request.protocol,
            dnssec_ok: request.dnssec_ok,
        });

        let lookup = (server.ip(), request.name.clone(), request.record_type);
        match self.responses.lock().unwrap().get(&lookup) {
            Some(result) => result.clone(),
            None => Err(DomainError::TransportTimeout {
                server: server.to_string(),
            }),
        }
    }
}
