use async_trait::async_trait;
use rootwalk_application::ports::{DnsExchange, QueryRequest};
use rootwalk_domain::{DnsMessage, DomainError, DomainName, RecordType, ServerAddress};
use std::collections::HashMap;
use std::net::IpAddr;
use std::sync::Mutex;

/// In-memory [`DnsExchange`] for driving the validator with real crypto but
/// no sockets.
#[derive(Default)]
pub struct ScriptedExchange {
    responses: Mutex<HashMap<(IpAddr, DomainName, RecordType), DnsMessage>>,
    calls: Mutex<Vec<(IpAddr, String, RecordType)>>,
}

impl ScriptedExchange {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(&self, ip: &str, name: &str, record_type: RecordType, message: DnsMessage) {
        self.responses.lock().unwrap().insert(
            (
                ip.parse().unwrap(),
                DomainName::parse(name).unwrap(),
                record_type,
            ),
            message,
        );
    }

    pub fn calls(&self) -> Vec<(IpAddr, String, RecordType)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl DnsExchange for ScriptedExchange {
    async fn query(
        &self,
        server: &ServerAddress,
        request: &QueryRequest,
    ) -> Result<DnsMessage, DomainError> {
        self.calls.lock().unwrap().push((
            server.ip(),
            request.name.to_string(),
            request.record_type,
        ));

        self.responses
            .lock()
            .unwrap()
            .get(&(server.ip(), request.name.clone(), request.record_type))
            .cloned()
            .ok_or_else(|| DomainError::TransportTimeout {
                server: server.to_string(),
            })
    }
}
