use super::codec::{MessageBuilder, ResponseParser};
use super::transport::create_transport;
use async_trait::async_trait;
use rootwalk_application::ports::{DnsExchange, QueryProtocol, QueryRequest};
use rootwalk_domain::{DnsMessage, DomainError, ServerAddress};
use tracing::{debug, instrument};

/// Sends one iterative query over UDP or TCP and decodes the answer.
///
/// A truncated UDP response is retried once over TCP with the same timeout.
/// Responses whose ID or question do not match the request, and responses
/// carrying a refusal rcode, are reported as server-local errors.
pub struct NetworkExchange {
    builder: MessageBuilder,
    edns_payload: u16,
}

impl NetworkExchange {
    pub fn new(edns_payload: u16) -> Self {
        Self {
            builder: MessageBuilder::new(edns_payload),
            edns_payload,
        }
    }

    async fn exchange_once(
        &self,
        server: &ServerAddress,
        request: &QueryRequest,
        protocol: QueryProtocol,
    ) -> Result<DnsMessage, DomainError> {
        let query = self.builder.build_query(request)?;
        let transport = create_transport(protocol, server, self.edns_payload);

        let response = transport.send(&query.bytes, request.timeout).await?;
        let message = ResponseParser::parse(&response.bytes)?;

        debug!(
            server = %server,
            protocol = response.protocol_used,
            bytes = response.bytes.len(),
            "Received response"
        );

        check_response(server, request, query.id, &message)?;
        Ok(message)
    }
}

fn check_response(
    server: &ServerAddress,
    request: &QueryRequest,
    id: u16,
    message: &DnsMessage,
) -> Result<(), DomainError> {
    if message.id != id {
        return Err(DomainError::InvalidDnsResponse(format!(
            "{} answered with ID {} for query {}",
            server, message.id, id
        )));
    }

    if let Some(question) = &message.question {
        if question.name != request.name || question.record_type != request.record_type {
            return Err(DomainError::InvalidDnsResponse(format!(
                "{} answered '{}' instead of '{} {}'",
                server, question, request.name, request.record_type
            )));
        }
    }

    if message.rcode.is_refusal() {
        return Err(DomainError::ServerRefused {
            server: server.to_string(),
            rcode: message.rcode.to_string(),
        });
    }

    Ok(())
}

#[async_trait]
impl DnsExchange for NetworkExchange {
    #[instrument(skip_all, fields(server = %server, name = %request.name, record_type = %request.record_type))]
    async fn query(
        &self,
        server: &ServerAddress,
        request: &QueryRequest,
    ) -> Result<DnsMessage, DomainError> {
        let message = self.exchange_once(server, request, request.protocol).await?;

        if message.truncated && request.protocol == QueryProtocol::Udp {
            debug!(server = %server, "Response truncated, retrying over TCP");
            return self.exchange_once(server, request, QueryProtocol::Tcp).await;
        }

        Ok(message)
    }
}
