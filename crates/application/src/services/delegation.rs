use super::context::ResolutionContext;
use super::referral::{Referral, ReferralExplorer};
use crate::ports::{DnsExchange, QueryRequest};
use async_trait::async_trait;
use rootwalk_domain::{
    DnsMessage, DomainError, DomainName, RecordType, ResolutionState, ResolverSettings,
    ResourceRecord, ServerAddress, ServerSet,
};
use std::sync::Arc;
use tracing::{debug, instrument, warn};

/// A response that led somewhere, and where it led.
#[derive(Debug, Clone)]
pub struct ReferralStep {
    pub server: ServerAddress,
    pub next: ServerSet,
    /// Set only when the response carried an authoritative SOA.
    pub terminal: bool,
    pub response: DnsMessage,
}

/// Finds the servers authoritative for a name.
///
/// The plain walker and the DNSSEC validator differ only in how they walk
/// and in the transport they use; trying servers in order, classifying
/// referrals and looking up glue-less nameservers is shared here.
#[async_trait]
pub trait DelegationSource: Send + Sync {
    async fn resolve_delegation(
        &self,
        domain: &DomainName,
        record_type: RecordType,
        ctx: &mut ResolutionContext,
    ) -> Result<ServerSet, DomainError>;

    /// The query sent to the authoritative set once the walk is over.
    fn answer_request(&self, name: &DomainName, record_type: RecordType) -> QueryRequest;

    fn exchange(&self) -> &dyn DnsExchange;

    fn explorer(&self) -> &ReferralExplorer;

    fn settings(&self) -> &ResolverSettings;

    /// Sends `request` to `server`; server-local failures come back as `None`.
    async fn ask(
        &self,
        server: &ServerAddress,
        request: &QueryRequest,
    ) -> Result<Option<DnsMessage>, DomainError> {
        match self.exchange().query(server, request).await {
            Ok(response) => Ok(Some(response)),
            Err(e) if e.is_server_local() => {
                debug!(
                    server = %server,
                    name = %request.name,
                    error = %e,
                    "Server gave nothing, trying next"
                );
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    /// Tries `servers` in order and returns the first useful referral.
    async fn follow_referral(
        &self,
        servers: &ServerSet,
        request: &QueryRequest,
        ctx: &mut ResolutionContext,
    ) -> Result<Option<ReferralStep>, DomainError> {
        for server in servers.iter() {
            let Some(response) = self.ask(server, request).await? else {
                continue;
            };

            let (next, terminal) = match self.explorer().explore(&response, server) {
                Referral::Authoritative(next) => (next, true),
                Referral::Answered(next) => (next, false),
                Referral::Glue(next) => (next, false),
                Referral::Unglued(host) => match self.resolve_nameserver(&host, ctx).await {
                    Ok(next) => (next, false),
                    Err(e) => {
                        warn!(
                            nameserver = %host,
                            zone = %request.name,
                            error = %e,
                            "Glue-less nameserver could not be resolved"
                        );
                        continue;
                    }
                },
                Referral::DeadEnd => {
                    debug!(server = %server, zone = %request.name, "No referral in response");
                    continue;
                }
            };

            return Ok(Some(ReferralStep {
                server: *server,
                next,
                terminal,
                response,
            }));
        }

        Ok(None)
    }

    /// Addresses of a nameserver named in a referral without glue, found
    /// through a walk of the same kind as the caller's.
    async fn resolve_nameserver(
        &self,
        host: &DomainName,
        ctx: &mut ResolutionContext,
    ) -> Result<ServerSet, DomainError> {
        ctx.enter(host)?;
        let result = self.lookup_addresses(host, ctx).await;
        ctx.leave();
        result
    }

    async fn lookup_addresses(
        &self,
        host: &DomainName,
        ctx: &mut ResolutionContext,
    ) -> Result<ServerSet, DomainError> {
        let servers = self.resolve_delegation(host, RecordType::A, ctx).await?;
        let request = self.answer_request(host, RecordType::A);

        for server in servers.iter() {
            let Some(response) = self.ask(server, &request).await? else {
                continue;
            };
            let addresses: ServerSet = response
                .answers
                .iter()
                .filter_map(ResourceRecord::address)
                .filter(|ip| ip.is_ipv4() || self.settings().ipv6_glue)
                .map(|ip| self.settings().server(ip))
                .collect();
            if !addresses.is_empty() {
                debug!(nameserver = %host, addresses = %addresses, "Nameserver resolved");
                return Ok(addresses);
            }
        }

        Err(DomainError::NoAnswer {
            domain: host.to_string(),
        })
    }
}

/// Plain iterative walk: UDP queries for the requested type, no validation.
pub struct DelegationWalker {
    exchange: Arc<dyn DnsExchange>,
    settings: Arc<ResolverSettings>,
    explorer: ReferralExplorer,
}

impl DelegationWalker {
    pub fn new(exchange: Arc<dyn DnsExchange>, settings: Arc<ResolverSettings>) -> Self {
        let explorer = ReferralExplorer::new(&settings);
        Self {
            exchange,
            settings,
            explorer,
        }
    }
}

#[async_trait]
impl DelegationSource for DelegationWalker {
    #[instrument(skip_all, fields(domain = %domain, record_type = %record_type))]
    async fn resolve_delegation(
        &self,
        domain: &DomainName,
        record_type: RecordType,
        ctx: &mut ResolutionContext,
    ) -> Result<ServerSet, DomainError> {
        let mut state = ResolutionState::at_root(self.settings.root_servers.clone());

        for depth in 1..=domain.label_count() {
            let zone = domain.ancestor_with(depth);
            let request = QueryRequest::udp(zone.clone(), record_type, self.settings.udp_timeout);

            let Some(step) = self.follow_referral(state.servers(), &request, ctx).await? else {
                return Err(DomainError::DelegationDeadEnd {
                    zone: zone.to_string(),
                });
            };

            if step.terminal {
                debug!(zone = %zone, server = %step.server, "Authoritative server reached");
                state = state.into_authoritative(step.next);
                break;
            }

            debug!(zone = %zone, servers = %step.next, "Servers for next label");
            state = state.descend(zone, step.next, Vec::new());
        }

        Ok(state.into_servers())
    }

    fn answer_request(&self, name: &DomainName, record_type: RecordType) -> QueryRequest {
        QueryRequest::udp(name.clone(), record_type, self.settings.udp_timeout)
    }

    fn exchange(&self) -> &dyn DnsExchange {
        self.exchange.as_ref()
    }

    fn explorer(&self) -> &ReferralExplorer {
        &self.explorer
    }

    fn settings(&self) -> &ResolverSettings {
        &self.settings
    }
}
