use rootwalk_domain::{
    DnsMessage, DomainName, RecordData, ResolverSettings, ServerAddress, ServerSet,
};

/// What one server's response says about where to go next.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Referral {
    /// The authority section opens with an SOA: the server is authoritative
    /// and the walk ends here.
    Authoritative(ServerSet),
    /// The server answered for this name. Remaining labels are asked of it.
    Answered(ServerSet),
    /// A delegation with address glue.
    Glue(ServerSet),
    /// A delegation without glue; the named host has to be looked up first.
    Unglued(DomainName),
    DeadEnd,
}

impl Referral {
    /// Only an SOA stops the walk before every label is consumed.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Referral::Authoritative(_))
    }
}

/// Classifies referral responses. Stateless apart from glue policy.
#[derive(Debug, Clone, Copy)]
pub struct ReferralExplorer {
    ipv6_glue: bool,
    port: u16,
}

impl ReferralExplorer {
    pub fn new(settings: &ResolverSettings) -> Self {
        Self {
            ipv6_glue: settings.ipv6_glue,
            port: settings.port,
        }
    }

    pub fn explore(&self, response: &DnsMessage, server: &ServerAddress) -> Referral {
        if response.has_answers() {
            return Referral::Answered(ServerSet::single(*server));
        }
        if response.authority_starts_with_soa() {
            return Referral::Authoritative(ServerSet::single(*server));
        }

        let glue = response.glue_addresses(self.ipv6_glue);
        if !glue.is_empty() {
            return Referral::Glue(
                glue.into_iter()
                    .map(|ip| ServerAddress::new(ip, self.port))
                    .collect(),
            );
        }

        // Signed referrals may list DS ahead of NS.
        response
            .authority
            .iter()
            .find_map(|record| match &record.data {
                RecordData::NS(host) | RecordData::CNAME(host) => Some(host.clone()),
                _ => None,
            })
            .map_or(Referral::DeadEnd, Referral::Unglued)
    }
}
