use super::context::ResolutionContext;
use super::delegation::{DelegationSource, ReferralStep};
use super::referral::ReferralExplorer;
use crate::ports::{DnsExchange, DnssecVerifier, QueryRequest};
use async_trait::async_trait;
use rootwalk_domain::dnssec::{DelegationSigner, DnskeyRecord, RrsigRecord};
use rootwalk_domain::{
    DnsMessage, DomainError, DomainName, RecordType, ResolutionState, ResolverSettings,
    ServerAddress, ServerSet,
};
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::{debug, instrument, warn};

/// DNSKEY material a zone served in one response.
struct ZoneKeys {
    keys: Vec<DnskeyRecord>,
    rrsigs: Vec<RrsigRecord>,
}

impl ZoneKeys {
    /// `None` unless the response carries a KSK and an RRSIG over the set.
    fn from_response(response: &DnsMessage) -> Option<Self> {
        let keys = response.dnskeys();
        let rrsigs = response.rrsigs_covering(RecordType::DNSKEY);

        if rrsigs.is_empty() || !keys.iter().any(DnskeyRecord::is_key_signing_key) {
            return None;
        }
        Some(Self { keys, rrsigs })
    }

    fn key_signing_keys(&self) -> impl Iterator<Item = &DnskeyRecord> {
        self.keys.iter().filter(|key| key.is_key_signing_key())
    }

    fn signatures_by<'a>(&'a self, key: &'a DnskeyRecord) -> impl Iterator<Item = &'a RrsigRecord> {
        let tag = key.key_tag();
        self.rrsigs
            .iter()
            .filter(move |sig| sig.key_tag == tag && sig.algorithm == key.algorithm)
    }
}

/// Secure walk: every zone cut's KSK is checked against the DS its parent
/// published, starting from the configured root trust anchors.
///
/// Referral queries ask for the accumulated name's DNSKEY set over TCP with
/// the DO bit, so the parent's answer carries the child's DS records.
pub struct TrustChainValidator {
    exchange: Arc<dyn DnsExchange>,
    verifier: Arc<dyn DnssecVerifier>,
    settings: Arc<ResolverSettings>,
    explorer: ReferralExplorer,
    anchors: Vec<DelegationSigner>,
}

impl TrustChainValidator {
    pub fn new(
        exchange: Arc<dyn DnsExchange>,
        verifier: Arc<dyn DnssecVerifier>,
        settings: Arc<ResolverSettings>,
    ) -> Self {
        let explorer = ReferralExplorer::new(&settings);
        let anchors = settings
            .trust_anchors
            .iter()
            .filter_map(|ds| DelegationSigner::from_ds(ds.clone()).ok())
            .collect();
        Self {
            exchange,
            verifier,
            settings,
            explorer,
            anchors,
        }
    }

    fn key_request(&self, zone: DomainName) -> QueryRequest {
        QueryRequest::tcp(zone, RecordType::DNSKEY, self.settings.tcp_timeout).with_dnssec_ok()
    }

    async fn fetch_keys(
        &self,
        zone: &DomainName,
        server: &ServerAddress,
    ) -> Result<Option<ZoneKeys>, DomainError> {
        let request = self.key_request(zone.clone());
        let keys = self
            .ask(server, &request)
            .await?
            .and_then(|response| ZoneKeys::from_response(&response));
        if keys.is_none() {
            debug!(zone = %zone, server = %server, "No DNSKEY material from server");
        }
        Ok(keys)
    }

    /// Keys from the first server in `servers` that serves a complete set.
    async fn fetch_keys_from(
        &self,
        zone: &DomainName,
        servers: &ServerSet,
    ) -> Result<Option<ZoneKeys>, DomainError> {
        for server in servers.iter() {
            if let Some(keys) = self.fetch_keys(zone, server).await? {
                return Ok(Some(keys));
            }
        }
        Ok(None)
    }

    /// A KSK must hash to one of `signers` under that signer's digest
    /// algorithm, and the DNSKEY RRset must carry a valid RRSIG made by it.
    fn validate_keys(
        &self,
        zone: &DomainName,
        keys: &ZoneKeys,
        signers: &[DelegationSigner],
    ) -> Result<(), DomainError> {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs() as u32)
            .unwrap_or(0);
        let mut matched = false;

        for ksk in keys.key_signing_keys() {
            for signer in signers {
                let computed = self.verifier.compute_ds(zone, ksk, signer.digest)?;
                if computed != signer.ds {
                    continue;
                }
                matched = true;
                debug!(zone = %zone, key_tag = ksk.key_tag(), digest = %signer.digest, "DS matches KSK");

                for rrsig in keys.signatures_by(ksk) {
                    match self
                        .verifier
                        .verify_dnskey_rrsig(zone, rrsig, ksk, &keys.keys, now)
                    {
                        Ok(true) => {
                            debug!(zone = %zone, key_tag = ksk.key_tag(), "DNSKEY RRSIG verified");
                            return Ok(());
                        }
                        Ok(false) => {
                            debug!(zone = %zone, key_tag = rrsig.key_tag, "DNSKEY RRSIG rejected");
                        }
                        Err(e) => {
                            warn!(zone = %zone, error = %e, "RRSIG verification error");
                        }
                    }
                }
            }
        }

        let reason = if matched {
            format!("DNSKEY RRSIG for {} did not verify", zone)
        } else {
            format!("no DNSKEY for {} matches its DS", zone)
        };
        warn!(zone = %zone, reason = %reason, "Zone keys rejected");
        Err(DomainError::DnssecValidationFailed(reason))
    }

    /// Validates the held zone against the DS its parent asserted, or the
    /// trust anchors for the root.
    async fn validate_zone(&self, state: &ResolutionState) -> Result<(), DomainError> {
        let zone = state.zone();
        let signers = if zone.is_root() {
            &self.anchors[..]
        } else {
            state.require_signers()?
        };

        let Some(keys) = self.fetch_keys_from(zone, state.servers()).await? else {
            return Err(DomainError::DnssecNotSupported {
                zone: zone.to_string(),
            });
        };

        self.validate_keys(zone, &keys, signers)
    }

    /// Root phase: the first root server whose keys validate against the
    /// anchors is asked for the top-level referral.
    async fn enter_from_root(
        &self,
        request: &QueryRequest,
        ctx: &mut ResolutionContext,
    ) -> Result<Option<ReferralStep>, DomainError> {
        let root = DomainName::root();
        let mut rejected = None;

        for server in self.settings.root_servers.iter() {
            let Some(keys) = self.fetch_keys(&root, server).await? else {
                continue;
            };
            if let Err(e) = self.validate_keys(&root, &keys, &self.anchors) {
                warn!(server = %server, error = %e, "Root keys rejected, trying next root");
                rejected = Some(e);
                continue;
            }
            let single = ServerSet::single(*server);
            if let Some(step) = self.follow_referral(&single, request, ctx).await? {
                return Ok(Some(step));
            }
        }

        match rejected {
            Some(e) => Err(e),
            None => Ok(None),
        }
    }

    fn signers_for(zone: &DomainName, step: &ReferralStep) -> Vec<DelegationSigner> {
        step.response
            .delegation_signers(zone)
            .into_iter()
            .filter_map(|ds| match DelegationSigner::from_ds(ds) {
                Ok(signer) => Some(signer),
                Err(e) => {
                    debug!(zone = %zone, error = %e, "Ignoring DS record");
                    None
                }
            })
            .collect()
    }
}

#[async_trait]
impl DelegationSource for TrustChainValidator {
    #[instrument(skip_all, fields(domain = %domain))]
    async fn resolve_delegation(
        &self,
        domain: &DomainName,
        _record_type: RecordType,
        ctx: &mut ResolutionContext,
    ) -> Result<ServerSet, DomainError> {
        let mut state = ResolutionState::at_root(self.settings.root_servers.clone());

        for depth in 1..=domain.label_count() {
            let zone = domain.ancestor_with(depth);
            let request = self.key_request(zone.clone());

            let step = if state.zone().is_root() {
                self.enter_from_root(&request, ctx).await?
            } else {
                self.validate_zone(&state).await?;
                debug!(zone = %state.zone(), "Zone validated");
                self.follow_referral(state.servers(), &request, ctx).await?
            };

            let Some(step) = step else {
                return Err(DomainError::DelegationDeadEnd {
                    zone: zone.to_string(),
                });
            };

            if step.terminal {
                debug!(zone = %zone, server = %step.server, "Authoritative server reached");
                state = state.into_authoritative(step.next);
                break;
            }

            let signers = Self::signers_for(&zone, &step);
            debug!(zone = %zone, servers = %step.next, signers = signers.len(), "Referral received");
            state = state.descend(zone, step.next, signers);
        }

        // No SOA ended the walk early: the last zone has not been checked.
        if !state.is_authoritative() {
            self.validate_zone(&state).await?;
            debug!(zone = %state.zone(), "Leaf zone validated");
        }

        Ok(state.into_servers())
    }

    fn answer_request(&self, name: &DomainName, record_type: RecordType) -> QueryRequest {
        QueryRequest::tcp(name.clone(), record_type, self.settings.tcp_timeout)
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
