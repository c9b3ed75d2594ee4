use crate::ports::{DnsExchange, DnssecVerifier};
use crate::services::{AnswerResolver, DelegationWalker, TrustChainValidator};
use rootwalk_domain::{DnsAnswer, DomainError, DomainName, RecordType, ResolverSettings};
use std::fmt;
use std::sync::Arc;
use std::time::Instant;
use tracing::{info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolutionMode {
    /// UDP referral walk without validation.
    Plain,
    /// TCP referral walk validating each zone cut from the root anchors.
    Secure,
}

impl fmt::Display for ResolutionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Plain => f.write_str("plain"),
            Self::Secure => f.write_str("secure"),
        }
    }
}

pub struct ResolveDomainUseCase {
    plain: AnswerResolver<DelegationWalker>,
    secure: AnswerResolver<TrustChainValidator>,
}

impl ResolveDomainUseCase {
    pub fn new(
        exchange: Arc<dyn DnsExchange>,
        verifier: Arc<dyn DnssecVerifier>,
        settings: Arc<ResolverSettings>,
    ) -> Self {
        let walker = DelegationWalker::new(exchange.clone(), settings.clone());
        let validator = TrustChainValidator::new(exchange, verifier, settings);
        Self {
            plain: AnswerResolver::new(Arc::new(walker)),
            secure: AnswerResolver::new(Arc::new(validator)),
        }
    }

    pub async fn execute(
        &self,
        domain: &str,
        record_type: RecordType,
        mode: ResolutionMode,
    ) -> Result<DnsAnswer, DomainError> {
        let start = Instant::now();
        let domain = DomainName::parse(domain)?;
        info!(domain = %domain, record_type = %record_type, mode = %mode, "Resolving");

        let result = match mode {
            ResolutionMode::Plain => self.plain.resolve(&domain, record_type).await,
            ResolutionMode::Secure => self.secure.resolve(&domain, record_type).await,
        };

        let elapsed_ms = start.elapsed().as_secs_f64() * 1000.0;
        match &result {
            Ok(answer) => info!(
                domain = %domain,
                answers = answer.answers.len(),
                server = %answer.server,
                elapsed_ms,
                "Resolution complete"
            ),
            Err(e) => warn!(domain = %domain, error = %e, elapsed_ms, "Resolution failed"),
        }
        result
    }
}
