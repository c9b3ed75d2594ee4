use anyhow::Context;
use rootwalk_application::use_cases::ResolveDomainUseCase;
use rootwalk_domain::Config;
use rootwalk_infrastructure::dns::{NetworkExchange, RingVerifier};
use std::sync::Arc;

pub struct UseCases {
    pub resolve: Arc<ResolveDomainUseCase>,
}

impl UseCases {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let settings = config
            .resolver
            .settings()
            .context("Invalid resolver configuration")?;

        let exchange = Arc::new(NetworkExchange::new(config.resolver.edns_payload));
        let verifier = Arc::new(RingVerifier::new());

        Ok(Self {
            resolve: Arc::new(ResolveDomainUseCase::new(
                exchange,
                verifier,
                Arc::new(settings),
            )),
        })
    }
}
