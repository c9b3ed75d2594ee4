use super::context::ResolutionContext;
use super::delegation::DelegationSource;
use futures::future::{BoxFuture, FutureExt};
use rootwalk_domain::{
    DnsAnswer, DnsMessage, DomainError, DomainName, Question, RecordData, RecordType,
};
use std::sync::Arc;
use tracing::{debug, instrument};

/// Issues the final query against the authoritative set and flattens CNAME
/// chains into a single answer section. Alias targets are always looked up
/// for their A records, whatever type was asked for the alias.
pub struct AnswerResolver<D: DelegationSource> {
    delegation: Arc<D>,
    max_alias_depth: usize,
}

impl<D: DelegationSource> AnswerResolver<D> {
    pub fn new(delegation: Arc<D>) -> Self {
        let max_alias_depth = delegation.settings().max_alias_depth;
        Self {
            delegation,
            max_alias_depth,
        }
    }

    #[instrument(skip_all, fields(domain = %domain, record_type = %record_type))]
    pub async fn resolve(
        &self,
        domain: &DomainName,
        record_type: RecordType,
    ) -> Result<DnsAnswer, DomainError> {
        let mut ctx = ResolutionContext::new(self.max_alias_depth);
        self.resolve_in(domain.clone(), record_type, &mut ctx).await
    }

    fn resolve_in<'a>(
        &'a self,
        domain: DomainName,
        record_type: RecordType,
        ctx: &'a mut ResolutionContext,
    ) -> BoxFuture<'a, Result<DnsAnswer, DomainError>> {
        async move {
            ctx.enter(&domain)?;
            let result = self.lookup(&domain, record_type, ctx).await;
            ctx.leave();
            result
        }
        .boxed()
    }

    async fn lookup(
        &self,
        domain: &DomainName,
        record_type: RecordType,
        ctx: &mut ResolutionContext,
    ) -> Result<DnsAnswer, DomainError> {
        let servers = self
            .delegation
            .resolve_delegation(domain, record_type, ctx)
            .await?;
        let request = self.delegation.answer_request(domain, record_type);

        for server in servers.iter() {
            let Some(response) = self.delegation.ask(server, &request).await? else {
                continue;
            };

            let alias = alias_target(&response, domain);
            let mut answer = DnsAnswer {
                question: Question::new(domain.clone(), record_type),
                answers: response.answers,
                wire_size: response.wire_size,
                server: *server,
            };

            if let Some(target) = alias {
                debug!(alias = %domain, target = %target, "Following CNAME");
                let chased = self.resolve_in(target, RecordType::A, ctx).await?;
                answer.answers.extend(chased.answers);
            }

            return Ok(answer);
        }

        Err(DomainError::NoAnswer {
            domain: domain.to_string(),
        })
    }
}

/// The name at the end of the CNAME chain starting at `domain`, when the
/// answer starts with a CNAME and carries no A record for that name.
fn alias_target(response: &DnsMessage, domain: &DomainName) -> Option<DomainName> {
    let first = response.answers.first()?;
    if !first.is_type(RecordType::CNAME) {
        return None;
    }

    let mut current = domain.clone();
    for _ in 0..response.answers.len() {
        let next = response.answers.iter().find_map(|record| match &record.data {
            RecordData::CNAME(target) if record.name == current => Some(target.clone()),
            _ => None,
        });
        match next {
            Some(target) => current = target,
            None => break,
        }
    }

    if current == *domain {
        // The CNAME is owned by some other name; follow it as written.
        current = first.target()?.clone();
    }

    let resolved = response
        .answers
        .iter()
        .any(|record| record.name == current && record.is_type(RecordType::A));
    (!resolved).then_some(current)
}
