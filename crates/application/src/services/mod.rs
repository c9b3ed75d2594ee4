mod answer;
mod context;
mod delegation;
mod referral;
mod trust_chain;

pub use answer::AnswerResolver;
pub use context::ResolutionContext;
pub use delegation::{DelegationSource, DelegationWalker, ReferralStep};
pub use referral::{Referral, ReferralExplorer};
pub use trust_chain::TrustChainValidator;
