mod resolve;

pub use resolve::{ResolutionMode, ResolveDomainUseCase};
