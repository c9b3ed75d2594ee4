pub mod codec;
pub mod dnssec;
pub mod exchange;
pub mod transport;

pub use dnssec::RingVerifier;
pub use exchange::NetworkExchange;
