pub mod crypto;

pub use crypto::RingVerifier;
