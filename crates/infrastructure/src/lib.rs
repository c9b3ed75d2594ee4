//! Network and crypto adapters for the rootwalk resolver.
pub mod dns;
