#![allow(dead_code)]
#![allow(unused_imports)]

pub mod builders;
pub mod dns_server_mock;
pub mod scripted_exchange;
pub mod signing;
pub mod wire;

pub use builders::*;
pub use dns_server_mock::{MockDnsServer, ReceivedQuery, Reply};
pub use scripted_exchange::ScriptedExchange;
pub use signing::ZoneSigner;
