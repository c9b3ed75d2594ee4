use super::errors::ConfigError;
use crate::dnssec::{DelegationSigner, TrustAnchorStore, DEFAULT_ROOT_ANCHORS};
use crate::{ServerAddress, ServerSet, DNS_PORT};
use serde::{Deserialize, Serialize};
use std::net::IpAddr;
use std::time::Duration;

/// IPv4 addresses of a.root-servers.net through m.root-servers.net.
pub const DEFAULT_ROOT_SERVERS: [&str; 13] = [
    "198.41.0.4",
    "199.9.14.201",
    "192.33.4.12",
    "199.7.91.13",
    "192.203.230.10",
    "192.5.5.241",
    "192.112.36.4",
    "198.97.190.53",
    "192.36.148.17",
    "192.58.128.30",
    "193.0.14.129",
    "199.7.83.42",
    "202.12.27.33",
];

/// `[resolver]` section as written in the TOML file.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ResolverConfig {
    /// Address literals the walk starts from
    #[serde(default = "default_root_servers")]
    pub root_servers: Vec<String>,

    /// Root KSK digests in DS presentation form
    #[serde(default = "default_trust_anchors")]
    pub trust_anchors: Vec<String>,

    /// Destination port for every query
    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_udp_timeout_ms")]
    pub udp_timeout_ms: u64,

    #[serde(default = "default_tcp_timeout_ms")]
    pub tcp_timeout_ms: u64,

    /// Bound on nested alias and nameserver lookups
    #[serde(default = "default_max_alias_depth")]
    pub max_alias_depth: usize,

    /// Accept AAAA glue as candidate servers
    #[serde(default)]
    pub ipv6_glue: bool,

    /// Advertised EDNS(0) UDP payload size
    #[serde(default = "default_edns_payload")]
    pub edns_payload: u16,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            root_servers: default_root_servers(),
            trust_anchors: default_trust_anchors(),
            port: default_port(),
            udp_timeout_ms: default_udp_timeout_ms(),
            tcp_timeout_ms: default_tcp_timeout_ms(),
            max_alias_depth: default_max_alias_depth(),
            ipv6_glue: false,
            edns_payload: default_edns_payload(),
        }
    }
}

impl ResolverConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.settings().map(|_| ())
    }

    /// Parse and check every field into the immutable value handed to the
    /// resolver.
    pub fn settings(&self) -> Result<ResolverSettings, ConfigError> {
        if self.root_servers.is_empty() {
            return Err(ConfigError::Validation(
                "No root servers configured".to_string(),
            ));
        }

        let root_servers = self
            .root_servers
            .iter()
            .map(|raw| {
                raw.trim()
                    .parse::<IpAddr>()
                    .map(|ip| ServerAddress::new(ip, self.port))
                    .map_err(|_| {
                        ConfigError::Validation(format!(
                            "Root server '{}' is not an IP address literal",
                            raw
                        ))
                    })
            })
            .collect::<Result<ServerSet, _>>()?;

        if self.trust_anchors.is_empty() {
            return Err(ConfigError::Validation(
                "No trust anchors configured".to_string(),
            ));
        }

        let trust_anchors = TrustAnchorStore::from_presentation(&self.trust_anchors)
            .map_err(|e| ConfigError::Validation(e.to_string()))?;

        for anchor in trust_anchors.iter() {
            DelegationSigner::from_ds(anchor.clone()).map_err(|e| {
                ConfigError::Validation(format!("Trust anchor {}: {}", anchor.key_tag, e))
            })?;
        }

        if self.port == 0 {
            return Err(ConfigError::Validation("Port cannot be 0".to_string()));
        }

        if self.udp_timeout_ms == 0 || self.tcp_timeout_ms == 0 {
            return Err(ConfigError::Validation(
                "Query timeouts must be greater than 0".to_string(),
            ));
        }

        if self.max_alias_depth == 0 {
            return Err(ConfigError::Validation(
                "max_alias_depth must be at least 1".to_string(),
            ));
        }

        if self.edns_payload < 512 {
            return Err(ConfigError::Validation(
                "edns_payload must be at least 512".to_string(),
            ));
        }

        Ok(ResolverSettings {
            root_servers,
            trust_anchors,
            port: self.port,
            udp_timeout: Duration::from_millis(self.udp_timeout_ms),
            tcp_timeout: Duration::from_millis(self.tcp_timeout_ms),
            max_alias_depth: self.max_alias_depth,
            ipv6_glue: self.ipv6_glue,
        })
    }
}

/// Validated resolver parameters, shared read-only for the life of the
/// process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolverSettings {
    pub root_servers: ServerSet,
    pub trust_anchors: TrustAnchorStore,
    /// Port used for servers discovered through glue and sub-resolution.
    pub port: u16,
    pub udp_timeout: Duration,
    pub tcp_timeout: Duration,
    pub max_alias_depth: usize,
    pub ipv6_glue: bool,
}

impl ResolverSettings {
    pub fn server(&self, ip: IpAddr) -> ServerAddress {
        ServerAddress::new(ip, self.port)
    }
}

fn default_root_servers() -> Vec<String> {
    DEFAULT_ROOT_SERVERS.iter().map(|s| s.to_string()).collect()
}

fn default_trust_anchors() -> Vec<String> {
    DEFAULT_ROOT_ANCHORS.iter().map(|s| s.to_string()).collect()
}

fn default_port() -> u16 {
    DNS_PORT
}

fn default_udp_timeout_ms() -> u64 {
    2000
}

fn default_tcp_timeout_ms() -> u64 {
    10000
}

fn default_max_alias_depth() -> usize {
    10
}

fn default_edns_payload() -> u16 {
    4096
}
