use rootwalk_domain::{CliOverrides, Config};
use tracing::info;

pub fn load_config(
    config_path: Option<&str>,
    cli_overrides: CliOverrides,
) -> anyhow::Result<Config> {
    let config = Config::load(config_path, cli_overrides)?;
    config.validate()?;

    info!(
        config_file = config_path.unwrap_or("default"),
        root_servers = config.resolver.root_servers.len(),
        trust_anchors = config.resolver.trust_anchors.len(),
        port = config.resolver.port,
        "Configuration loaded"
    );

    Ok(config)
}
