use clap::{Parser, Subcommand};
use rootwalk_application::use_cases::ResolutionMode;
use rootwalk_domain::{CliOverrides, RecordType};
use std::time::Instant;
use tracing::info;

mod bootstrap;
mod di;
mod output;

#[derive(Parser)]
#[command(name = "rootwalk")]
#[command(version)]
#[command(about = "Iterative DNS resolver that walks from the root, with optional DNSSEC validation")]
struct Cli {
    /// Configuration file path
    #[arg(short = 'c', long, value_name = "FILE", global = true)]
    config: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Destination port for every query
    #[arg(long, global = true)]
    port: Option<u16>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Walk the delegation chain over UDP and print the answer
    Resolve {
        domain: String,
        #[arg(value_name = "TYPE")]
        record_type: RecordType,
    },
    /// Validate every zone cut from the root trust anchors, then query A
    ResolveSecure { domain: String },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let cli_overrides = CliOverrides {
        log_level: cli.log_level.clone(),
        port: cli.port,
    };

    let config = bootstrap::load_config(cli.config.as_deref(), cli_overrides)?;
    bootstrap::init_logging(&config);

    info!("Starting rootwalk v{}", env!("CARGO_PKG_VERSION"));

    let use_cases = di::UseCases::new(&config)?;

    let (domain, record_type, mode) = match cli.command {
        Command::Resolve {
            domain,
            record_type,
        } => (domain, record_type, ResolutionMode::Plain),
        Command::ResolveSecure { domain } => (domain, RecordType::A, ResolutionMode::Secure),
    };

    let start = Instant::now();
    let result = use_cases.resolve.execute(&domain, record_type, mode).await;
    let elapsed = start.elapsed();

    match result {
        Ok(answer) => {
            print!(
                "{}",
                output::render_answer(&answer, elapsed, chrono::Local::now())
            );
            Ok(())
        }
        Err(e) => {
            println!("{}", output::failure_message(&e));
            std::process::exit(1);
        }
    }
}
