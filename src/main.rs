//! cdnsync - CDN IP range sync for proxies and firewalls

use clap::Parser;
use tracing::error;

use cdnsync::cli::Cli;
use cdnsync::{logging, orchestrator};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose, cli.quiet);

    if let Err(e) = orchestrator::run(&cli).await {
        error!("{e:#}");
        std::process::exit(1);
    }
}
