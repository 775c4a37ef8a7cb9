//! ghw - command-line client for the open bucket search API

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use ghw::cli::{normalize_args, Cli};
use ghw::config;

#[tokio::main]
async fn main() {
    // Accept Go-style single dash long flags
    let cli = Cli::parse_from(normalize_args(std::env::args()));

    let config = config::load_config().await;
    let debug = cli.debug || config.as_ref().map(|c| c.debug).unwrap_or(false);
    init_logging(debug);

    let result = match config {
        Ok(config) => {
            info!("Starting ghw");
            cli.execute(config).await
        }
        Err(e) => Err(e),
    };

    if let Err(e) = result {
        error!("Error: {}", e);
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn init_logging(debug: bool) {
    let default_filter = if debug { "ghw=debug" } else { "ghw=warn" };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
