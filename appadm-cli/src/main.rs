//! # appadm
//!
//! Administrative command-line front end for the cluster resource manager.

use clap::Parser;
use tracing::{debug, error};

use appadm_core::{Config, RestClient};

use appadm_cli::cli::Cli;
use appadm_cli::{commands, output, EXIT_FAILURE};

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();
    debug!(?cli.command, "running command");

    let config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            error!("configuration load failed: {e}");
            output::print_error(&format!("failed to load configuration: {e}"));
            std::process::exit(EXIT_FAILURE);
        }
    };

    let client = match RestClient::new(&config) {
        Ok(client) => client,
        Err(e) => {
            error!("client construction failed: {e}");
            output::print_error(&format!("failed to build the service client: {e}"));
            std::process::exit(EXIT_FAILURE);
        }
    };

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let code = match commands::run(cli.command, &config, &client, &mut out).await {
        Ok(code) => code,
        Err(e) => {
            error!("command failed: {e}");
            output::print_error(&e.to_string());
            EXIT_FAILURE
        }
    };
    std::process::exit(code);
}
