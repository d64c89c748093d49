use clap::Parser;
use std::sync::Arc;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use marketplace_client::api::ApiClient;
use marketplace_client::cli::{self, Cli};
use marketplace_client::config;
use marketplace_client::metrics::ClientMetrics;

const DEFAULT_LOG_FILTER: &str = "info,marketplace_client=debug";

#[tokio::main]
async fn main() {
    config::load_dotenv();
    let args = Cli::parse();

    // Logs go to stderr; stdout carries command output
    // Example: RUST_LOG=debug marketplace orders list
    let filter = args
        .config
        .log_filter
        .as_deref()
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_LOG_FILTER));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).with_target(true))
        .with(filter)
        .init();

    let print_metrics = args.config.print_metrics;
    let metrics = match ClientMetrics::new() {
        Ok(metrics) => Arc::new(metrics),
        Err(error) => {
            tracing::error!(error = %error, "Failed to create metrics registry");
            std::process::exit(1);
        }
    };

    let result = execute(args, metrics.clone()).await;

    if print_metrics {
        match metrics.render() {
            Ok(text) => eprintln!("{text}"),
            Err(error) => tracing::warn!(error = %error, "Failed to render metrics"),
        }
    }

    if let Err(error) = result {
        tracing::error!(error = ?error, "Command failed");
        eprintln!("Error: {}", cli::user_message(&error));
        std::process::exit(1);
    }
}

async fn execute(args: Cli, metrics: Arc<ClientMetrics>) -> anyhow::Result<()> {
    let api_config = args.config.to_api_config()?;

    tracing::debug!(
        base_url = %api_config.base_url,
        read_attempts = api_config.read_retry.config.max_attempts,
        "🚀 Marketplace client ready"
    );

    let client = ApiClient::new(api_config, metrics.clone())?;
    cli::run(args.command, client, metrics).await
}
