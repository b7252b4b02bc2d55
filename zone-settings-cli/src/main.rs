//! Command-line host for zone settings data sources and resources
//!
//! Runs one operation per invocation and prints the resulting JSON document
//! on stdout. Logs go to stderr; set `RUST_LOG` to change verbosity.

mod commands;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use commands::Command;
use serde_json::Value;
use tracing_subscriber::{
    filter::LevelFilter, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter,
};
use zone_settings_provider::{CloudflareClient, ProviderConfig, Registry, ZoneSettingsApi};

#[derive(Debug, Parser)]
#[command(name = "zone-settings")]
#[command(about = "Manage Cloudflare zone settings declaratively")]
#[command(version)]
#[command(long_about = "
Manage Cloudflare zone settings declaratively.

The API token is read from CLOUDFLARE_API_TOKEN or from the `api_token`
key of the JSON config file.

Examples:
  zone-settings schema
  zone-settings check-record --type A --content 192.0.2.1 --proxied
  zone-settings read cloudflare_zone_cache_reserve --config ds.json
  zone-settings apply cloudflare_zone_cache_reserve --config res.json --state state.json
  zone-settings import cloudflare_zone_cache_reserve 0da42c8d2132a9ddaf714f9e7c920711
")]
struct Cli {
    /// Provider config file (JSON)
    #[arg(long, global = true, env = "ZONE_SETTINGS_CONFIG")]
    config_file: Option<PathBuf>,

    /// Print compact instead of pretty JSON
    #[arg(long, global = true)]
    compact: bool,

    #[command(subcommand)]
    command: Command,
}

async fn run(cli: &Cli) -> Result<Value> {
    let registry = Registry::builtin();

    let client = if cli.command.needs_api() {
        let config = ProviderConfig::load(cli.config_file.as_deref())?;
        let client = CloudflareClient::from_config(&config)?;
        tracing::info!("Using {} API at {}", client.id(), client.base_url());
        Some(client)
    } else {
        None
    };
    let api = client.as_ref().map(|c| c as &dyn ZoneSettingsApi);

    commands::execute(&cli.command, &registry, api).await
}

/// Log filter from `RUST_LOG`-style directives, INFO when none are given.
fn log_filter(directives: Option<&str>) -> EnvFilter {
    EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .parse_lossy(directives.unwrap_or_default())
}

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize tracing to stderr (stdout carries the JSON result)
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .without_time()
                .with_ansi(false),
        )
        .with(log_filter(
            std::env::var(EnvFilter::DEFAULT_ENV).ok().as_deref(),
        ))
        .init();

    let cli = Cli::parse();

    let output = match run(&cli).await {
        Ok(v) => v,
        Err(e) => {
            tracing::error!("{e:#}");
            return ExitCode::FAILURE;
        }
    };

    let rendered = if cli.compact {
        serde_json::to_string(&output)
    } else {
        serde_json::to_string_pretty(&output)
    };
    match rendered {
        Ok(text) => {
            println!("{text}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!("Failed to render output: {e}");
            ExitCode::FAILURE
        }
    }
}
