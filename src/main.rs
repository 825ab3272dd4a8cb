use anyhow::{Context, Result};
use bouquet::config::{AdminConfig, Mode};
use bouquet::server::ServerBuilder;
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "bouquet-admin", version, about = "Admin API for the flower delivery dashboard")]
struct Cli {
    /// YAML configuration file; defaults apply when it does not exist
    #[arg(short = 'c', long = "config", default_value = "bouquet.yaml")]
    config: PathBuf,

    /// Data source, overriding the configured mode
    #[arg(long = "mode", value_enum)]
    mode: Option<Mode>,

    /// Listen port, overriding the configured port
    #[arg(short = 'p', long = "port")]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("bouquet=info,tower_http=info")),
        )
        .init();

    let cli = Cli::parse();

    let mut config = AdminConfig::load(&cli.config)
        .with_context(|| format!("loading {}", cli.config.display()))?;
    if let Some(mode) = cli.mode {
        config.mode = mode;
    }
    if let Some(port) = cli.port {
        config.server.port = port;
    }
    config.validate()?;

    let addr = config.bind_address();
    tracing::info!(mode = %config.mode, "starting bouquet admin API");

    ServerBuilder::from_config(config)?.serve(&addr).await
}
