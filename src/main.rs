//! BIE Dashboard Server
//!
//! Run with: cargo run --bin bie-dashboard -- [--config config.toml]
//!
//! # Configuration
//!
//! Settings come from a TOML file (see `--print-config`) with environment
//! overrides:
//! - `INEGI_TOKEN`: INEGI API token (required)
//! - `BIE_API_HOST`, `BIE_API_PORT` / `PORT`: listen address (default: 0.0.0.0:8050)
//! - `BIE_DASHBOARD_DIR`: built dashboard bundle (default: bie-ui/dist)
//! - `INEGI_BASE_URL`, `INEGI_TIMEOUT_SECS`: upstream endpoint and timeout
//! - `BIE_LOG_LEVEL`, `BIE_LOG_FORMAT`: logging (`RUST_LOG` wins over the level)

use anyhow::Context;
use bie_dashboard::api::{serve, AppState};
use bie_dashboard::config::{generate_default_config, Config, LogFormat, LoggingConfig};
use bie_dashboard::series::{InegiClient, SeriesFetcher};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "bie-dashboard")]
#[command(about = "Serve INEGI BIE series and the dashboard that charts them")]
#[command(version)]
struct Cli {
    /// Config file (default: search the usual locations)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Host to bind to (overrides config)
    #[arg(long)]
    host: Option<String>,

    /// Port to listen on (overrides config)
    #[arg(short, long)]
    port: Option<u16>,

    /// Print a commented default config file and exit
    #[arg(long)]
    print_config: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if cli.print_config {
        print!("{}", generate_default_config());
        return Ok(());
    }

    let config_path = cli.config.clone().or_else(Config::default_path);
    let mut config = match &config_path {
        Some(path) => Config::load_with_env(path)?,
        None => Config::from_env()?,
    };
    if let Some(host) = cli.host {
        config.api.host = host;
    }
    if let Some(port) = cli.port {
        config.api.port = port;
    }

    init_tracing(&config.logging);

    tracing::info!("Starting BIE dashboard v{}", env!("CARGO_PKG_VERSION"));
    match &config_path {
        Some(path) => tracing::info!("Loaded config from {:?}", path),
        None => tracing::info!("No config file found; using defaults with environment overrides"),
    }

    // Fatal before we bind anything
    let token = config
        .inegi
        .access_token()
        .context("Cannot start without an INEGI token")?;

    let client = InegiClient::new(config.inegi.clone(), token)
        .context("Failed to build INEGI HTTP client")?;
    tracing::info!(
        "INEGI source: {} (geography {}, timeout {}s)",
        config.inegi.base_url,
        config.inegi.geography,
        config.inegi.timeout_secs
    );

    let state = AppState::new(SeriesFetcher::new(Arc::new(client)), config.api.clone());
    serve(state).await?;

    tracing::info!("BIE dashboard stopped");
    Ok(())
}

/// Initialize tracing: `RUST_LOG` if set, otherwise the configured level
fn init_tracing(logging: &LoggingConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!("bie_dashboard={},tower_http=info", logging.level).into()
    });

    let registry = tracing_subscriber::registry().with(filter);
    match logging.format {
        LogFormat::Json => registry.with(tracing_subscriber::fmt::layer().json()).init(),
        LogFormat::Pretty => registry.with(tracing_subscriber::fmt::layer()).init(),
    }
}
